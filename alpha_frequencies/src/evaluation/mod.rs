//! Evaluation of discovery results against gold standard relations
/// Threshold grid search
pub mod grid_search;
/// Precision, recall and F1 of directly-follows relations
pub mod relation_metrics;

#[doc(inline)]
pub use grid_search::{grid_search, GridSearchEntry, GridSearchReport};
#[doc(inline)]
pub use relation_metrics::{evaluate_discovery, RelationMetrics};
