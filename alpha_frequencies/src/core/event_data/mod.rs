//! Event Data
//!
//! Case-centric event logs, already projected onto activity labels
/// [`EventLog`] struct and sub-structs
pub mod event_log_struct;

#[doc(inline)]
pub use event_log_struct::{normalize_activity_label, Activity, Case, EventLog, Trace};
