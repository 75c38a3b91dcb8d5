//! Frequency-based Alpha Process Discovery
//!
//! A noise-tolerant variant of the Alpha algorithm: directly-follows pairs are only considered
//! if they are frequent enough, both absolutely and relative to all successors of their source activity.
/// Assembling the workflow net from groupings
pub mod assembly;
/// Initial and final activity policies
pub mod boundary;
/// Algorithm parameters
pub mod config;
pub mod directly_follows;
/// Error types
pub mod error;
pub mod expansion;
pub mod footprint;
/// Full discovery (all steps combined)
pub mod full;
/// Filtering directly-follows pairs by their frequencies
pub mod significance;

#[doc(inline)]
pub use config::{AlphaFrequenciesConfig, MergeGuard, PlaceSelection};
#[doc(inline)]
pub use error::{BoundaryRole, ConfigError, DiscoveryError};
#[doc(inline)]
pub use full::{
    discover_workflow_net, discover_workflow_net_with_policy,
    discover_workflow_net_with_timing_fn, AlgoDuration, AlphaFrequenciesResult,
};
