use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::event_data::Activity;

/// Invalid [`AlphaFrequenciesConfig`](super::config::AlphaFrequenciesConfig)
///
/// Always reported before any discovery step runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("relative threshold {0} is outside of [0, 1]")]
    /// Relative threshold is not a number in `[0, 1]`
    RelativeThresholdOutOfRange(f64),
    #[error("invalid configuration: {0}")]
    /// Configuration could not be parsed (e.g., a negative absolute threshold)
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Role of a boundary activity
pub enum BoundaryRole {
    /// Activity connected to the source place
    Initial,
    /// Activity connected to the sink place
    Final,
}

impl Display for BoundaryRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundaryRole::Initial => write!(f, "initial"),
            BoundaryRole::Final => write!(f, "final"),
        }
    }
}

/// Errors of a discovery run
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("event log contains no traces")]
    /// The event log has no traces, so there is no data to discover from
    EmptyLog,
    #[error(transparent)]
    /// The configuration is invalid
    InvalidConfig(#[from] ConfigError),
    #[error("{role} boundary activity {activity:?} not found in the activity universe")]
    /// The designated initial or final activity does not occur in the log
    BoundaryActivityNotFound {
        /// Whether the initial or final activity is missing
        role: BoundaryRole,
        /// The missing activity
        activity: Activity,
    },
}
