//! Policies designating the initial and final activity of a discovered net
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::event_data::{Activity, EventLog};

use super::error::DiscoveryError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Activities connected to the source and the sink place
pub struct BoundaryActivities {
    /// Activity enabled by the source place
    pub initial: Activity,
    /// Activity producing into the sink place
    pub final_activity: Activity,
}

impl BoundaryActivities {
    /// Create new boundary activities
    pub fn new<A: Into<Activity>>(initial: A, final_activity: A) -> Self {
        Self {
            initial: initial.into(),
            final_activity: final_activity.into(),
        }
    }
}

/// Designates the [`BoundaryActivities`] of an event log
pub trait BoundaryPolicy: Sync {
    /// Initial and final activity for the given log
    fn boundary_activities(&self, log: &EventLog) -> Result<BoundaryActivities, DiscoveryError>;
}

#[derive(Debug, Clone, Copy, Default)]
/// First and last activity of the first (non-empty) trace in the log
///
/// Only correct for logs with a single start and a single end activity.
pub struct FirstTraceBoundary;

impl BoundaryPolicy for FirstTraceBoundary {
    fn boundary_activities(&self, log: &EventLog) -> Result<BoundaryActivities, DiscoveryError> {
        log.traces()
            .find_map(|t| Some(BoundaryActivities::new(t.first()?.clone(), t.last()?.clone())))
            .ok_or(DiscoveryError::EmptyLog)
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Most frequent start and most frequent end activity over all traces
///
/// Ties are broken by choosing the lexicographically smallest activity.
pub struct MostFrequentBoundary;

fn most_frequent(counts: HashMap<Activity, u64>) -> Option<Activity> {
    counts
        .into_iter()
        .max_by(|(a, ca), (b, cb)| ca.cmp(cb).then_with(|| b.cmp(a)))
        .map(|(act, _)| act)
}

impl BoundaryPolicy for MostFrequentBoundary {
    fn boundary_activities(&self, log: &EventLog) -> Result<BoundaryActivities, DiscoveryError> {
        let initial = most_frequent(log.start_activities()).ok_or(DiscoveryError::EmptyLog)?;
        let final_activity = most_frequent(log.end_activities()).ok_or(DiscoveryError::EmptyLog)?;
        Ok(BoundaryActivities {
            initial,
            final_activity,
        })
    }
}

#[derive(Debug, Clone)]
/// Externally designated boundary activities, independent of the log
pub struct FixedBoundary(pub BoundaryActivities);

impl BoundaryPolicy for FixedBoundary {
    fn boundary_activities(&self, _log: &EventLog) -> Result<BoundaryActivities, DiscoveryError> {
        Ok(self.0.clone())
    }
}
