use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::core::{event_data::EventLog, process_models::workflow_net::WorkflowNet};

use super::{
    assembly::assemble_workflow_net,
    boundary::{BoundaryActivities, BoundaryPolicy, FirstTraceBoundary},
    config::AlphaFrequenciesConfig,
    directly_follows::{extract_directly_follows, DirectlyFollowsEntry},
    error::DiscoveryError,
    expansion::{expand_groupings, Expansion},
    footprint::Footprint,
    significance::{filter_by_frequency, DirectlyFollowsPair},
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
/// Duration (in seconds) per step of the discovery (+ total time)
pub struct AlgoDuration {
    /// Duration for computing directly-follows frequencies (in seconds)
    pub extraction: f32,
    /// Duration for filtering directly-follows pairs (in seconds)
    pub filtering: f32,
    /// Duration for classifying footprints (in seconds)
    pub classification: f32,
    /// Duration for expanding groupings (in seconds)
    pub expansion: f32,
    /// Duration for assembling the workflow net (in seconds)
    pub assembly: f32,
    /// Total duration (in seconds)
    pub total: f32,
}

/// Get current system time milliseconds
pub fn get_current_time_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Discovered [`WorkflowNet`] together with all intermediate relations
pub struct AlphaFrequenciesResult {
    /// Directly-follows frequencies of the log
    pub frequencies: Vec<DirectlyFollowsEntry>,
    /// Directly-follows pairs meeting the thresholds
    pub accepted: Vec<DirectlyFollowsPair>,
    /// Causal and concurrent relations
    pub footprint: Footprint,
    /// Expanded groupings
    pub expansion: Expansion,
    /// Initial and final activity
    pub boundary: BoundaryActivities,
    /// The discovered workflow net
    pub net: WorkflowNet,
}

impl AlphaFrequenciesResult {
    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

///
/// Discover a [`WorkflowNet`] using frequency-based Alpha discovery
///
/// The initial and final activity are taken from the first trace of the log (see [`FirstTraceBoundary`]).
///
pub fn discover_workflow_net(
    log: &EventLog,
    config: AlphaFrequenciesConfig,
) -> Result<AlphaFrequenciesResult, DiscoveryError> {
    discover_workflow_net_with_policy(log, config, &FirstTraceBoundary)
}

/// Discover a [`WorkflowNet`] using the passed [`BoundaryPolicy`] for the initial and final activity
pub fn discover_workflow_net_with_policy(
    log: &EventLog,
    config: AlphaFrequenciesConfig,
    boundary_policy: &dyn BoundaryPolicy,
) -> Result<AlphaFrequenciesResult, DiscoveryError> {
    discover_workflow_net_with_timing_fn(log, config, boundary_policy, &get_current_time_millis)
        .map(|(res, _)| res)
}

/// Run frequency-based Alpha discovery
///
/// Additionally measures [`AlgoDuration`] using the passed `get_time_millis_fn` function
pub fn discover_workflow_net_with_timing_fn(
    log: &EventLog,
    config: AlphaFrequenciesConfig,
    boundary_policy: &dyn BoundaryPolicy,
    get_time_millis_fn: &dyn Fn() -> u128,
) -> Result<(AlphaFrequenciesResult, AlgoDuration), DiscoveryError> {
    config.validate()?;
    let boundary = boundary_policy.boundary_activities(log)?;
    log::info!(
        "Started frequency-based Alpha discovery (absolute threshold: {}, relative threshold: {})",
        config.absolute_threshold,
        config.relative_threshold
    );
    let secs_since = |start: u128| get_time_millis_fn().saturating_sub(start) as f32 / 1000.0;
    let mut algo_dur = AlgoDuration::default();
    let total_start = get_time_millis_fn();

    let mut start = get_time_millis_fn();
    let frequencies = extract_directly_follows(log)?;
    algo_dur.extraction = secs_since(start);
    log::debug!(
        "Extracted {} directly-follows pairs from {} traces in {:.4}s",
        frequencies.len(),
        log.len(),
        algo_dur.extraction
    );

    start = get_time_millis_fn();
    let accepted = filter_by_frequency(
        &frequencies,
        config.absolute_threshold,
        config.relative_threshold,
    );
    algo_dur.filtering = secs_since(start);
    log::debug!("Accepted {} directly-follows pairs", accepted.len());

    start = get_time_millis_fn();
    let footprint = Footprint::classify(&accepted);
    algo_dur.classification = secs_since(start);
    log::debug!(
        "Footprint: {} causal, {} concurrent",
        footprint.causal.len(),
        footprint.concurrent.len()
    );

    start = get_time_millis_fn();
    let expansion = expand_groupings(
        &footprint.causal,
        &footprint.concurrent,
        config.merge_guard,
        config.place_selection,
    );
    algo_dur.expansion = secs_since(start);
    log::debug!(
        "Expanded to {} groupings ({} used as places)",
        expansion.groupings.len(),
        expansion.place_groupings.len()
    );

    start = get_time_millis_fn();
    let net = assemble_workflow_net(&expansion.place_groupings, &log.activities(), &boundary)?;
    algo_dur.assembly = secs_since(start);
    log::debug!(
        "Assembled net with {} places and {} arcs",
        net.places.len(),
        net.arcs.len()
    );

    algo_dur.total = secs_since(total_start);
    log::info!("Whole discovery took: {:.4}s", algo_dur.total);
    Ok((
        AlphaFrequenciesResult {
            frequencies,
            accepted,
            footprint,
            expansion,
            boundary,
            net,
        },
        algo_dur,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::alpha_frequencies::error::ConfigError;

    #[test]
    fn timing_with_custom_clock() {
        let log = EventLog::from_traces(vec![vec!["a", "b"]]);
        let clock = std::cell::Cell::new(0_u128);
        let tick = || {
            clock.set(clock.get() + 500);
            clock.get()
        };
        let (res, dur) = discover_workflow_net_with_timing_fn(
            &log,
            AlphaFrequenciesConfig::default(),
            &FirstTraceBoundary,
            &tick,
        )
        .unwrap();
        assert_eq!(res.net.places.len(), 3);
        assert!(dur.extraction > 0.0);
        assert!(dur.total >= dur.extraction + dur.assembly);
    }

    #[test]
    fn boundary_is_designated_before_extraction() {
        let log = EventLog::from_traces(vec![Vec::<&str>::new(), Vec::new()]);
        let clock_calls = std::cell::Cell::new(0_u128);
        let tick = || {
            clock_calls.set(clock_calls.get() + 1);
            clock_calls.get()
        };
        let res = discover_workflow_net_with_timing_fn(
            &log,
            AlphaFrequenciesConfig::default(),
            &FirstTraceBoundary,
            &tick,
        );
        assert!(matches!(res, Err(DiscoveryError::EmptyLog)));
        assert_eq!(clock_calls.get(), 0);
    }

    #[test]
    fn invalid_config_stops_before_extraction() {
        let res = discover_workflow_net(
            &EventLog::new(),
            AlphaFrequenciesConfig::with_thresholds(1, 1.2),
        );
        assert!(matches!(
            res,
            Err(DiscoveryError::InvalidConfig(
                ConfigError::RelativeThresholdOutOfRange(_)
            ))
        ));
    }
}
