use std::{cmp::Reverse, collections::HashSet};

use itertools::Itertools;
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    core::event_data::EventLog,
    discovery::alpha_frequencies::{
        boundary::BoundaryPolicy, discover_workflow_net_with_policy,
        significance::DirectlyFollowsPair, AlphaFrequenciesConfig, DiscoveryError,
    },
};

use super::relation_metrics::{evaluate_discovery, RelationMetrics};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Evaluation of one threshold combination
pub struct GridSearchEntry {
    /// Absolute threshold used
    pub absolute_threshold: u64,
    /// Relative threshold used
    pub relative_threshold: f64,
    /// Quality of the accepted directly-follows pairs
    pub metrics: RelationMetrics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Result of a [`grid_search`]
pub struct GridSearchReport {
    /// All evaluated combinations, sorted by F1 score (descending)
    pub results: Vec<GridSearchEntry>,
    /// Combination with the highest F1 score (`None` if the grid was empty)
    pub best: Option<GridSearchEntry>,
}

/// Evaluate every combination of absolute and relative thresholds against a gold standard relation
///
/// All other parameters are taken from `base_config`.
/// Every combination is validated before any discovery runs; the runs themselves execute in parallel.
/// Combinations with the same F1 score keep their grid order (absolute thresholds first).
pub fn grid_search(
    log: &EventLog,
    absolute_values: &[u64],
    relative_values: &[f64],
    gold: &HashSet<DirectlyFollowsPair>,
    base_config: AlphaFrequenciesConfig,
    boundary_policy: &dyn BoundaryPolicy,
) -> Result<GridSearchReport, DiscoveryError> {
    let configs: Vec<AlphaFrequenciesConfig> = absolute_values
        .iter()
        .cartesian_product(relative_values.iter())
        .map(|(abs, rel)| AlphaFrequenciesConfig {
            absolute_threshold: *abs,
            relative_threshold: *rel,
            ..base_config
        })
        .collect();
    for config in &configs {
        config.validate()?;
    }
    log::info!("Running grid search over {} configurations", configs.len());

    let mut results: Vec<GridSearchEntry> = configs
        .par_iter()
        .map(|config| -> Result<GridSearchEntry, DiscoveryError> {
            let res = discover_workflow_net_with_policy(log, *config, boundary_policy)?;
            Ok(GridSearchEntry {
                absolute_threshold: config.absolute_threshold,
                relative_threshold: config.relative_threshold,
                metrics: evaluate_discovery(&res, gold),
            })
        })
        .collect::<Result<Vec<_>, DiscoveryError>>()?;
    results.sort_by_key(|r| Reverse(OrderedFloat(r.metrics.f1)));

    let best = results.first().cloned();
    if let Some(b) = &best {
        log::info!(
            "Best configuration: absolute threshold {}, relative threshold {}, F1 {:.3}",
            b.absolute_threshold,
            b.relative_threshold,
            b.metrics.f1
        );
    }
    Ok(GridSearchReport { results, best })
}
