use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::{
    core::event_data::Activity,
    discovery::alpha_frequencies::{significance::DirectlyFollowsPair, AlphaFrequenciesResult},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
/// Quality of a discovered relation compared to a gold standard relation
pub struct RelationMetrics {
    /// Share of discovered pairs which are in the gold standard
    pub precision: f64,
    /// Share of gold standard pairs which were discovered
    pub recall: f64,
    /// Harmonic mean of precision and recall
    pub f1: f64,
    /// Discovered pairs in the gold standard
    pub true_positives: usize,
    /// Discovered pairs not in the gold standard
    pub false_positives: usize,
    /// Gold standard pairs not discovered
    pub false_negatives: usize,
    /// Pairs of distinct activities neither discovered nor in the gold standard
    pub true_negatives: usize,
}

fn ratio(num: usize, denom: usize) -> f64 {
    if denom == 0 {
        0.0
    } else {
        num as f64 / denom as f64
    }
}

impl RelationMetrics {
    /// Compare a discovered relation against a gold standard relation
    ///
    /// The activities considered are all activities occurring in either relation.
    /// Ratios with a zero denominator are `0`.
    pub fn compute(
        discovered: &HashSet<DirectlyFollowsPair>,
        gold: &HashSet<DirectlyFollowsPair>,
    ) -> Self {
        let activities: BTreeSet<&Activity> = discovered
            .iter()
            .chain(gold.iter())
            .flat_map(|(a, b)| [a, b])
            .collect();
        let true_positives = discovered.intersection(gold).count();
        let false_positives = discovered.difference(gold).count();
        let false_negatives = gold.difference(discovered).count();
        let distinct_pairs = activities.len() * activities.len().saturating_sub(1);
        let known_distinct_pairs = discovered
            .union(gold)
            .filter(|(a, b)| a != b)
            .count();
        let true_negatives = distinct_pairs - known_distinct_pairs;

        let precision = ratio(true_positives, true_positives + false_positives);
        let recall = ratio(true_positives, true_positives + false_negatives);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        Self {
            precision,
            recall,
            f1,
            true_positives,
            false_positives,
            false_negatives,
            true_negatives,
        }
    }
}

/// Compare the accepted directly-follows pairs of a discovery run against a gold standard relation
pub fn evaluate_discovery(
    result: &AlphaFrequenciesResult,
    gold: &HashSet<DirectlyFollowsPair>,
) -> RelationMetrics {
    let discovered: HashSet<DirectlyFollowsPair> = result.accepted.iter().cloned().collect();
    RelationMetrics::compute(&discovered, gold)
}
