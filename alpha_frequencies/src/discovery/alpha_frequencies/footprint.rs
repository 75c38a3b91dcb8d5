//! Footprint classification of accepted directly-follows pairs
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::event_data::Activity;

use super::significance::DirectlyFollowsPair;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Footprint relation between two activities
pub enum FootprintClass {
    /// Exactly one direction was accepted (or a self-loop was accepted)
    Causal,
    /// Both directions were accepted
    Concurrent,
    /// No direction was accepted
    Unrelated,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Partition of the accepted directly-follows pairs into causal and concurrent ones
pub struct Footprint {
    /// Pairs `(a,b)` with `a != b` for which `(b,a)` was also accepted
    pub concurrent: Vec<DirectlyFollowsPair>,
    /// All other accepted pairs (including self-loops `(a,a)`)
    pub causal: Vec<DirectlyFollowsPair>,
}

impl Footprint {
    /// Classify the accepted pairs
    ///
    /// Both output lists retain the relative order of `accepted`.
    pub fn classify(accepted: &[DirectlyFollowsPair]) -> Self {
        let accepted_set: HashSet<(&Activity, &Activity)> =
            accepted.iter().map(|(a, b)| (a, b)).collect();
        let (concurrent, causal): (Vec<DirectlyFollowsPair>, Vec<DirectlyFollowsPair>) = accepted
            .iter()
            .cloned()
            .partition(|(a, b)| a != b && accepted_set.contains(&(b, a)));
        Self { concurrent, causal }
    }

    /// Footprint relation between `a` and `b` (in any direction)
    pub fn class_of(&self, a: &str, b: &str) -> FootprintClass {
        let matches = |(x, y): &DirectlyFollowsPair| (x == a && y == b) || (x == b && y == a);
        if self.concurrent.iter().any(matches) {
            FootprintClass::Concurrent
        } else if self.causal.iter().any(matches) {
            FootprintClass::Causal
        } else {
            FootprintClass::Unrelated
        }
    }

    /// Whether `a` and `b` are concurrent
    pub fn are_concurrent(&self, a: &str, b: &str) -> bool {
        self.class_of(a, b) == FootprintClass::Concurrent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(p: &[(&str, &str)]) -> Vec<DirectlyFollowsPair> {
        p.iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    #[test]
    fn concurrent_and_causal() {
        let fp = Footprint::classify(&pairs(&[("a", "b"), ("a", "c"), ("b", "c"), ("c", "b")]));
        assert_eq!(fp.concurrent, pairs(&[("b", "c"), ("c", "b")]));
        assert_eq!(fp.causal, pairs(&[("a", "b"), ("a", "c")]));
        assert_eq!(fp.class_of("c", "b"), FootprintClass::Concurrent);
        assert_eq!(fp.class_of("b", "a"), FootprintClass::Causal);
        assert_eq!(fp.class_of("a", "d"), FootprintClass::Unrelated);
        assert!(fp.are_concurrent("b", "c"));
    }

    #[test]
    fn self_loops_stay_causal() {
        let fp = Footprint::classify(&pairs(&[("a", "a"), ("a", "b"), ("b", "b"), ("b", "a")]));
        assert_eq!(fp.causal, pairs(&[("a", "a"), ("b", "b")]));
        assert_eq!(fp.concurrent, pairs(&[("a", "b"), ("b", "a")]));
        assert_eq!(fp.class_of("a", "a"), FootprintClass::Causal);
        assert_eq!(fp.class_of("c", "c"), FootprintClass::Unrelated);
    }

    #[test]
    fn partition_is_disjoint_and_complete() {
        let accepted = pairs(&[
            ("a", "b"),
            ("b", "c"),
            ("c", "b"),
            ("c", "d"),
            ("d", "d"),
            ("d", "a"),
            ("a", "d"),
            ("b", "e"),
        ]);
        let fp = Footprint::classify(&accepted);
        assert!(fp.causal.iter().all(|p| !fp.concurrent.contains(p)));
        assert_eq!(fp.causal.len() + fp.concurrent.len(), accepted.len());
        assert!(accepted
            .iter()
            .all(|p| fp.causal.contains(p) || fp.concurrent.contains(p)));
        assert_eq!(fp.concurrent.len(), 4);
    }

    #[test]
    fn empty_accepted_set() {
        let fp = Footprint::classify(&[]);
        assert!(fp.causal.is_empty());
        assert!(fp.concurrent.is_empty());
    }
}
