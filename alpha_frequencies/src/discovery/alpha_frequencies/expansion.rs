//! Expansion of causal pairs into groupings (source set, target set)
//!
//! Causal pairs sharing their source (or target) activity are merged into one grouping.
//! Merges are only built starting from a single shared activity: groupings which would
//! require combining several multi-activity sets without a common pivot are not found.
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::event_data::Activity;

use super::{
    config::{MergeGuard, PlaceSelection},
    significance::DirectlyFollowsPair,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
/// Causal relation between a set of source activities and a set of target activities
///
/// Every source activity causally precedes every target activity.
/// Each grouping yields (at most) one place in the discovered net.
pub struct Grouping {
    /// Activities producing into the place
    pub sources: BTreeSet<Activity>,
    /// Activities consuming from the place
    pub targets: BTreeSet<Activity>,
}

impl Grouping {
    /// Create a new grouping
    pub fn new<A: Into<Activity>>(
        sources: impl IntoIterator<Item = A>,
        targets: impl IntoIterator<Item = A>,
    ) -> Self {
        Self {
            sources: sources.into_iter().map(Into::into).collect(),
            targets: targets.into_iter().map(Into::into).collect(),
        }
    }

    /// Grouping of a single causal pair `(a, b)`
    pub fn from_pair((a, b): &DirectlyFollowsPair) -> Self {
        Self::new([a.clone()], [b.clone()])
    }

    /// Whether this grouping is strictly contained in `other` (componentwise)
    pub fn is_subsumed_by(&self, other: &Grouping) -> bool {
        self != other
            && self.sources.is_subset(&other.sources)
            && self.targets.is_subset(&other.targets)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Result of expanding causal pairs
pub struct Expansion {
    /// All groupings: the causal pairs followed by the merged groupings
    pub groupings: Vec<Grouping>,
    /// Groupings which become places (see [`PlaceSelection`])
    pub place_groupings: Vec<Grouping>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MergeDirection {
    /// Merge pairs `(a,b1), (a,b2), ...` into `({a}, {b1,b2,...})`
    SharedSource,
    /// Merge pairs `(a1,b), (a2,b), ...` into `({a1,a2,...}, {b})`
    SharedTarget,
}

impl MergeDirection {
    /// (anchor, companion) of a pair
    fn split(self, (a, b): &DirectlyFollowsPair) -> (&Activity, &Activity) {
        match self {
            MergeDirection::SharedSource => (a, b),
            MergeDirection::SharedTarget => (b, a),
        }
    }
}

fn merge_allowed(
    companions: &BTreeSet<Activity>,
    concurrent: &[DirectlyFollowsPair],
    merge_guard: MergeGuard,
) -> bool {
    match merge_guard {
        MergeGuard::Permissive => true,
        MergeGuard::ConcurrentPair => !concurrent.iter().any(|(x, y)| {
            companions.len() == 2 && companions.contains(x) && companions.contains(y)
        }),
    }
}

fn merged_groupings(
    causal: &[DirectlyFollowsPair],
    concurrent: &[DirectlyFollowsPair],
    direction: MergeDirection,
    merge_guard: MergeGuard,
) -> Vec<Grouping> {
    (0..causal.len())
        .filter_map(|i| {
            let (anchor, _) = direction.split(&causal[i]);
            let companions: BTreeSet<Activity> = causal[i..]
                .iter()
                .map(|pair| direction.split(pair))
                .filter(|(other_anchor, _)| *other_anchor == anchor)
                .map(|(_, companion)| companion.clone())
                .collect();
            if companions.len() <= 1 || !merge_allowed(&companions, concurrent, merge_guard) {
                return None;
            }
            let anchor = BTreeSet::from([anchor.clone()]);
            Some(match direction {
                MergeDirection::SharedSource => Grouping {
                    sources: anchor,
                    targets: companions,
                },
                MergeDirection::SharedTarget => Grouping {
                    sources: companions,
                    targets: anchor,
                },
            })
        })
        .collect()
}

/// Only keep groupings which are not subsumed by any other grouping (and drop duplicates)
pub fn maximal_groupings(groupings: &[Grouping]) -> Vec<Grouping> {
    let mut ret: Vec<Grouping> = Vec::new();
    for g in groupings {
        if ret.contains(g) || groupings.iter().any(|other| g.is_subsumed_by(other)) {
            continue;
        }
        ret.push(g.clone());
    }
    ret
}

/// Expand causal pairs into groupings
///
/// For both merge directions (shared source, then shared target) and every causal pair as anchor,
/// the companion activities of the anchor and all later causal pairs with the same anchor activity are collected.
/// If there is more than one and the `merge_guard` allows it, they form a new grouping with the anchor activity.
/// The new groupings are appended to the groupings of the causal pairs.
pub fn expand_groupings(
    causal: &[DirectlyFollowsPair],
    concurrent: &[DirectlyFollowsPair],
    merge_guard: MergeGuard,
    place_selection: PlaceSelection,
) -> Expansion {
    let mut groupings: Vec<Grouping> = causal.iter().map(Grouping::from_pair).collect();
    for direction in [MergeDirection::SharedSource, MergeDirection::SharedTarget] {
        groupings.extend(merged_groupings(causal, concurrent, direction, merge_guard));
    }
    let place_groupings = match place_selection {
        PlaceSelection::AllGroupings => groupings.clone(),
        PlaceSelection::Maximal => maximal_groupings(&groupings),
    };
    Expansion {
        groupings,
        place_groupings,
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
    fn merge_shared_source() {
        let causal = pairs(&[("a", "b"), ("a", "c")]);
        let concurrent = pairs(&[("b", "c"), ("c", "b")]);
        let exp = expand_groupings(
            &causal,
            &concurrent,
            MergeGuard::Permissive,
            PlaceSelection::AllGroupings,
        );
        assert_eq!(
            exp.groupings,
            vec![
                Grouping::new(["a"], ["b"]),
                Grouping::new(["a"], ["c"]),
                Grouping::new(["a"], ["b", "c"]),
            ]
        );
        assert_eq!(exp.place_groupings, exp.groupings);
    }

    #[test]
    fn merge_shared_target() {
        let causal = pairs(&[("a", "c"), ("b", "c"), ("c", "d")]);
        let exp = expand_groupings(&causal, &[], MergeGuard::Permissive, PlaceSelection::AllGroupings);
        assert_eq!(exp.groupings.len(), 4);
        assert_eq!(exp.groupings[3], Grouping::new(["a", "b"], ["c"]));
    }

    #[test]
    fn merges_start_at_every_anchor() {
        let causal = pairs(&[("a", "b"), ("a", "c"), ("a", "d")]);
        let exp = expand_groupings(&causal, &[], MergeGuard::Permissive, PlaceSelection::AllGroupings);
        assert_eq!(
            exp.groupings[3..].to_vec(),
            vec![
                Grouping::new(["a"], ["b", "c", "d"]),
                Grouping::new(["a"], ["c", "d"]),
            ]
        );
    }

    #[test]
    fn concurrent_pair_guard() {
        let causal = pairs(&[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")]);
        let concurrent = pairs(&[("b", "c"), ("c", "b")]);
        let guarded = expand_groupings(
            &causal,
            &concurrent,
            MergeGuard::ConcurrentPair,
            PlaceSelection::AllGroupings,
        );
        assert_eq!(guarded.groupings.len(), 4);
        let permissive = expand_groupings(
            &causal,
            &concurrent,
            MergeGuard::Permissive,
            PlaceSelection::AllGroupings,
        );
        assert_eq!(permissive.groupings.len(), 6);
        assert!(permissive
            .groupings
            .contains(&Grouping::new(["b", "c"], ["d"])));
    }

    #[test]
    fn maximal_place_selection() {
        let causal = pairs(&[("a", "b"), ("a", "c"), ("a", "d"), ("e", "f")]);
        let exp = expand_groupings(&causal, &[], MergeGuard::Permissive, PlaceSelection::Maximal);
        assert_eq!(exp.groupings.len(), 6);
        assert_eq!(
            exp.place_groupings,
            vec![
                Grouping::new(["e"], ["f"]),
                Grouping::new(["a"], ["b", "c", "d"]),
            ]
        );
    }

    #[test]
    fn no_causal_pairs() {
        let exp = expand_groupings(&[], &[], MergeGuard::Permissive, PlaceSelection::Maximal);
        assert!(exp.groupings.is_empty());
        assert!(exp.place_groupings.is_empty());
    }
}
