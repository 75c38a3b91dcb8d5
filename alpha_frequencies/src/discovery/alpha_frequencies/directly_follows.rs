//! Frequency extraction: absolute and relative directly-follows frequencies
use std::collections::HashMap;

use itertools::Itertools;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::core::event_data::{Activity, EventLog};

use super::error::DiscoveryError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Directly-follows pair `(source, target)` annotated with its frequencies
pub struct DirectlyFollowsEntry {
    /// Preceding activity
    pub source: Activity,
    /// Directly following activity
    pub target: Activity,
    /// Number of times `target` directly follows `source` in the whole log
    pub absolute_frequency: u64,
    /// [`DirectlyFollowsEntry::absolute_frequency`] divided by the number of times `source` is directly followed by any activity
    pub relative_frequency: f64,
}

impl DirectlyFollowsEntry {
    /// The `(source, target)` pair
    pub fn pair(&self) -> (Activity, Activity) {
        (self.source.clone(), self.target.clone())
    }
}

/// Directly-follows counts of (a part of) an event log
///
/// Counts of different traces are independent and combined using [`DirectlyFollowsCounts::merge`].
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectlyFollowsCounts {
    /// Number of occurrences per directly-follows pair
    #[serde_as(as = "Vec<(_, _)>")]
    pub pairs: HashMap<(Activity, Activity), u64>,
    /// Number of directly-follows occurrences per source activity
    pub outgoing: HashMap<Activity, u64>,
}

impl DirectlyFollowsCounts {
    /// Counts of a single trace
    pub fn from_trace(trace: &[Activity]) -> Self {
        let mut counts = Self::default();
        for (a, b) in trace.iter().tuple_windows() {
            *counts.pairs.entry((a.clone(), b.clone())).or_default() += 1;
            *counts.outgoing.entry(a.clone()).or_default() += 1;
        }
        counts
    }

    /// Counts of a whole event log
    ///
    /// Traces are counted in parallel and the partial counts are reduced afterwards.
    pub fn from_event_log(log: &EventLog) -> Self {
        log.cases()
            .par_iter()
            .map(|case| Self::from_trace(&case.activities))
            .reduce(Self::default, Self::merge)
    }

    /// Combine two counts by adding them up
    pub fn merge(self, other: Self) -> Self {
        let (mut larger, smaller) = if self.pairs.len() >= other.pairs.len() {
            (self, other)
        } else {
            (other, self)
        };
        for (k, v) in smaller.pairs {
            *larger.pairs.entry(k).or_default() += v;
        }
        for (k, v) in smaller.outgoing {
            *larger.outgoing.entry(k).or_default() += v;
        }
        larger
    }

    /// Frequencies of all counted directly-follows pairs, sorted by `(source, target)`
    pub fn to_entries(&self) -> Vec<DirectlyFollowsEntry> {
        self.pairs
            .iter()
            .filter_map(|((a, b), abs)| match self.outgoing.get(a) {
                Some(&total) if total > 0 => Some(DirectlyFollowsEntry {
                    source: a.clone(),
                    target: b.clone(),
                    absolute_frequency: *abs,
                    relative_frequency: *abs as f64 / total as f64,
                }),
                _ => None,
            })
            .sorted_by(|x, y| (&x.source, &x.target).cmp(&(&y.source, &y.target)))
            .collect()
    }
}

/// Compute the directly-follows frequencies of an event log
///
/// Returns one [`DirectlyFollowsEntry`] per distinct pair of adjacent activities, sorted by `(source, target)`.
/// Fails with [`DiscoveryError::EmptyLog`] if the log has no traces.
pub fn extract_directly_follows(
    log: &EventLog,
) -> Result<Vec<DirectlyFollowsEntry>, DiscoveryError> {
    if log.is_empty() {
        return Err(DiscoveryError::EmptyLog);
    }
    Ok(DirectlyFollowsCounts::from_event_log(log).to_entries())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry<'a>(entries: &'a [DirectlyFollowsEntry], a: &str, b: &str) -> &'a DirectlyFollowsEntry {
        entries
            .iter()
            .find(|e| e.source == a && e.target == b)
            .unwrap()
    }

    #[test]
    fn frequencies_of_two_traces() {
        let log = EventLog::from_traces(vec![vec!["a", "b", "c"], vec!["a", "c", "b"]]);
        let entries = extract_directly_follows(&log).unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entry(&entries, "a", "b").absolute_frequency, 1);
        assert_eq!(entry(&entries, "a", "b").relative_frequency, 0.5);
        assert_eq!(entry(&entries, "a", "c").relative_frequency, 0.5);
        assert_eq!(entry(&entries, "b", "c").relative_frequency, 1.0);
        assert_eq!(entry(&entries, "c", "b").relative_frequency, 1.0);
        assert_eq!(
            entries.iter().map(|e| e.pair()).collect::<Vec<_>>(),
            vec![
                ("a".to_string(), "b".to_string()),
                ("a".to_string(), "c".to_string()),
                ("b".to_string(), "c".to_string()),
                ("c".to_string(), "b".to_string()),
            ]
        );
    }

    #[test]
    fn frequency_conservation() {
        let traces = vec![
            vec!["a", "b", "b", "c"],
            vec!["a", "b", "d"],
            vec!["a", "d", "a", "b"],
            vec!["d"],
        ];
        let log = EventLog::from_traces(traces.clone());
        let entries = extract_directly_follows(&log).unwrap();
        for source in ["a", "b", "c", "d"] {
            let followed: u64 = traces
                .iter()
                .map(|t| t.windows(2).filter(|w| w[0] == source).count() as u64)
                .sum();
            let sum: u64 = entries
                .iter()
                .filter(|e| e.source == source)
                .map(|e| e.absolute_frequency)
                .sum();
            assert_eq!(sum, followed);
            let rel_sum: f64 = entries
                .iter()
                .filter(|e| e.source == source)
                .map(|e| e.relative_frequency)
                .sum();
            if followed > 0 {
                assert!((rel_sum - 1.0).abs() < 1e-9);
            }
        }
        assert!(entries
            .iter()
            .all(|e| (0.0..=1.0).contains(&e.relative_frequency)));
        assert_eq!(entry(&entries, "b", "b").absolute_frequency, 1);
        assert_eq!(entry(&entries, "a", "b").absolute_frequency, 3);
        assert_eq!(entry(&entries, "a", "d").absolute_frequency, 1);
        assert!((entry(&entries, "a", "b").relative_frequency - 3.0 / 4.0).abs() < 1e-9);
        assert!((entry(&entries, "a", "d").relative_frequency - 1.0 / 4.0).abs() < 1e-9);
    }

    #[test]
    fn empty_log_has_no_data() {
        assert!(matches!(
            extract_directly_follows(&EventLog::new()),
            Err(DiscoveryError::EmptyLog)
        ));
    }

    #[test]
    fn single_activity_traces() {
        let log = EventLog::from_traces(vec![vec!["a"], vec![]]);
        assert!(extract_directly_follows(&log).unwrap().is_empty());
    }

    #[test]
    fn merged_counts_match_sequential_counts() {
        let t1: Vec<Activity> = vec!["a".into(), "b".into(), "a".into()];
        let t2: Vec<Activity> = vec!["b".into(), "a".into()];
        let merged = DirectlyFollowsCounts::from_trace(&t1).merge(DirectlyFollowsCounts::from_trace(&t2));
        assert_eq!(merged.pairs.get(&("b".to_string(), "a".to_string())), Some(&2));
        assert_eq!(merged.outgoing.get("b"), Some(&2));
        assert_eq!(merged.outgoing.get("a"), Some(&1));

        let log = EventLog::from_traces(vec![t1, t2]);
        assert_eq!(DirectlyFollowsCounts::from_event_log(&log), merged);
        assert_eq!(
            extract_directly_follows(&log).unwrap(),
            extract_directly_follows(&log).unwrap()
        );
    }
}
