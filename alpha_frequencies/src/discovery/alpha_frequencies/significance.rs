use crate::core::event_data::Activity;

use super::directly_follows::DirectlyFollowsEntry;

/// Directly-follows pair `(source, target)`
pub type DirectlyFollowsPair = (Activity, Activity);

/// Keep the directly-follows pairs meeting both the absolute and the relative threshold
///
/// The order of `entries` is retained.
pub fn filter_by_frequency(
    entries: &[DirectlyFollowsEntry],
    absolute_threshold: u64,
    relative_threshold: f64,
) -> Vec<DirectlyFollowsPair> {
    entries
        .iter()
        .filter(|e| {
            e.absolute_frequency >= absolute_threshold
                && e.relative_frequency >= relative_threshold
        })
        .map(DirectlyFollowsEntry::pair)
        .collect()
}
