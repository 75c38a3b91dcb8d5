use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Activity label (e.g., `"register_request"`)
///
/// Activities are opaque tokens: only equality and hashing are relevant for discovery.
pub type Activity = String;

/// Ordered (and possibly repeating) sequence of [`Activity`]s executed for one case
pub type Trace = Vec<Activity>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A single case of an [`EventLog`]: case identifier and executed activities
pub struct Case {
    /// Unique case identifier
    pub case_id: String,
    /// Executed activities, in order
    pub activities: Trace,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Case>", into = "Vec<Case>")]
///
/// Event log as a mapping from case identifiers to [`Trace`]s
///
/// Case identifiers are unique: inserting a trace for an already present case replaces the old trace.
/// The insertion order of cases is retained (it is, e.g., used by
/// [`FirstTraceBoundary`](crate::discovery::alpha_frequencies::boundary::FirstTraceBoundary)),
/// but discovery results do not depend on it otherwise.
pub struct EventLog {
    cases: Vec<Case>,
    case_to_index: HashMap<String, usize>,
}

impl EventLog {
    /// Create a new, empty [`EventLog`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct an [`EventLog`] from a list of traces
    ///
    /// Cases are named `case_1`, `case_2`, ... in the order of the passed traces.
    pub fn from_traces<T, A>(traces: impl IntoIterator<Item = T>) -> Self
    where
        T: IntoIterator<Item = A>,
        A: Into<Activity>,
    {
        traces
            .into_iter()
            .enumerate()
            .map(|(i, t)| {
                (
                    format!("case_{}", i + 1),
                    t.into_iter().map(Into::into).collect::<Trace>(),
                )
            })
            .collect()
    }

    /// Insert the trace of a case
    ///
    /// Returns the previous trace if the case identifier was already present.
    pub fn insert_trace<S: Into<String>>(&mut self, case_id: S, activities: Trace) -> Option<Trace> {
        let case_id = case_id.into();
        if let Some(index) = self.case_to_index.get(&case_id) {
            return Some(std::mem::replace(
                &mut self.cases[*index].activities,
                activities,
            ));
        }
        self.case_to_index.insert(case_id.clone(), self.cases.len());
        self.cases.push(Case {
            case_id,
            activities,
        });
        None
    }

    /// Number of cases
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Whether the log contains no cases at all
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// All cases, in insertion order
    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    /// Iterate over the traces of all cases, in insertion order
    pub fn traces(&self) -> impl Iterator<Item = &Trace> + '_ {
        self.cases.iter().map(|c| &c.activities)
    }

    /// Get the trace of the case with the given identifier
    pub fn get_trace(&self, case_id: &str) -> Option<&Trace> {
        self.case_to_index
            .get(case_id)
            .map(|index| &self.cases[*index].activities)
    }

    /// The activity universe: all activities occurring in any trace
    pub fn activities(&self) -> BTreeSet<Activity> {
        self.traces().flatten().cloned().collect()
    }

    /// Activities starting a (non-empty) trace, with the number of traces they start
    pub fn start_activities(&self) -> HashMap<Activity, u64> {
        let mut ret: HashMap<Activity, u64> = HashMap::new();
        self.traces().filter_map(|t| t.first()).for_each(|act| {
            *ret.entry(act.clone()).or_default() += 1;
        });
        ret
    }

    /// Activities ending a (non-empty) trace, with the number of traces they end
    pub fn end_activities(&self) -> HashMap<Activity, u64> {
        let mut ret: HashMap<Activity, u64> = HashMap::new();
        self.traces().filter_map(|t| t.last()).for_each(|act| {
            *ret.entry(act.clone()).or_default() += 1;
        });
        ret
    }

    /// Copy of this log with all whitespace in activity labels replaced by `_`
    ///
    /// E.g., `"check ticket"` becomes `"check_ticket"`.
    pub fn normalized(&self) -> Self {
        self.cases
            .iter()
            .map(|c| {
                (
                    c.case_id.clone(),
                    c.activities
                        .iter()
                        .map(|act| normalize_activity_label(act))
                        .collect::<Trace>(),
                )
            })
            .collect()
    }
}

/// Replace every whitespace character of an activity label by `_`
pub fn normalize_activity_label(label: &str) -> Activity {
    label.replace(char::is_whitespace, "_")
}

impl<S: Into<String>> FromIterator<(S, Trace)> for EventLog {
    fn from_iter<I: IntoIterator<Item = (S, Trace)>>(iter: I) -> Self {
        let mut log = EventLog::new();
        for (case_id, trace) in iter {
            log.insert_trace(case_id, trace);
        }
        log
    }
}

impl From<Vec<Case>> for EventLog {
    fn from(cases: Vec<Case>) -> Self {
        cases
            .into_iter()
            .map(|c| (c.case_id, c.activities))
            .collect()
    }
}

impl From<EventLog> for Vec<Case> {
    fn from(log: EventLog) -> Self {
        log.cases
    }
}
