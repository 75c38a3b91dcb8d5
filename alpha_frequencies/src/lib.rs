#![warn(
    clippy::doc_markdown,
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs
)]
#![doc = include_str!("../README.md")]

pub mod core;

pub mod discovery;

pub mod evaluation;

#[doc(inline)]
pub use crate::core::{Activity, EventLog, Trace, WorkflowNet};

#[doc(inline)]
pub use discovery::alpha_frequencies::{
    discover_workflow_net, discover_workflow_net_with_policy, AlphaFrequenciesConfig,
    AlphaFrequenciesResult, DiscoveryError,
};

#[doc(inline)]
pub use evaluation::{grid_search, RelationMetrics};

///
/// Serialize an [`AlphaFrequenciesResult`] as a JSON [`String`]
///
pub fn result_to_json(result: &AlphaFrequenciesResult) -> Result<String, serde_json::Error> {
    serde_json::to_string(result)
}

///
/// Import an [`EventLog`] from a JSON file given by a filepath
///
/// The file has to contain a list of cases, e.g. `[{"case_id": "1", "activities": ["a", "b"]}]`.
///
pub fn import_event_log_json_from_path<P: AsRef<std::path::Path>>(
    path: P,
) -> Result<EventLog, std::io::Error> {
    let reader = std::io::BufReader::new(std::fs::File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
