//! Core modules: event data and process models
pub mod event_data;

pub mod process_models;

pub use event_data::{Activity, EventLog, Trace};
pub use process_models::workflow_net::WorkflowNet;
