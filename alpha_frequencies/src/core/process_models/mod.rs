//! Process Models
pub mod workflow_net;
