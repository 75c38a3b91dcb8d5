//! Workflow nets
pub(crate) mod workflow_net_struct;
pub use workflow_net_struct::*;
