//! Domain types and models

pub mod config;
pub mod credentials;
pub mod operation;
pub mod output;

pub use config::NodeConfig;
pub use credentials::{CountryCode, PicnicCredentials};
pub use operation::{Operation, OperationRequest, ParamValue};
pub use output::{FailurePolicy, ItemOutcome, NodeExecutionItem, OperationResult, PairedItem};
