//! Per-item operation dispatch

pub mod call;
pub mod methods;
pub mod service;

pub use call::OperationCall;
pub use methods::{call_method, candidate_methods};
pub use service::{is_likely_auth_error, NodeOperationError, OperationDispatcher};
