//! # Picnic Node
//!
//! Application layer - batch runner and main entry point.
//!
//! This crate contains:
//! - Application context (dependency injection)
//! - Batch parsing and execution
//! - Logging setup
//!
//! ## Architecture
//! - Depends on `common`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod context;
pub mod runner;
pub mod utils;

// Re-export for convenience
pub use context::*;
pub use runner::{parse_batch, run_batch, RunError};
