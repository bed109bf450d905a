//! # Picnic Domain
//!
//! Business domain types for the Picnic node.
//!
//! This crate contains:
//! - Credential and operation types exchanged with the host
//! - Domain error types and Result definitions
//! - Domain constants (defaults, env keys, message contracts)
//!
//! ## Architecture
//! - No dependencies on other workspace crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
