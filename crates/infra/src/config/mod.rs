//! Configuration loading and management
//!
//! This module provides utilities for loading node configuration from
//! environment variables and files, plus the environment-backed cache TTL.

pub mod loader;
pub mod ttl;

// Re-export commonly used items
pub use loader::{load, load_from_env, load_from_file, probe_config_paths};
pub use ttl::EnvCacheTtl;
