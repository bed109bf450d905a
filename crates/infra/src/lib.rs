//! # Picnic Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The shared HTTP transport with retry and backoff
//! - The Picnic storefront binding of the client port
//! - Configuration loading (environment, JSON/TOML files, cache TTL)
//!
//! ## Architecture
//! - Implements traits defined in `picnic-core`
//! - Contains all "impure" code (network, environment, files)

pub mod config;
pub mod errors;
pub mod http;
pub mod picnic;

// Re-export commonly used items
pub use config::EnvCacheTtl;
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use picnic::{PicnicHttpClient, PicnicHttpClientFactory, StaticCredentialsProvider};
