//! # Picnic Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces for the remote client, credentials and cache TTL
//! - The session cache and the authenticator
//! - Method resolution across client interface versions
//! - The per-item operation dispatcher
//!
//! ## Architecture Principles
//! - Only depends on `picnic-common` and `picnic-domain`
//! - No HTTP or environment access
//! - All external dependencies via traits

pub mod dispatch;
pub mod picnic_ports;
pub mod session;

pub use dispatch::{
    call_method, candidate_methods, is_likely_auth_error, NodeOperationError, OperationCall,
    OperationDispatcher,
};
pub use picnic_ports::{
    CacheTtlSource, ClientFactory, ClientOptions, CredentialsProvider, PicnicClient, PicnicLogin,
    RemoteMethod,
};
pub use session::{build_cache_key, ensure_authenticated, resolve_ttl, AuthCache, CacheKey};
