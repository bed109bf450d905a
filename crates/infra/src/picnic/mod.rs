//! Picnic storefront integration
//!
//! HTTP binding of the core client port plus the credential source used by
//! the batch runner.

pub mod client;
pub mod credentials;

pub use client::{storefront_url, PicnicHttpClient, PicnicHttpClientFactory};
pub use credentials::StaticCredentialsProvider;
