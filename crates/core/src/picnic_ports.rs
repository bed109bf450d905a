//! Picnic integration port interfaces
//!
//! The remote client library is an external collaborator. These traits are
//! the contract the dispatcher relies on; infra supplies the HTTP binding and
//! tests supply in-memory doubles.

use std::time::Duration;

use async_trait::async_trait;
use picnic_domain::{impl_domain_code_conversions, CountryCode, PicnicCredentials, Result};
use serde_json::Value;

/// Remote method names exposed by the client, across interface versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteMethod {
    Search,
    GetShoppingCart,
    GetCart,
    AddProductToShoppingCart,
    ClearShoppingCart,
    ClearCart,
    GetDeliveries,
    GetUserDetails,
}

impl_domain_code_conversions!(RemoteMethod {
    Search => "search",
    GetShoppingCart => "getShoppingCart",
    GetCart => "getCart",
    AddProductToShoppingCart => "addProductToShoppingCart",
    ClearShoppingCart => "clearShoppingCart",
    ClearCart => "clearCart",
    GetDeliveries => "getDeliveries",
    GetUserDetails => "getUserDetails",
});

/// Options a client handle is constructed with
#[derive(Clone, PartialEq, Eq)]
pub struct ClientOptions {
    pub country_code: CountryCode,
    pub api_version: String,
    pub auth_key: Option<String>,
}

impl ClientOptions {
    /// Options for the deployment named by `credentials`, seeded with
    /// `auth_key` when one is available.
    pub fn from_credentials(credentials: &PicnicCredentials, auth_key: Option<String>) -> Self {
        Self {
            country_code: credentials.country_code,
            api_version: credentials.api_version().to_string(),
            auth_key,
        }
    }
}

impl std::fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientOptions")
            .field("country_code", &self.country_code)
            .field("api_version", &self.api_version)
            .field("auth_key", &self.auth_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Login exchange of a client handle
#[async_trait]
pub trait PicnicLogin: Send + Sync {
    /// Exchange identifier + secret for a session token.
    ///
    /// On success the handle holds the new token internally.
    async fn login(&mut self, user_id: &str, password: &str) -> Result<()>;
}

/// Connected client handle
#[async_trait]
pub trait PicnicClient: PicnicLogin {
    /// Session token currently held by the handle, untrimmed.
    fn auth_key(&self) -> Option<String>;

    /// Whether `method` is callable on this handle.
    fn supports(&self, method: RemoteMethod) -> bool;

    /// Names of every callable method, for diagnostics.
    fn available_methods(&self) -> Vec<String> {
        RemoteMethod::ALL
            .iter()
            .filter(|method| self.supports(**method))
            .map(|method| method.as_str().to_string())
            .collect()
    }

    /// Invoke `method` with positional `args`.
    async fn invoke(&self, method: RemoteMethod, args: &[Value]) -> Result<Value>;
}

/// Constructs client handles
pub trait ClientFactory: Send + Sync {
    fn create(&self, options: &ClientOptions) -> Result<Box<dyn PicnicClient>>;
}

/// Resolves the credentials record for an item
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    async fn credentials(&self, item_index: usize) -> Result<PicnicCredentials>;
}

/// Time-to-live applied to each session cache write
///
/// Read once per write so configuration changes apply to the next login.
pub trait CacheTtlSource: Send + Sync {
    fn ttl(&self) -> Duration;
}

impl CacheTtlSource for Duration {
    fn ttl(&self) -> Duration {
        *self
    }
}
