//! Credential types resolved by the host for every item

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::DEFAULT_API_VERSION;
use crate::impl_domain_code_conversions;

/// Country-specific Picnic deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CountryCode {
    #[default]
    Nl,
    De,
    Fr,
}

impl_domain_code_conversions!(CountryCode {
    Nl => "NL",
    De => "DE",
    Fr => "FR",
});

impl Serialize for CountryCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CountryCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Credentials record for one item
///
/// Either `auth_key` or the `user_id` + `password` pair must be usable for
/// authentication to succeed. Values are kept as supplied; the accessors
/// apply the normalisation rules (trimming, defaults).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PicnicCredentials {
    #[serde(default)]
    pub country_code: CountryCode,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

impl Default for PicnicCredentials {
    fn default() -> Self {
        Self::new(CountryCode::default(), DEFAULT_API_VERSION)
    }
}

impl PicnicCredentials {
    /// Credentials for a deployment with no authentication material yet.
    pub fn new(country_code: CountryCode, api_version: impl Into<String>) -> Self {
        Self {
            country_code,
            api_version: api_version.into(),
            auth_key: None,
            user_id: None,
            password: None,
        }
    }

    /// Attach an explicit session token.
    pub fn with_auth_key(mut self, auth_key: impl Into<String>) -> Self {
        self.auth_key = Some(auth_key.into());
        self
    }

    /// Attach an identifier + secret pair used for the login exchange.
    pub fn with_login(mut self, user_id: impl Into<String>, password: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self.password = Some(password.into());
        self
    }

    /// API version, falling back to the default when blank.
    pub fn api_version(&self) -> &str {
        let trimmed = self.api_version.trim();
        if trimmed.is_empty() {
            DEFAULT_API_VERSION
        } else {
            trimmed
        }
    }

    /// Explicitly configured session token, trimmed; `None` when blank.
    pub fn configured_auth_key(&self) -> Option<&str> {
        self.auth_key.as_deref().map(str::trim).filter(|key| !key.is_empty())
    }

    /// Trimmed user identifier, empty when absent.
    pub fn user_id(&self) -> &str {
        self.user_id.as_deref().map_or("", str::trim)
    }

    /// Secret exactly as supplied, empty when absent.
    pub fn password(&self) -> &str {
        self.password.as_deref().unwrap_or_default()
    }

    /// True when both identifier and secret are non-empty.
    pub fn has_login_pair(&self) -> bool {
        !self.user_id().is_empty() && !self.password().is_empty()
    }
}

impl fmt::Debug for PicnicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PicnicCredentials")
            .field("country_code", &self.country_code)
            .field("api_version", &self.api_version)
            .field("auth_key", &self.auth_key.as_ref().map(|_| "[REDACTED]"))
            .field("user_id", &self.user_id)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
