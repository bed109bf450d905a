//! Domain constants
//!
//! Centralized location for defaults and message contracts shared by every
//! layer of the node.

// Credential defaults
pub const DEFAULT_COUNTRY_CODE: &str = "NL";
pub const DEFAULT_API_VERSION: &str = "15";

// Session cache
pub const DEFAULT_AUTH_CACHE_TTL_MS: u64 = 6 * 60 * 60 * 1000; // 6 hours
pub const AUTH_CACHE_TTL_ENV: &str = "PICNIC_AUTH_CACHE_TTL_MS";
pub const CACHE_KEY_DELIMITER: char = '|';

// Message contracts surfaced to the host
pub const CREDENTIALS_MISSING_MESSAGE: &str = "Provide either authKey or email + password.";
pub const UNSUPPORTED_CLIENT_PREFIX: &str = "Unsupported picnic-api client for";

// Substrings that mark a remote failure as authentication-shaped
pub const AUTH_ERROR_MARKERS: [&str; 5] = ["unauthorized", "forbidden", "401", "403", "auth"];
