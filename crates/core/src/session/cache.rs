//! Session token cache with TTL expiry
//!
//! Maps a normalised identity (user, country, API version) to the session
//! token obtained by the last successful login, so consecutive items and
//! batches skip redundant logins.
//!
//! # Lifecycle
//!
//! One [`AuthCache`] is created per process and shared by every dispatcher
//! through an `Arc`. It is never torn down: entries expire lazily, on the
//! first [`AuthCache::get`] at or after their deadline. There is no size
//! bound; the key space is the set of distinct identities in use.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use picnic_core::session::{build_cache_key, AuthCache};
//!
//! let cache = AuthCache::new(Arc::new(Duration::from_secs(60)));
//! let key = build_cache_key("john@example.com", "NL", "15");
//!
//! cache.set(&key, "token-123");
//! assert_eq!(cache.get(&key).as_deref(), Some("token-123"));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use picnic_common::time::{Clock, SystemClock};
use picnic_common::SecureString;
use picnic_domain::constants::{CACHE_KEY_DELIMITER, DEFAULT_AUTH_CACHE_TTL_MS};

use crate::picnic_ports::CacheTtlSource;

/// Default TTL for cached session tokens (6 hours)
pub const DEFAULT_AUTH_CACHE_TTL: Duration = Duration::from_millis(DEFAULT_AUTH_CACHE_TTL_MS);

/// Normalised identity key
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CacheKey").field(&self.0).finish()
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build the cache key for an identity
///
/// The user identifier is lower-cased and the country code upper-cased so
/// that differently-cased inputs for the same identity share one entry.
pub fn build_cache_key(user_id: &str, country_code: &str, api_version: &str) -> CacheKey {
    CacheKey(format!(
        "{}{delim}{}{delim}{}",
        user_id.to_lowercase(),
        country_code.to_uppercase(),
        api_version,
        delim = CACHE_KEY_DELIMITER,
    ))
}

/// Resolve a TTL override expressed in milliseconds
///
/// Only the leading integer is read, so `"10ms"` means 10 ms and `"1.5"`
/// means 1 ms. Absent, blank, non-numeric and non-positive values fall back
/// to [`DEFAULT_AUTH_CACHE_TTL`].
pub fn resolve_ttl(raw_millis: Option<&str>) -> Duration {
    raw_millis
        .and_then(leading_integer)
        .and_then(|millis| u64::try_from(millis).ok())
        .filter(|millis| *millis > 0)
        .map_or(DEFAULT_AUTH_CACHE_TTL, Duration::from_millis)
}

fn leading_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let (negative, rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let digits_end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let magnitude = rest[..digits_end].parse::<i64>().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

struct CacheEntry {
    auth_key: SecureString,
    expires_at: Instant,
}

/// In-memory session token cache
///
/// Generic over [`Clock`] so expiry can be tested with `MockClock`.
pub struct AuthCache<C: Clock = SystemClock> {
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
    ttl_source: Arc<dyn CacheTtlSource>,
    clock: C,
}

impl AuthCache<SystemClock> {
    /// Create a cache on the system clock
    pub fn new(ttl_source: Arc<dyn CacheTtlSource>) -> Self {
        Self::with_clock(ttl_source, SystemClock)
    }
}

impl Default for AuthCache<SystemClock> {
    fn default() -> Self {
        Self::new(Arc::new(DEFAULT_AUTH_CACHE_TTL))
    }
}

impl<C: Clock> AuthCache<C> {
    /// Create a cache with a custom clock (for testing)
    pub fn with_clock(ttl_source: Arc<dyn CacheTtlSource>, clock: C) -> Self {
        Self { entries: Mutex::new(HashMap::new()), ttl_source, clock }
    }

    /// Cached token for `key`, evicting it if it has expired
    pub fn get(&self, key: &CacheKey) -> Option<String> {
        let mut entries = self.entries.lock();
        let entry = entries.get(key)?;

        if self.clock.now() >= entry.expires_at {
            entries.remove(key);
            tracing::debug!("auth_cache_entry_expired");
            return None;
        }

        tracing::trace!("auth_cache_hit");
        Some(entry.auth_key.expose().to_string())
    }

    /// Insert or overwrite the token for `key`
    ///
    /// The TTL is read from the configured source at every write.
    pub fn set(&self, key: &CacheKey, auth_key: impl Into<String>) {
        let ttl = self.ttl_source.ttl();
        let entry = CacheEntry {
            auth_key: SecureString::new(auth_key.into()),
            expires_at: self.clock.now() + ttl,
        };
        self.entries.lock().insert(key.clone(), entry);
        tracing::debug!(ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX), "auth_cache_entry_stored");
    }

    /// Remove the entry for `key`; no-op when absent
    pub fn clear(&self, key: &CacheKey) {
        if self.entries.lock().remove(key).is_some() {
            tracing::debug!("auth_cache_entry_cleared");
        }
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
