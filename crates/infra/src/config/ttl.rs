//! Session cache TTL read from the environment

use std::time::Duration;

use picnic_core::{resolve_ttl, CacheTtlSource};
use picnic_domain::constants::AUTH_CACHE_TTL_ENV;

/// Reads `PICNIC_AUTH_CACHE_TTL_MS` on every cache write
///
/// Invalid or absent values resolve to the 6 hour default.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCacheTtl;

impl CacheTtlSource for EnvCacheTtl {
    fn ttl(&self) -> Duration {
        let raw = std::env::var(AUTH_CACHE_TTL_ENV).ok();
        resolve_ttl(raw.as_deref())
    }
}
