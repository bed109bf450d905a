//! Session handling: the process-wide auth cache and the login decision

pub mod cache;
pub mod login;

pub use cache::{build_cache_key, resolve_ttl, AuthCache, CacheKey, DEFAULT_AUTH_CACHE_TTL};
pub use login::ensure_authenticated;
