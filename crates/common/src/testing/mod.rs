//! Testing utilities and helpers
//!
//! - **[`time`]**: deterministic clock for TTL-driven logic

pub mod time;

pub use time::{Clock, MockClock, SystemClock};
