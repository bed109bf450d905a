//! Time utilities and abstractions
//!
//! Code that depends on "now" takes a [`Clock`] so tests can drive it with a
//! [`MockClock`] instead of sleeping.
//!
//! ```rust
//! use std::time::Duration;
//!
//! use picnic_common::time::{Clock, MockClock};
//!
//! let clock = MockClock::new();
//! let start = clock.now();
//! clock.advance(Duration::from_millis(11));
//! assert_eq!(clock.now().duration_since(start), Duration::from_millis(11));
//! ```

// Re-export Clock abstractions from testing module
pub use crate::testing::time::{Clock, MockClock, SystemClock};
