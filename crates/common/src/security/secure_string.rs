//! Secure string type with automatic memory zeroization
//!
//! Session tokens and passwords are held in a [`SecureString`] so they are
//! wiped on drop and never printed by `Debug`/`Display`.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// String that zeroes its memory on drop and redacts itself when formatted
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecureString {
    inner: String,
}

impl SecureString {
    pub fn new(s: impl Into<String>) -> Self {
        Self { inner: s.into() }
    }

    /// Expose the inner value
    ///
    /// The exposed value should not be stored or logged.
    pub fn expose(&self) -> &str {
        &self.inner
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Trimmed copy, or `None` when only whitespace remains.
    pub fn trimmed(&self) -> Option<Self> {
        let trimmed = self.inner.trim();
        (!trimmed.is_empty()).then(|| Self::new(trimmed))
    }
}

impl From<String> for SecureString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SecureString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecureString(***)")
    }
}

impl fmt::Display for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***")
    }
}
