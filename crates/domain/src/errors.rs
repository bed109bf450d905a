//! Error types used throughout the node

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::CREDENTIALS_MISSING_MESSAGE;

/// Main error type for Picnic operations
///
/// `UnsupportedOperation`, `Authentication` and `RemoteOperation` render their
/// message verbatim: the host surfaces that text to the workflow author.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum PicnicError {
    #[error("{}", CREDENTIALS_MISSING_MESSAGE)]
    CredentialsMissing,

    #[error("{0}")]
    UnsupportedOperation(String),

    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    RemoteOperation(String),

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PicnicError {
    /// Shorthand for an [`PicnicError::InvalidParameter`] error.
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter { name: name.into(), reason: reason.into() }
    }

    /// Stable label suitable for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CredentialsMissing => "credentials_missing",
            Self::UnsupportedOperation(_) => "unsupported_operation",
            Self::Authentication(_) => "authentication",
            Self::RemoteOperation(_) => "remote_operation",
            Self::InvalidParameter { .. } => "invalid_parameter",
            Self::Config(_) => "config",
            Self::Network(_) => "network",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for Picnic operations
pub type Result<T> = std::result::Result<T, PicnicError>;
