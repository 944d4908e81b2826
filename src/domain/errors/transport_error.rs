//! Remote transport error types.

use thiserror::Error;

/// Failures of the remote transport other than "not found".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum TransportError {
    #[error("request rejected, invalid or expired token")]
    Unauthorized,

    #[error("access denied: {message}")]
    Forbidden { message: String },

    #[error("rate limited by Discord, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    #[error("network error: {message}")]
    Network { message: String },

    #[error("failed to decode response: {message}")]
    Decode { message: String },

    #[error("unexpected response: {message}")]
    Unexpected { message: String },
}

impl TransportError {
    /// Creates forbidden error.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether retrying later could succeed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::RateLimited { .. })
    }
}

/// Outcome of a failed remote fetch.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    /// The platform confirmed the entity does not exist.
    #[error("entity not found")]
    NotFound,

    /// Any other failure; never treated as absence.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl RemoteError {
    /// Returns whether this is a confirmed absence.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}
