//! Error types for inventory fetches.

use gei_http::HttpError;
use thiserror::Error;

/// Inventory-specific errors.
#[derive(Debug, Error)]
pub enum SourceError {
    /// A required identifier was empty. Raised before any request is made.
    #[error("{0}")]
    InvalidInput(String),

    /// A base URL could not be used to build request URLs.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The offending URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The request failed after the retry policy gave up, or was terminal.
    #[error("failed to {context}: {source}")]
    Http {
        /// What was being fetched.
        context: String,
        /// The underlying HTTP failure.
        #[source]
        source: HttpError,
    },

    /// The response body was not the JSON we expected.
    #[error("failed to parse {context} response: {source}")]
    Parse {
        /// What was being parsed.
        context: String,
        /// The JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The operation does not apply to this server.
    #[error("{0}")]
    Unsupported(String),
}

impl SourceError {
    /// Create an empty-identifier error for `field`.
    pub fn empty(field: &str) -> Self {
        Self::InvalidInput(format!("{field} cannot be empty"))
    }

    /// Returns the HTTP status behind the failure, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { source, .. } => source.status(),
            _ => None,
        }
    }
}

/// Result type for inventory operations.
pub type Result<T> = std::result::Result<T, SourceError>;
