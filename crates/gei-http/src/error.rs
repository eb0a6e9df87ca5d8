//! Error types for HTTP operations.

use thiserror::Error;

use crate::resilience::{RetryError, Transient};

/// HTTP status codes that are worth another attempt.
pub const RETRYABLE_STATUS_CODES: [u16; 6] = [408, 429, 500, 502, 503, 504];

/// Checks if an HTTP status code should trigger a retry.
pub fn is_retryable_status(status: u16) -> bool {
    RETRYABLE_STATUS_CODES.contains(&status)
}

/// Errors that can occur while talking to a source API.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The request could not be sent or the response body could not be read.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The caller's cancellation signal or deadline fired.
    #[error("request cancelled")]
    Cancelled,

    /// Every attempt failed with a transient error.
    #[error("retry failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        /// Number of attempts made.
        attempts: u32,
        /// The last observed failure.
        #[source]
        source: Box<HttpError>,
    },

    /// The underlying client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl HttpError {
    /// Returns the HTTP status of the failure, looking through retry wrappers.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::RetriesExhausted { source, .. } => source.status(),
            _ => None,
        }
    }
}

impl Transient for HttpError {
    fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status { status, .. } => is_retryable_status(*status),
            Self::Cancelled | Self::RetriesExhausted { .. } | Self::Client(_) => false,
        }
    }
}

impl From<RetryError<HttpError>> for HttpError {
    fn from(err: RetryError<HttpError>) -> Self {
        match err {
            RetryError::Cancelled => Self::Cancelled,
            RetryError::Exhausted { attempts, source } => Self::RetriesExhausted {
                attempts,
                source: Box::new(source),
            },
            RetryError::Rejected(source) => source,
        }
    }
}

/// Result type for HTTP operations.
pub type Result<T> = std::result::Result<T, HttpError>;
