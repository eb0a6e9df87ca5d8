//! # GEI HTTP
//!
//! The request layer shared by every source inventory fetcher.
//!
//! - [`RetryPolicy`] runs an operation under a bounded number of attempts with
//!   exponential backoff, and stops as soon as its [`Cancellation`] fires.
//! - [`HttpClient`] performs GET requests through the policy, classifying the
//!   HTTP status of each attempt so that only transient failures are retried.
//!
//! ## Example
//!
//! ```rust,ignore
//! use gei_http::{HttpClient, HttpConfig};
//!
//! let client = HttpClient::new(HttpConfig::default())?;
//! let body = client.get("https://api.github.com/meta", &[]).await?;
//! ```

pub mod client;
pub mod error;
pub mod resilience;

pub use client::{HttpClient, HttpConfig};
pub use error::{is_retryable_status, HttpError, Result, RETRYABLE_STATUS_CODES};
pub use resilience::{Cancellation, RetryError, RetryPolicy, Transient};

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("gei/", env!("CARGO_PKG_VERSION"));
