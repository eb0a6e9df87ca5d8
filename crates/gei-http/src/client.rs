//! HTTP client for source platform APIs.

use std::time::Duration;

use bytes::Bytes;
use reqwest::Client;

use crate::error::{HttpError, Result};
use crate::resilience::{Cancellation, RetryPolicy};
use crate::USER_AGENT;

/// Configuration for the HTTP client.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Timeout for a single request attempt.
    pub timeout: Duration,
    /// Skip TLS certificate verification (GHES with self-signed certificates).
    pub no_ssl_verify: bool,
    /// Retry policy applied to every request.
    pub retry: RetryPolicy,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            no_ssl_verify: false,
            retry: RetryPolicy::default(),
        }
    }
}

/// HTTP client that retries transient failures.
///
/// Each attempt is one GET; the status of the response is classified inside
/// the attempt, so a 404 is returned straight away while a 503 is retried.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    retry: RetryPolicy,
    cancel: Cancellation,
}

impl HttpClient {
    /// Create a new client.
    pub fn new(config: HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.no_ssl_verify)
            .build()
            .map_err(|e| HttpError::Client(e.to_string()))?;

        Ok(Self {
            client,
            retry: config.retry,
            cancel: Cancellation::new(),
        })
    }

    /// Attach a cancellation signal observed by every request.
    pub fn with_cancellation(mut self, cancel: Cancellation) -> Self {
        self.cancel = cancel;
        self
    }

    /// Returns the retry policy in use.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Perform a GET request, returning the body of the first 2xx response.
    ///
    /// Headers are sent in the order given.
    pub async fn get(&self, url: &str, headers: &[(&str, String)]) -> Result<Bytes> {
        let client = &self.client;

        self.retry
            .execute(&self.cancel, move || get_once(client, url, headers))
            .await
            .map_err(HttpError::from)
    }
}

async fn get_once(client: &Client, url: &str, headers: &[(&str, String)]) -> Result<Bytes> {
    let mut request = client.get(url);
    for (name, value) in headers {
        request = request.header(*name, value);
    }

    tracing::debug!(url = %url, "HTTP GET");

    let response = request.send().await?;
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        return Err(HttpError::Status {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&body).into_owned(),
        });
    }

    Ok(body)
}
