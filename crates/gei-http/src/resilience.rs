//! # Resilience
//!
//! Bounded retry with exponential backoff, and the cancellation signal that
//! cuts it short.
//!
//! The executor does not know about HTTP. It retries whenever the operation
//! returns an error that reports itself as [`Transient`], and gives up at once
//! on anything else.
//!
//! ```rust,ignore
//! use gei_http::{Cancellation, RetryPolicy};
//! use std::time::Duration;
//!
//! let policy = RetryPolicy::new(5, Duration::from_millis(500));
//! let cancel = Cancellation::new().with_timeout(Duration::from_secs(60));
//! let body = policy.execute(&cancel, || fetch_page(1)).await?;
//! ```

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Errors that can tell whether another attempt might succeed.
pub trait Transient {
    /// Returns `true` when the failure is worth retrying.
    fn is_transient(&self) -> bool;
}

/// Why [`RetryPolicy::execute`] gave up.
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// Cancellation fired before or between attempts.
    #[error("operation cancelled")]
    Cancelled,

    /// Every attempt failed with a transient error.
    #[error("retry failed after {attempts} attempts: {source}")]
    Exhausted {
        /// Number of attempts made.
        attempts: u32,
        /// The last observed failure.
        #[source]
        source: E,
    },

    /// The operation failed with a non-transient error.
    #[error(transparent)]
    Rejected(E),
}

/// Caller-supplied cancellation: an explicit token, an optional deadline, or both.
///
/// Cloning shares the token, so cancelling any clone cancels them all.
#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Cancellation {
    /// Create a signal that only fires when [`cancel`](Self::cancel) is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing token.
    pub fn from_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Also fire at `deadline`.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Also fire once `timeout` has elapsed from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Fire the signal.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns the configured deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Check whether the signal has fired.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Sleep for `delay` unless the signal fires first.
    ///
    /// Returns `false` if the sleep was cut short.
    pub async fn sleep(&self, delay: Duration) -> bool {
        let wake = Instant::now() + delay;

        if let Some(deadline) = self.deadline {
            if deadline <= wake {
                tokio::select! {
                    () = self.token.cancelled() => {}
                    () = tokio::time::sleep_until(deadline) => {}
                }
                return false;
            }
        }

        tokio::select! {
            () = self.token.cancelled() => false,
            () = tokio::time::sleep_until(wake) => true,
        }
    }
}

/// Retry policy configuration.
///
/// Defaults: 3 attempts, 1 s initial delay doubling up to 30 s, no jitter.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,
    /// Delay after the first failed attempt.
    pub initial_delay: Duration,
    /// Upper bound on any single delay.
    pub max_delay: Duration,
    /// Backoff multiplier.
    pub multiplier: f64,
    /// Whether to add up to 25% jitter to delays.
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
            jitter: false,
        }
    }
}

impl RetryPolicy {
    /// Create a new retry policy.
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
            ..Default::default()
        }
    }

    /// Set the delay cap.
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Enable or disable jitter.
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Attempt bound actually used; a zero bound still runs once.
    fn attempt_limit(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Calculate the delay that follows failed attempt number `attempt`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let base_delay_ms = self.initial_delay.as_millis() as f64;
        let exponent = i32::try_from(attempt - 1).unwrap_or(i32::MAX);
        let mut delay_ms = base_delay_ms * self.multiplier.powi(exponent);

        if self.jitter {
            delay_ms *= 1.0 + (rand::random::<f64>() * 0.25);
        }

        let max_ms = self.max_delay.as_millis() as f64;
        Duration::from_millis(delay_ms.min(max_ms) as u64)
    }

    /// Execute an operation with retry.
    ///
    /// Cancellation is checked before every attempt and interrupts the
    /// backoff sleep; an attempt already in flight runs to completion.
    pub async fn execute<F, Fut, T, E>(
        &self,
        cancel: &Cancellation,
        mut operation: F,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Transient + std::fmt::Display,
    {
        let max_attempts = self.attempt_limit();
        let mut attempt = 0;

        loop {
            if cancel.is_cancelled() {
                tracing::debug!(attempt, "Cancelled before attempt");
                return Err(RetryError::Cancelled);
            }

            attempt += 1;

            let error = match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if !e.is_transient() => return Err(RetryError::Rejected(e)),
                Err(e) => e,
            };

            if attempt >= max_attempts {
                tracing::warn!(
                    attempt = attempt,
                    max_attempts = max_attempts,
                    error = %error,
                    "Retry exhausted"
                );
                return Err(RetryError::Exhausted {
                    attempts: attempt,
                    source: error,
                });
            }

            let delay = self.delay_for_attempt(attempt);
            tracing::debug!(
                attempt = attempt,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "Retrying after delay"
            );

            if !cancel.sleep(delay).await {
                tracing::debug!(attempt, "Cancelled during backoff");
                return Err(RetryError::Cancelled);
            }
        }
    }
}
