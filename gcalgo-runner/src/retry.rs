//! Throttled retries
//!
//! A bounded sequence of attempt indices with exponential backoff between
//! attempts. The policy is an immutable value; each call to
//! [`ThrottledRetries::attempts`] starts a fresh sequence.
//!
//! ```ignore
//! let mut attempts = ThrottledRetries::new(25, Duration::from_secs(15), DEFAULT_MAX_DELAY).attempts();
//! while let Some(attempt) = attempts.next_attempt().await {
//!     // poll, `continue` to retry, `return` when done
//! }
//! // exhausted: the caller decides this is a timeout
//! ```

use std::time::Duration;
use tracing::debug;

/// Upper bound for a single wait between attempts
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(300);

/// Growth factor of the wait between consecutive attempts
const BACKOFF_FACTOR: f64 = 1.5;

/// Exponential backoff policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrottledRetries {
    attempts: u32,
    interval: Duration,
    max_delay: Duration,
}

impl ThrottledRetries {
    /// Creates a policy; waits never exceed `max_delay`
    pub fn new(attempts: u32, interval: Duration, max_delay: Duration) -> Self {
        Self {
            attempts,
            interval,
            max_delay,
        }
    }

    /// Total number of attempts in a sequence
    pub fn max_attempts(&self) -> u32 {
        self.attempts
    }

    /// Wait before attempt `n`: `min(interval * 1.5^n, max_delay)`, zero for the first
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let secs = self.interval.as_secs_f64() * BACKOFF_FACTOR.powi(exponent);

        // powi overflows to infinity for large attempts, min() brings it back
        Duration::from_secs_f64(secs.min(self.max_delay.as_secs_f64()))
    }

    /// Starts a new sequence of attempts
    pub fn attempts(&self) -> Attempts {
        Attempts {
            policy: *self,
            next: 0,
        }
    }
}

/// One pass over a [`ThrottledRetries`] policy
#[derive(Debug)]
pub struct Attempts {
    policy: ThrottledRetries,
    next: u32,
}

impl Attempts {
    /// Waits for the backoff delay and returns the next attempt index
    ///
    /// Returns `None` once all attempts have been handed out.
    pub async fn next_attempt(&mut self) -> Option<u32> {
        if self.next >= self.policy.max_attempts() {
            return None;
        }

        let attempt = self.next;
        let delay = self.policy.delay_before(attempt);
        if !delay.is_zero() {
            debug!(
                "Attempt {}/{} in {:?}",
                attempt + 1,
                self.policy.max_attempts(),
                delay
            );
            tokio::time::sleep(delay).await;
        }

        self.next += 1;
        Some(attempt)
    }

    /// Number of attempts handed out so far
    pub fn consumed(&self) -> u32 {
        self.next
    }
}
