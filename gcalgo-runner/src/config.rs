//! Runner configuration
//!
//! Defines the API connection settings and the polling parameters used
//! while waiting for the remote service.

use gcalgo_client::GrandChallengeClient;
use std::time::Duration;

use crate::context::DEFAULT_HEADSTART;
use crate::retry::{DEFAULT_MAX_DELAY, ThrottledRetries};

/// API connection settings
#[derive(Clone)]
pub struct ApiConfig {
    /// API root (e.g., "https://grand-challenge.org/api/v1")
    pub base_url: String,

    /// Personal API token, never logged
    pub token: String,

    /// Per-request timeout; requests wait indefinitely when unset
    pub request_timeout: Option<Duration>,
}

impl ApiConfig {
    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.token.trim().is_empty() {
            anyhow::bail!("API token cannot be empty");
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!("base_url must start with http:// or https://");
        }

        if self.request_timeout.is_some_and(|t| t.is_zero()) {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        Ok(())
    }

    /// Builds an authenticated API client
    pub fn build_client(&self) -> anyhow::Result<GrandChallengeClient> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(GrandChallengeClient::with_client(
            self.base_url.clone(),
            self.token.clone(),
            http_client,
        ))
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Polling configuration
///
/// Both polling phases share the same retry policy.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Number of polls per phase before giving up
    pub poll_attempts: u32,

    /// Base wait between polls, grown by 1.5x per attempt
    pub poll_interval: Duration,

    /// Upper bound for a single wait between polls
    pub max_poll_delay: Duration,

    /// Fixed wait after upload before the first import poll
    pub import_headstart: Duration,

    /// Wait before job polling when the algorithm has no average run time
    pub default_headstart: Duration,

    /// Fail when a successful job yields no mask instead of returning quietly
    pub require_output: bool,
}

impl RunnerConfig {
    /// Retry policy for a polling phase
    pub fn retries(&self) -> ThrottledRetries {
        ThrottledRetries::new(self.poll_attempts, self.poll_interval, self.max_poll_delay)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.poll_attempts == 0 {
            anyhow::bail!("poll_attempts must be at least 1");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.max_poll_delay.is_zero() {
            anyhow::bail!("max_poll_delay must be greater than 0");
        }

        Ok(())
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            poll_attempts: 25,
            poll_interval: Duration::from_secs(15),
            max_poll_delay: DEFAULT_MAX_DELAY,
            import_headstart: Duration::from_secs(30),
            default_headstart: DEFAULT_HEADSTART,
            require_output: false,
        }
    }
}
