//! grand-challenge HTTP Client
//!
//! A small, type-safe HTTP client for the grand-challenge.org REST API.
//!
//! It covers the endpoints needed to run an algorithm on local images:
//! algorithm lookup, case upload, upload-session and job polling, and
//! image download. Every request is authenticated with a personal API token.
//!
//! # Example
//!
//! ```no_run
//! use gcalgo_client::GrandChallengeClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = GrandChallengeClient::new(gcalgo_client::DEFAULT_BASE_URL, "my-token");
//!
//!     if let Some(algorithm) = client.find_algorithm("pulmonary-lobe-segmentation").await? {
//!         println!("Algorithm id: {}", algorithm.pk);
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
mod algorithms;
mod images;
mod jobs;
mod uploads;

// Re-export commonly used types
pub use error::{ClientError, Result};

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Public grand-challenge API root
pub const DEFAULT_BASE_URL: &str = "https://grand-challenge.org/api/v1";

/// HTTP client for the grand-challenge API
///
/// Endpoints are organized into logical groups:
/// - Algorithm lookup
/// - Case upload and upload sessions
/// - Algorithm jobs
/// - Images and raw file download
#[derive(Clone)]
pub struct GrandChallengeClient {
    /// Base URL of the API (e.g., "https://grand-challenge.org/api/v1")
    base_url: String,
    /// Personal API token sent as a bearer token
    token: String,
    /// HTTP client instance
    client: Client,
}

impl GrandChallengeClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - The API root (e.g., "https://grand-challenge.org/api/v1")
    /// * `token` - Personal API token
    ///
    /// # Example
    /// ```
    /// use gcalgo_client::GrandChallengeClient;
    ///
    /// let client = GrandChallengeClient::new("https://grand-challenge.org/api/v1/", "token");
    /// assert_eq!(client.base_url(), "https://grand-challenge.org/api/v1");
    /// ```
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(base_url, token, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use gcalgo_client::GrandChallengeClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = GrandChallengeClient::with_client(
    ///     gcalgo_client::DEFAULT_BASE_URL,
    ///     "token",
    ///     http_client,
    /// );
    /// ```
    pub fn with_client(base_url: impl Into<String>, token: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            client,
        }
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an endpoint URL; grand-challenge routes always end in a slash
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}/", self.base_url, path.trim_matches('/'))
    }

    fn get(&self, url: &str) -> RequestBuilder {
        self.authorize(self.client.get(url), url)
    }

    fn post(&self, url: &str) -> RequestBuilder {
        self.authorize(self.client.post(url), url)
    }

    /// Attach the token only for URLs on the API origin
    ///
    /// Response bodies link images and files by absolute URL, which may point
    /// at a storage host that must never see the token.
    fn authorize(&self, request: RequestBuilder, url: &str) -> RequestBuilder {
        if self.is_api_origin(url) {
            request.bearer_auth(&self.token)
        } else {
            debug!("Sending request to {} without credentials", url);
            request
        }
    }

    /// Check that `url` shares scheme, host and port with the base URL
    fn is_api_origin(&self, url: &str) -> bool {
        match (Url::parse(&self.base_url), Url::parse(url)) {
            (Ok(base), Ok(target)) => {
                base.scheme() == target.scheme()
                    && base.host_str() == target.host_str()
                    && base.port_or_known_default() == target.port_or_known_default()
            }
            _ => false,
        }
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and deserialize the JSON body
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let response = self.check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Check the status code and return the raw body
    async fn handle_bytes(&self, response: reqwest::Response) -> Result<Vec<u8>> {
        let response = self.check_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(response)
    }
}

impl std::fmt::Debug for GrandChallengeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrandChallengeClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}
