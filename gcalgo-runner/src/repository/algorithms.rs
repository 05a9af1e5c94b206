//! Algorithm repository
//!
//! Handles communication with grand-challenge for a single algorithm run:
//! - Resolving the algorithm slug
//! - Uploading input files
//! - Polling upload sessions and algorithm jobs
//! - Fetching images and raw file content

use async_trait::async_trait;
use gcalgo_client::{GrandChallengeClient, Result};
use gcalgo_core::domain::algorithm::Algorithm;
use gcalgo_core::domain::image::Image;
use gcalgo_core::domain::job::AlgorithmJob;
use gcalgo_core::domain::upload::UploadSession;
use gcalgo_core::dto::job::JobQuery;
use std::path::PathBuf;
use uuid::Uuid;

/// Repository trait for the remote operations used by the runner
///
/// Errors keep the client's classification so callers can tell transient
/// transport failures (`ClientError::is_transient`) from API responses.
#[async_trait]
pub trait AlgorithmRepository: Send + Sync {
    /// Looks up an algorithm by slug
    ///
    /// Returns `None` when the lookup yields no results.
    async fn find_algorithm(&self, slug: &str) -> Result<Option<Algorithm>>;

    /// Uploads input files as a case for an algorithm
    ///
    /// # Arguments
    /// * `files` - Local files, passed through in order
    /// * `algorithm` - Algorithm slug
    async fn upload_cases(&self, files: &[PathBuf], algorithm: &str) -> Result<UploadSession>;

    /// Fetches the current state of an upload session
    async fn get_upload_session(&self, session_id: Uuid) -> Result<UploadSession>;

    /// Fetches image details from an API URL
    async fn get_image(&self, url: &str) -> Result<Image>;

    /// Lists algorithm jobs matching a query
    ///
    /// # Arguments
    /// * `query` - Algorithm and input image filter
    /// * `limit` - Maximum number of jobs to return
    async fn find_jobs(&self, query: &JobQuery, limit: u32) -> Result<Vec<AlgorithmJob>>;

    /// Downloads raw content from a URL
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>>;
}

/// HTTP implementation of AlgorithmRepository
pub struct HttpAlgorithmRepository {
    client: GrandChallengeClient,
}

impl HttpAlgorithmRepository {
    /// Creates a new HTTP repository
    ///
    /// # Arguments
    /// * `client` - An authenticated grand-challenge client
    pub fn new(client: GrandChallengeClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AlgorithmRepository for HttpAlgorithmRepository {
    async fn find_algorithm(&self, slug: &str) -> Result<Option<Algorithm>> {
        self.client.find_algorithm(slug).await
    }

    async fn upload_cases(&self, files: &[PathBuf], algorithm: &str) -> Result<UploadSession> {
        self.client.upload_cases(files, algorithm).await
    }

    async fn get_upload_session(&self, session_id: Uuid) -> Result<UploadSession> {
        self.client.get_upload_session(session_id).await
    }

    async fn get_image(&self, url: &str) -> Result<Image> {
        self.client.get_image(url).await
    }

    async fn find_jobs(&self, query: &JobQuery, limit: u32) -> Result<Vec<AlgorithmJob>> {
        let page = self.client.list_jobs(query, limit).await?;
        Ok(page.results)
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        self.client.fetch_bytes(url).await
    }
}
