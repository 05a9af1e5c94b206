//! Upload-related API endpoints

use crate::GrandChallengeClient;
use crate::error::{ClientError, Result};
use gcalgo_core::domain::upload::UploadSession;
use gcalgo_core::dto::upload::{CreateUploadSession, UserUpload};
use reqwest::multipart::{Form, Part};
use std::path::Path;
use tracing::{debug, info};
use uuid::Uuid;

impl GrandChallengeClient {
    // =============================================================================
    // Case Upload
    // =============================================================================

    /// Upload a single local file
    ///
    /// # Arguments
    /// * `path` - Path of the file to upload
    ///
    /// # Returns
    /// The stored upload, whose `api_url` can be referenced by an upload session
    pub async fn upload_file(&self, path: &Path) -> Result<UserUpload> {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                ClientError::InvalidRequest(format!("{} has no usable file name", path.display()))
            })?
            .to_string();

        let content = tokio::fs::read(path).await.map_err(|source| ClientError::Io {
            path: path.display().to_string(),
            source,
        })?;

        debug!("Uploading {} ({} bytes)", filename, content.len());

        let part = Part::bytes(content).file_name(filename.clone());
        let form = Form::new().text("filename", filename).part("file", part);

        let url = self.endpoint("uploads");
        let response = self.post(&url).multipart(form).send().await?;

        self.handle_response(response).await
    }

    /// Create an upload session that imports uploaded files for an algorithm
    pub async fn create_upload_session(&self, req: CreateUploadSession) -> Result<UploadSession> {
        let url = self.endpoint("cases/upload-sessions");
        let response = self.post(&url).json(&req).send().await?;

        self.handle_response(response).await
    }

    /// Upload local files as a new case for an algorithm
    ///
    /// Files are uploaded one by one in the given order, then a single
    /// upload session is created referencing all of them.
    ///
    /// # Example
    /// ```no_run
    /// # use gcalgo_client::GrandChallengeClient;
    /// # use std::path::PathBuf;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = GrandChallengeClient::new(gcalgo_client::DEFAULT_BASE_URL, "token");
    /// let session = client
    ///     .upload_cases(&[PathBuf::from("scan.mha")], "pulmonary-lobe-segmentation")
    ///     .await?;
    /// println!("Upload session: {}", session.pk);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn upload_cases<P: AsRef<Path>>(
        &self,
        files: &[P],
        algorithm: &str,
    ) -> Result<UploadSession> {
        if files.is_empty() {
            return Err(ClientError::InvalidRequest(
                "at least one input file is required".to_string(),
            ));
        }

        let mut uploads = Vec::with_capacity(files.len());
        for file in files {
            let upload = self.upload_file(file.as_ref()).await?;
            uploads.push(upload.api_url);
        }

        let session = self
            .create_upload_session(CreateUploadSession {
                uploads,
                algorithm: algorithm.to_string(),
            })
            .await?;

        info!("Created upload session {} for '{}'", session.pk, algorithm);

        Ok(session)
    }

    // =============================================================================
    // Upload Sessions
    // =============================================================================

    /// Get an upload session by ID
    pub async fn get_upload_session(&self, session_id: Uuid) -> Result<UploadSession> {
        let url = self.endpoint(&format!("cases/upload-sessions/{}", session_id));
        let response = self.get(&url).send().await?;

        self.handle_response(response).await
    }
}
