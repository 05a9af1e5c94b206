//! Image and raw file endpoints
//!
//! The API links images and files by absolute URL, so these methods take
//! URLs rather than IDs.

use crate::GrandChallengeClient;
use crate::error::Result;
use gcalgo_core::domain::image::Image;

impl GrandChallengeClient {
    /// Get image details from its API URL
    pub async fn get_image(&self, url: &str) -> Result<Image> {
        let response = self.get(url).send().await?;

        self.handle_response(response).await
    }

    /// Download the raw content behind a URL
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.get(url).send().await?;

        self.handle_bytes(response).await
    }
}
