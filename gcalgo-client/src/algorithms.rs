//! Algorithm-related API endpoints

use crate::GrandChallengeClient;
use crate::error::Result;
use gcalgo_core::domain::algorithm::Algorithm;
use gcalgo_core::dto::page::Page;
use tracing::debug;

impl GrandChallengeClient {
    // =============================================================================
    // Algorithm Lookup
    // =============================================================================

    /// List algorithms matching a slug
    ///
    /// # Arguments
    /// * `slug` - The algorithm slug as shown in its URL
    ///
    /// # Returns
    /// A page of matching algorithms (at most one for an exact slug)
    pub async fn list_algorithms(&self, slug: &str) -> Result<Page<Algorithm>> {
        let url = self.endpoint("algorithms");
        let response = self.get(&url).query(&[("slug", slug)]).send().await?;

        self.handle_response(response).await
    }

    /// Find a single algorithm by slug
    ///
    /// # Returns
    /// `None` if no algorithm with this slug is visible to the token
    ///
    /// # Example
    /// ```no_run
    /// # use gcalgo_client::GrandChallengeClient;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = GrandChallengeClient::new(gcalgo_client::DEFAULT_BASE_URL, "token");
    /// let algorithm = client.find_algorithm("pulmonary-lobe-segmentation").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn find_algorithm(&self, slug: &str) -> Result<Option<Algorithm>> {
        let page = self.list_algorithms(slug).await?;
        debug!("Algorithm lookup for '{}' returned {} result(s)", slug, page.count);

        Ok(page.into_first())
    }
}
