//! Algorithm job API endpoints

use crate::GrandChallengeClient;
use crate::error::Result;
use gcalgo_core::domain::job::AlgorithmJob;
use gcalgo_core::dto::job::JobQuery;
use gcalgo_core::dto::page::Page;

impl GrandChallengeClient {
    // =============================================================================
    // Algorithm Jobs
    // =============================================================================

    /// List algorithm jobs matching a filter
    ///
    /// # Arguments
    /// * `query` - Algorithm and input image to filter on
    /// * `limit` - Maximum number of jobs returned in the page
    ///
    /// # Returns
    /// A page of matching jobs, newest first
    pub async fn list_jobs(&self, query: &JobQuery, limit: u32) -> Result<Page<AlgorithmJob>> {
        let url = self.endpoint("algorithms/jobs");
        let response = self
            .get(&url)
            .query(query)
            .query(&[("limit", limit)])
            .send()
            .await?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use crate::GrandChallengeClient;
    use gcalgo_core::domain::status::Status;
    use gcalgo_core::dto::job::JobQuery;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_list_jobs_sends_filter_and_limit() {
        let algorithm = "0d11fc7b-c63f-4fd7-b80b-51d2e21492c0";
        let image = "9a8b7c6d-5e4f-4a3b-8c2d-1e0f9a8b7c6d";

        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/algorithms/jobs/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("algorithm_image__algorithm".into(), algorithm.into()),
                Matcher::UrlEncoded("input_image".into(), image.into()),
                Matcher::UrlEncoded("limit".into(), "1".into()),
            ]))
            .match_header("authorization", "Bearer secret")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                "count": 1, "next": null, "previous": null,
                "results": [{
                    "pk": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
                    "status": "Executing Algorithm",
                    "outputs": []
                }]
            }"#,
            )
            .create_async()
            .await;

        let client = GrandChallengeClient::new(server.url(), "secret");
        let query = JobQuery {
            algorithm: algorithm.parse().unwrap(),
            input_image: image.parse().unwrap(),
        };
        let page = client.list_jobs(&query, 1).await.unwrap();

        let job = page.into_first().unwrap();
        assert_eq!(job.status, Status::Pending("Executing Algorithm".to_string()));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_malformed_job_page_is_parse_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/algorithms/jobs/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"unexpected": true}"#)
            .create_async()
            .await;

        let client = GrandChallengeClient::new(server.url(), "secret");
        let query = JobQuery {
            algorithm: uuid::Uuid::nil(),
            input_image: uuid::Uuid::nil(),
        };
        let err = client.list_jobs(&query, 1).await.unwrap_err();

        assert!(matches!(err, crate::ClientError::ParseError(_)));
        assert!(!err.is_transient());
    }
}
