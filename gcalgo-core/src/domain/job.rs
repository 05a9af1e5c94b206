//! Algorithm job domain types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::status::Status;

/// One execution of an algorithm on an input image
///
/// Returned by `GET algorithms/jobs/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmJob {
    pub pk: Uuid,
    pub status: Status,
    #[serde(default)]
    pub outputs: Vec<JobOutput>,
    #[serde(default)]
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub api_url: Option<String>,
}

impl AlgorithmJob {
    /// Wall-clock run time, when both timestamps are known
    pub fn duration(&self) -> Option<chrono::Duration> {
        match (self.started_at, self.completed_at) {
            (Some(started), Some(completed)) => Some(completed.signed_duration_since(started)),
            _ => None,
        }
    }
}

/// A single result entry of a job
///
/// Outputs that are not images (scores, JSON values) carry no image URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobOutput {
    #[serde(default)]
    pub image: Option<String>,
}
