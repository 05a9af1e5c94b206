//! Algorithm domain types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A server-hosted image-processing algorithm
///
/// Returned by `GET algorithms/?slug=...`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Algorithm {
    pub pk: Uuid,
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub api_url: Option<String>,
    /// Historical average job duration in seconds, absent for new algorithms
    #[serde(default)]
    pub average_duration: Option<f64>,
}
