//! Job DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Filter for `GET algorithms/jobs/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobQuery {
    #[serde(rename = "algorithm_image__algorithm")]
    pub algorithm: Uuid,
    pub input_image: Uuid,
}
