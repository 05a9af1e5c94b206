//! Upload session domain types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::status::Status;

/// Server-side record tracking the import of uploaded image files
///
/// Returned by `GET cases/upload-sessions/{pk}/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadSession {
    pub pk: Uuid,
    pub status: Status,
    /// URLs of the images produced by the import, in import order
    #[serde(default)]
    pub image_set: Vec<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
}

impl UploadSession {
    /// URL of the first imported image, if any
    pub fn first_image(&self) -> Option<&str> {
        self.image_set.first().map(String::as_str)
    }
}
