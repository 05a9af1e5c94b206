//! Upload DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A raw file stored by `POST uploads/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpload {
    pub pk: Uuid,
    pub api_url: String,
    #[serde(default)]
    pub filename: String,
}

/// Request to import previously uploaded files as a case for an algorithm
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUploadSession {
    /// `api_url`s of the uploaded files
    pub uploads: Vec<String>,
    /// Algorithm slug
    pub algorithm: String,
}
