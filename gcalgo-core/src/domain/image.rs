//! Image domain types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An imported image and the files that store it
///
/// Returned by `GET cases/images/{pk}/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub pk: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub files: Vec<ImageFile>,
}

/// One stored representation of an image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageFile {
    pub image_type: ImageType,
    /// Download URL of the file content
    pub file: String,
}

/// Container format of an image file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ImageType {
    /// MetaImage, stored as a single `.mha` file
    Mhd,
    Tiff,
    Dzi,
    Jpeg,
    Other(String),
}

impl ImageType {
    /// File extension used when persisting this format locally
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            ImageType::Mhd => Some("mha"),
            ImageType::Tiff => Some("tif"),
            ImageType::Dzi => Some("dzi"),
            ImageType::Jpeg => Some("jpg"),
            ImageType::Other(_) => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ImageType::Mhd => "MHD",
            ImageType::Tiff => "TIFF",
            ImageType::Dzi => "DZI",
            ImageType::Jpeg => "JPEG",
            ImageType::Other(label) => label,
        }
    }
}

impl From<String> for ImageType {
    fn from(label: String) -> Self {
        match label.as_str() {
            "MHD" => ImageType::Mhd,
            "TIFF" => ImageType::Tiff,
            "DZI" => ImageType::Dzi,
            "JPEG" => ImageType::Jpeg,
            _ => ImageType::Other(label),
        }
    }
}

impl From<ImageType> for String {
    fn from(image_type: ImageType) -> Self {
        image_type.label().to_string()
    }
}

impl std::fmt::Display for ImageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
