//! Processing status reported by the remote service
//!
//! Upload sessions and algorithm jobs report their progress as a display
//! label ("Queued", "Started", "Executing Algorithm", ...). Only three labels
//! are terminal; everything else means "keep waiting".

use serde::{Deserialize, Serialize};

/// Status of an upload session or algorithm job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Succeeded,
    Failed,
    Cancelled,
    /// Any non-terminal label, kept verbatim
    Pending(String),
}

impl Status {
    /// Returns true once the remote side will not change the status again
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Status::Pending(_))
    }

    /// Returns true for `Failed` and `Cancelled`
    pub fn is_rejected(&self) -> bool {
        matches!(self, Status::Failed | Status::Cancelled)
    }

    /// The label as reported by the service
    pub fn label(&self) -> &str {
        match self {
            Status::Succeeded => "Succeeded",
            Status::Failed => "Failed",
            Status::Cancelled => "Cancelled",
            Status::Pending(label) => label,
        }
    }
}

impl From<String> for Status {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Succeeded" => Status::Succeeded,
            "Failed" => Status::Failed,
            "Cancelled" => Status::Cancelled,
            _ => Status::Pending(label),
        }
    }
}

impl From<&str> for Status {
    fn from(label: &str) -> Self {
        Status::from(label.to_string())
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.label().to_string()
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
