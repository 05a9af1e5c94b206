//! Errors raised while running an algorithm

use gcalgo_client::ClientError;
use thiserror::Error;

/// Result type alias for runner operations
pub type Result<T> = std::result::Result<T, RunError>;

/// Polling phase that ran out of attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Import,
    Job,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Import => write!(f, "image import"),
            Phase::Job => write!(f, "algorithm job"),
        }
    }
}

/// Errors that can occur while running an algorithm
#[derive(Debug, Error)]
pub enum RunError {
    /// The slug did not resolve to an algorithm
    #[error("Invalid algorithm name: '{0}'")]
    InvalidAlgorithm(String),

    /// The destination path cannot hold the mask format
    #[error("Output file '{path}' needs to have .{expected} extension")]
    InvalidOutputExtension { path: String, expected: &'static str },

    /// The upload session was reported failed or cancelled
    #[error("Algorithm \"{algorithm}\" could not be started")]
    ImportRejected {
        algorithm: String,
        reason: Option<String>,
    },

    /// The import succeeded but produced no image
    #[error("Uploaded image could not be imported, not a valid image?")]
    ImageNotImported,

    /// The algorithm job was reported failed or cancelled
    #[error("Algorithm \"{algorithm}\" failed")]
    JobFailed { algorithm: String },

    /// The retry budget ran out before a terminal status was seen
    #[error("Timed out waiting for {phase} after {attempts} attempt(s)")]
    Timeout { phase: Phase, attempts: u32 },

    /// The job succeeded without any mask output
    #[error("Algorithm \"{algorithm}\" produced no .{expected} output")]
    NoMaskProduced {
        algorithm: String,
        expected: &'static str,
    },

    /// Non-transient API failure
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Writing the result failed
    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl RunError {
    /// Check if the error comes from invalid input rather than the remote side
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidAlgorithm(_) | Self::InvalidOutputExtension { .. }
        )
    }

    /// Check if the remote service refused or failed the work
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::ImportRejected { .. } | Self::JobFailed { .. })
    }

    /// Check if the runner gave up waiting
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
