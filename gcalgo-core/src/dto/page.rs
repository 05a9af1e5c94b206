//! Paginated list envelope

use serde::{Deserialize, Serialize};

/// Envelope returned by every list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Consumes the page and returns its first result
    pub fn into_first(self) -> Option<T> {
        self.results.into_iter().next()
    }
}
