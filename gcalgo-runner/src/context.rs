//! Job context
//!
//! Everything the runner learns about the target algorithm before the first
//! upload. Built once from the algorithm lookup and never changed afterwards.

use gcalgo_core::domain::algorithm::Algorithm;
use std::time::Duration;
use uuid::Uuid;

/// Wait before job polling when the algorithm has no recorded run time
pub const DEFAULT_HEADSTART: Duration = Duration::from_secs(30);

/// Share of the historical average run time spent waiting before job polling
const HEADSTART_FRACTION: f64 = 0.75;

/// Resolved algorithm information for a run
#[derive(Debug, Clone, PartialEq)]
pub struct JobContext {
    /// Slug as given by the user
    pub algorithm_slug: String,

    /// Canonical algorithm ID used to filter jobs
    pub algorithm_id: Uuid,

    /// Wait between import completion and the first job poll
    pub headstart: Duration,
}

impl JobContext {
    /// Creates a context from an algorithm lookup result
    ///
    /// # Arguments
    /// * `algorithm` - The resolved algorithm
    /// * `default_headstart` - Used when the average duration is unknown or zero
    pub fn from_algorithm(algorithm: &Algorithm, default_headstart: Duration) -> Self {
        Self {
            algorithm_slug: algorithm.slug.clone(),
            algorithm_id: algorithm.pk,
            headstart: headstart_for(algorithm.average_duration, default_headstart),
        }
    }
}

/// Three quarters of the average run time, truncated to whole seconds
pub fn headstart_for(average_duration: Option<f64>, default: Duration) -> Duration {
    match average_duration {
        Some(average) if average != 0.0 => {
            // Saturating cast: negative or NaN averages give no headstart
            Duration::from_secs((average * HEADSTART_FRACTION) as u64)
        }
        _ => default,
    }
}
