//! Service layer
//!
//! Services contain the runner's business logic. They drive the remote
//! workflow through the repository and decide how each reported status is
//! handled.

mod algorithm;
mod download;

pub use algorithm::{AlgorithmRunner, RunReport};
