//! Repository layer
//!
//! The repository is the runner's only view of the remote service. It is a
//! thin, trait-based wrapper over the HTTP client so the polling logic can
//! be tested against scripted responses.

mod algorithms;

#[cfg(test)]
pub(crate) mod testing;

// Re-export trait
pub use algorithms::AlgorithmRepository;

// Re-export implementation
pub use algorithms::HttpAlgorithmRepository;
