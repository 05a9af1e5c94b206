//! Data Transfer Objects for the grand-challenge REST API
//!
//! Request bodies, query parameters and the paginated list envelope
//! used by every list endpoint.

pub mod job;
pub mod page;
pub mod upload;
