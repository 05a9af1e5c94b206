//! Core domain types
//!
//! This module contains the structures returned by the grand-challenge REST API.
//! They carry only the fields the runner needs; unknown fields are ignored
//! during deserialization.

pub mod algorithm;
pub mod image;
pub mod job;
pub mod status;
pub mod upload;
