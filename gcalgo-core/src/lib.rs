//! gcalgo Core
//!
//! Core types shared by the grand-challenge API client and the algorithm runner.
//!
//! This crate contains:
//! - Domain types: Remote entities (Algorithm, UploadSession, AlgorithmJob, Image)
//! - DTOs: Request payloads and pagination wrappers for the REST API

pub mod domain;
pub mod dto;
