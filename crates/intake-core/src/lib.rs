//! Intake Core Library
//!
//! This crate provides the domain types, configuration, error taxonomy, and
//! admission validation shared across all intake components. It performs no
//! I/O: credential issuance and HTTP handling live in the `intake-storage`
//! and `intake-api` crates.

pub mod admission;
pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use admission::{AdmissionPolicy, KeyPrefix, PlannedUpload};
pub use config::Config;
pub use error::AdmissionError;
pub use models::{FileDescriptor, UploadCredential, UploadGrant, UploadRequest};
