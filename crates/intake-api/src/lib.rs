//! Intake API Library
//!
//! This crate provides the HTTP boundary: handlers, error mapping, and
//! application setup around the core admission validator.

pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;

// Re-exports
pub use error::ErrorResponse;
pub use services::admission::AdmissionService;
pub use state::AppState;
