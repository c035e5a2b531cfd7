//! Intake Storage Library
//!
//! The Object Storage Credential Issuer collaborator: a trait over
//! "give me a time-limited upload credential for this key", an S3-backed
//! implementation, and an in-memory mock for tests.
//!
//! Issued credentials are opaque to the admission path. The S3 issuer
//! returns presigned PUT URLs; the credential type also carries optional
//! form fields so POST-policy style issuers fit the same contract.

pub mod mock;
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use mock::MockIssuer;
pub use s3::S3CredentialIssuer;
pub use traits::{CredentialIssuer, IssuerError, IssuerResult};
