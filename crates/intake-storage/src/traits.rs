//! Credential issuer abstraction trait
//!
//! This module defines the trait every credential issuer backend must
//! implement. The admission service works against the trait object and never
//! couples to a specific provider.

use async_trait::async_trait;
use intake_core::models::UploadCredential;
use std::time::Duration;
use thiserror::Error;

/// Credential issuance errors
#[derive(Debug, Error)]
pub enum IssuerError {
    #[error("Credential issuance failed: {0}")]
    Credential(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for issuer operations
pub type IssuerResult<T> = Result<T, IssuerError>;

/// Object storage credential issuer.
///
/// Implementations return a time-limited credential letting the caller
/// upload one object directly to storage under `key`. The credential is
/// scoped to the key, the declared content type, and the expiry; an
/// optional `client_tag` is attached as object metadata for downstream
/// auditing and has no effect on the credential's scope.
#[async_trait]
pub trait CredentialIssuer: Send + Sync {
    async fn issue_upload_credential(
        &self,
        key: &str,
        content_type: &str,
        client_tag: Option<&str>,
        expires_in: Duration,
    ) -> IssuerResult<UploadCredential>;
}
