//! Mock CredentialIssuer implementation for testing

use crate::traits::{CredentialIssuer, IssuerError, IssuerResult};
use async_trait::async_trait;
use intake_core::models::UploadCredential;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock issuer that records every issuance and returns deterministic URLs.
/// Arm it with `fail_with` to exercise the issuer-fault path.
#[derive(Clone)]
pub struct MockIssuer {
    issued: Arc<Mutex<Vec<IssuedRecord>>>,
    failure: Arc<Mutex<Option<String>>>,
}

/// One recorded issuance (for test assertions)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedRecord {
    pub key: String,
    pub content_type: String,
    pub client_tag: Option<String>,
    pub expires_in: Duration,
}

impl MockIssuer {
    pub fn new() -> Self {
        Self {
            issued: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
        }
    }

    /// Make every subsequent issuance fail with the given message
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    /// Number of credentials issued so far
    pub fn issued_count(&self) -> usize {
        self.issued.lock().unwrap().len()
    }

    /// Snapshot of all recorded issuances
    pub fn issued(&self) -> Vec<IssuedRecord> {
        self.issued.lock().unwrap().clone()
    }
}

impl Default for MockIssuer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialIssuer for MockIssuer {
    async fn issue_upload_credential(
        &self,
        key: &str,
        content_type: &str,
        client_tag: Option<&str>,
        expires_in: Duration,
    ) -> IssuerResult<UploadCredential> {
        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(IssuerError::Credential(message));
        }

        self.issued.lock().unwrap().push(IssuedRecord {
            key: key.to_string(),
            content_type: content_type.to_string(),
            client_tag: client_tag.map(String::from),
            expires_in,
        });

        Ok(UploadCredential::url(format!(
            "https://example.com/upload/{}?signature=test",
            key
        )))
    }
}
