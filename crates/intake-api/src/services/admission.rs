//! Admission service
//!
//! Composes the pure validation from `intake-core` with the delegated
//! credential issuer. One call per request: authorize, validate, derive
//! keys, then issue one credential per accepted file.

use intake_core::admission::KeyPrefix;
use intake_core::{AdmissionError, AdmissionPolicy, UploadGrant, UploadRequest};
use intake_storage::CredentialIssuer;
use std::sync::Arc;

pub struct AdmissionService {
    policy: AdmissionPolicy,
    issuer: Arc<dyn CredentialIssuer>,
}

impl AdmissionService {
    pub fn new(policy: AdmissionPolicy, issuer: Arc<dyn CredentialIssuer>) -> Self {
        Self { policy, issuer }
    }

    /// Decide one upload request.
    ///
    /// All-or-nothing: either every file in the batch gets a grant, in input
    /// order, or the first failure aborts the whole request. No credential
    /// is requested for files at or after a failing one, and grants already
    /// issued for earlier files are dropped if a later issuance faults.
    pub async fn decide(
        &self,
        request: &UploadRequest,
    ) -> Result<Vec<UploadGrant>, AdmissionError> {
        self.policy.authorize(request.secret.as_deref())?;

        // Date partition and uniqueness token are sampled once per request
        // and shared by every file in the batch.
        let prefix = KeyPrefix::now();
        let planned = self.policy.plan_batch(&request.files, &prefix)?;

        let mut grants = Vec::with_capacity(planned.len());
        for upload in planned {
            let credential = self
                .issuer
                .issue_upload_credential(
                    &upload.key,
                    &upload.content_type,
                    self.policy.client_tag.as_deref(),
                    self.policy.url_expiry,
                )
                .await
                .map_err(|e| AdmissionError::Issuer(e.to_string()))?;
            grants.push(UploadGrant::new(upload.name, upload.key, credential));
        }

        tracing::info!(
            files = grants.len(),
            expiry_secs = self.policy.url_expiry.as_secs(),
            "Issued upload grants"
        );

        Ok(grants)
    }
}
