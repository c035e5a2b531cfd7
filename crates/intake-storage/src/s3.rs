use crate::traits::{CredentialIssuer, IssuerError, IssuerResult};
use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::retry::{RetryConfig, RetryMode};
use aws_config::BehaviorVersion;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;
use intake_core::models::UploadCredential;
use std::time::Duration;

/// S3-backed credential issuer
///
/// Issues presigned PUT URLs scoped to a single key, content type, and
/// expiry. The URL is the whole credential; clients upload with HTTP PUT.
#[derive(Clone)]
pub struct S3CredentialIssuer {
    client: Client,
    bucket: String,
}

impl S3CredentialIssuer {
    /// Create a new S3CredentialIssuer
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    pub async fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
    ) -> IssuerResult<Self> {
        let region_provider = RegionProviderChain::first_try(aws_config::Region::new(region));

        let retry_config = RetryConfig::standard()
            .with_max_attempts(5)
            .with_retry_mode(RetryMode::Adaptive);

        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .retry_config(retry_config)
            .load()
            .await;

        let client = if let Some(ref endpoint) = endpoint_url {
            // Derive from the loaded config so the behavior version,
            // credentials, and retry settings carry over. Path-style
            // addressing is required by MinIO and most S3-compatible
            // providers.
            let s3_config = aws_sdk_s3::config::Builder::from(&config)
                .endpoint_url(endpoint)
                .force_path_style(true)
                .build();
            Client::from_conf(s3_config)
        } else {
            Client::new(&config)
        };

        Ok(S3CredentialIssuer { client, bucket })
    }
}

#[async_trait]
impl CredentialIssuer for S3CredentialIssuer {
    async fn issue_upload_credential(
        &self,
        key: &str,
        content_type: &str,
        client_tag: Option<&str>,
        expires_in: Duration,
    ) -> IssuerResult<UploadCredential> {
        let presigning_config = PresigningConfig::builder()
            .expires_in(expires_in)
            .build()
            .map_err(|e| IssuerError::Config(e.to_string()))?;

        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type);
        if let Some(tag) = client_tag {
            request = request.metadata("client", tag);
        }

        let presigned = request.presigned(presigning_config).await.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %key,
                "Failed to presign upload request"
            );
            IssuerError::Credential(e.to_string())
        })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            content_type = %content_type,
            expires_in_secs = expires_in.as_secs(),
            "Issued presigned upload URL"
        );

        Ok(UploadCredential::url(presigned.uri().to_string()))
    }
}
