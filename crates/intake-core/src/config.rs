//! Configuration module
//!
//! Process-wide configuration loaded once at startup from the environment.
//! The bucket and shared secret are required; everything else has a default.
//! Nothing re-reads the environment after `from_env` returns.

use std::env;

const URL_EXPIRATION_SECS: u64 = 3600;
const MAX_FILES_PER_REQUEST: usize = 10;
const DEFAULT_ALLOWED_EXTENSIONS: &str = "pdf,doc,docx,xls,xlsx,csv,png,jpg,jpeg,eml,msg,txt,gif";

/// Application configuration (upload intake gateway).
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    /// Target bucket for issued upload credentials.
    pub upload_bucket: String,
    /// Shared secret gating the request-urls endpoint.
    pub upload_secret: String,
    /// Opaque label attached to issued credentials for downstream auditing.
    pub client_tag: Option<String>,
    pub allowed_extensions: Vec<String>,
    pub max_files_per_request: usize,
    pub url_expiration_secs: u64,
    pub s3_region: String,
    /// Custom endpoint for S3-compatible providers (MinIO, DigitalOcean Spaces, etc.)
    pub s3_endpoint: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let upload_bucket = env::var("UPLOAD_BUCKET")
            .map_err(|_| anyhow::anyhow!("UPLOAD_BUCKET must be set to the target bucket name"))?;
        let upload_secret = env::var("UPLOAD_SECRET")
            .map_err(|_| anyhow::anyhow!("UPLOAD_SECRET must be set for request authorization"))?;

        let allowed_extensions = env::var("ALLOWED_EXTENSIONS")
            .unwrap_or_else(|_| DEFAULT_ALLOWED_EXTENSIONS.to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            upload_bucket,
            upload_secret,
            client_tag: env::var("CLIENT_TAG").ok().filter(|s| !s.is_empty()),
            allowed_extensions,
            max_files_per_request: env::var("MAX_FILES_PER_REQUEST")
                .unwrap_or_else(|_| MAX_FILES_PER_REQUEST.to_string())
                .parse()
                .unwrap_or(MAX_FILES_PER_REQUEST),
            url_expiration_secs: env::var("URL_EXPIRATION_SECS")
                .unwrap_or_else(|_| URL_EXPIRATION_SECS.to_string())
                .parse()
                .unwrap_or(URL_EXPIRATION_SECS),
            s3_region: env::var("S3_REGION")
                .or_else(|_| env::var("AWS_REGION"))
                .unwrap_or_else(|_| "us-east-1".to_string()),
            s3_endpoint: env::var("S3_ENDPOINT").ok().filter(|s| !s.is_empty()),
        })
    }
}
