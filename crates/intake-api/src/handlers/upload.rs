use crate::error::HttpAdmissionError;
use crate::services::admission::AdmissionService;
use crate::state::AppState;
use axum::{body::Bytes, extract::State, Json};
use intake_core::{UploadGrant, UploadRequest};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct UploadUrlsResponse {
    pub message: String,
    pub files: Vec<UploadGrant>,
}

/// Issue presigned upload URLs for a batch of proposed files.
///
/// The body is read raw and parsed leniently: an absent or unparseable body
/// degrades to an empty request, which fails authorization rather than
/// producing a parse error.
pub async fn request_upload_urls(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<UploadUrlsResponse>, HttpAdmissionError> {
    let request: UploadRequest = serde_json::from_slice(&body).unwrap_or_default();

    let service = AdmissionService::new(state.policy.clone(), state.issuer.clone());
    let files = service.decide(&request).await?;

    Ok(Json(UploadUrlsResponse {
        message: "Presigned upload URLs generated".to_string(),
        files,
    }))
}
