use axum::{body::Bytes, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ConfirmResponse {
    pub message: String,
}

/// Side-channel notification that a client finished uploading.
///
/// Bypasses admission entirely: the body is logged for operators and the
/// request acknowledged. Nothing here feeds back into admission decisions.
pub async fn confirm_upload(body: Bytes) -> Json<ConfirmResponse> {
    let preview = String::from_utf8_lossy(&body);
    tracing::info!(body = %preview, "Upload confirmation received");

    Json(ConfirmResponse {
        message: "Upload confirmation received".to_string(),
    })
}
