//! HTTP error response conversion
//!
//! This module provides HTTP-specific error response conversion for
//! AdmissionError.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use intake_core::error::LogLevel;
use intake_core::AdmissionError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Machine-readable reason code for programmatic handling
    pub code: String,
}

/// Wrapper type for AdmissionError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AdmissionError (external type from
/// intake-core)
#[derive(Debug)]
pub struct HttpAdmissionError(pub AdmissionError);

impl From<AdmissionError> for HttpAdmissionError {
    fn from(err: AdmissionError) -> Self {
        HttpAdmissionError(err)
    }
}

fn log_error(error: &AdmissionError) {
    let code = error.reason_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, code = code, "Request rejected");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, code = code, "Request rejected");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, code = code, "Request failed");
        }
    }
}

impl IntoResponse for HttpAdmissionError {
    fn into_response(self) -> Response {
        let error = &self.0;

        let status = StatusCode::from_u16(error.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(error);

        // The Display message carries the underlying cause for issuer faults
        // and names the offending file for validation failures. It never
        // contains the expected secret.
        let body = Json(ErrorResponse {
            error: error.to_string(),
            code: error.reason_code().to_string(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_maps_to_401() {
        let response = HttpAdmissionError(AdmissionError::Unauthorized).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_validation_errors_map_to_400() {
        let response = HttpAdmissionError(AdmissionError::NoFiles).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = HttpAdmissionError(AdmissionError::TooManyFiles { count: 11, max: 10 })
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_issuer_fault_maps_to_500() {
        let response =
            HttpAdmissionError(AdmissionError::Issuer("boom".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
