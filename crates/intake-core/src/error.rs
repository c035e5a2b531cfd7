//! Error types module
//!
//! All admission outcomes that are not a grant are represented by
//! `AdmissionError`. The enum self-describes its HTTP presentation through
//! the metadata accessors so the boundary adapter never matches on variants.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected client errors like validation failures
    Debug,
    /// Recoverable or suspicious conditions like failed authorization
    Warn,
    /// Unexpected failures, including issuer faults
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AdmissionError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("No files provided")]
    NoFiles,

    #[error("Too many files: {count} exceeds maximum of {max}")]
    TooManyFiles { count: usize, max: usize },

    #[error("File type not allowed: {name}")]
    InvalidFileType { name: String, extension: String },

    #[error("Credential issuance failed: {0}")]
    Issuer(String),
}

impl AdmissionError {
    /// HTTP status code to return
    pub fn http_status(&self) -> u16 {
        match self {
            AdmissionError::Unauthorized => 401,
            AdmissionError::NoFiles
            | AdmissionError::TooManyFiles { .. }
            | AdmissionError::InvalidFileType { .. } => 400,
            AdmissionError::Issuer(_) => 500,
        }
    }

    /// Machine-readable reason code (e.g. "INVALID_FILE_TYPE")
    pub fn reason_code(&self) -> &'static str {
        match self {
            AdmissionError::Unauthorized => "UNAUTHORIZED",
            AdmissionError::NoFiles => "NO_FILES",
            AdmissionError::TooManyFiles { .. } => "TOO_MANY_FILES",
            AdmissionError::InvalidFileType { .. } => "INVALID_FILE_TYPE",
            AdmissionError::Issuer(_) => "INTERNAL",
        }
    }

    pub fn log_level(&self) -> LogLevel {
        match self {
            AdmissionError::Unauthorized => LogLevel::Warn,
            AdmissionError::NoFiles
            | AdmissionError::TooManyFiles { .. }
            | AdmissionError::InvalidFileType { .. } => LogLevel::Debug,
            AdmissionError::Issuer(_) => LogLevel::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_taxonomy() {
        assert_eq!(AdmissionError::Unauthorized.http_status(), 401);
        assert_eq!(AdmissionError::NoFiles.http_status(), 400);
        assert_eq!(
            AdmissionError::TooManyFiles { count: 11, max: 10 }.http_status(),
            400
        );
        assert_eq!(
            AdmissionError::InvalidFileType {
                name: "malware.exe".to_string(),
                extension: "exe".to_string(),
            }
            .http_status(),
            400
        );
        assert_eq!(
            AdmissionError::Issuer("bucket unreachable".to_string()).http_status(),
            500
        );
    }

    #[test]
    fn test_invalid_file_type_message_names_the_file() {
        let err = AdmissionError::InvalidFileType {
            name: "malware.exe".to_string(),
            extension: "exe".to_string(),
        };
        assert!(err.to_string().contains("malware.exe"));
        assert_eq!(err.reason_code(), "INVALID_FILE_TYPE");
    }

    #[test]
    fn test_issuer_faults_map_to_internal() {
        let err = AdmissionError::Issuer("connection reset".to_string());
        assert_eq!(err.reason_code(), "INTERNAL");
        assert_eq!(err.log_level(), LogLevel::Error);
        assert!(err.to_string().contains("connection reset"));
    }
}
