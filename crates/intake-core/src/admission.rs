//! Upload admission validation
//!
//! Provides the pure half of the admission decision:
//! - shared-secret authorization
//! - batch size checks
//! - per-file extension allowlisting, first failure wins
//! - deterministic storage key derivation
//!
//! Credential issuance is delegated to the `intake-storage` issuer and
//! composed with this module by the api crate's admission service.

use crate::config::Config;
use crate::error::AdmissionError;
use crate::models::FileDescriptor;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;
use std::time::Duration;
use subtle::ConstantTimeEq;

/// Characters NOT allowed in a sanitized file name. Everything outside word
/// characters, "." and "-" becomes an underscore, so no separator or
/// traversal sequence survives into the storage key.
static DISALLOWED_NAME_CHARS: OnceLock<Regex> = OnceLock::new();

fn disallowed_name_chars() -> &'static Regex {
    DISALLOWED_NAME_CHARS.get_or_init(|| Regex::new(r"[^\w.\-]").expect("static regex"))
}

/// Immutable admission policy, built once from configuration and shared by
/// every request for the process lifetime.
#[derive(Clone, Debug)]
pub struct AdmissionPolicy {
    expected_secret: String,
    allowed_extensions: HashSet<String>,
    pub max_files: usize,
    pub url_expiry: Duration,
    pub client_tag: Option<String>,
}

impl AdmissionPolicy {
    pub fn new(
        expected_secret: String,
        allowed_extensions: impl IntoIterator<Item = String>,
        max_files: usize,
        url_expiry: Duration,
        client_tag: Option<String>,
    ) -> Self {
        Self {
            expected_secret,
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|e| e.to_lowercase())
                .collect(),
            max_files,
            url_expiry,
            client_tag,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.upload_secret.clone(),
            config.allowed_extensions.iter().cloned(),
            config.max_files_per_request,
            Duration::from_secs(config.url_expiration_secs),
            config.client_tag.clone(),
        )
    }

    /// Check the shared secret. Constant-time comparison so the check leaks
    /// nothing beyond the inherent exact-match semantics.
    pub fn authorize(&self, secret: Option<&str>) -> Result<(), AdmissionError> {
        let presented = secret.unwrap_or_default();
        if !secure_compare(presented, &self.expected_secret) {
            return Err(AdmissionError::Unauthorized);
        }
        Ok(())
    }

    pub fn extension_allowed(&self, extension: &str) -> bool {
        self.allowed_extensions.contains(extension)
    }

    /// Validate an authorized batch and derive one storage key per file.
    ///
    /// Checks run in order: non-empty, count limit, then each file in input
    /// order with the first failing file aborting the whole batch. All keys
    /// in a batch share one `KeyPrefix`.
    pub fn plan_batch(
        &self,
        files: &[FileDescriptor],
        prefix: &KeyPrefix,
    ) -> Result<Vec<PlannedUpload>, AdmissionError> {
        if files.is_empty() {
            return Err(AdmissionError::NoFiles);
        }
        if files.len() > self.max_files {
            return Err(AdmissionError::TooManyFiles {
                count: files.len(),
                max: self.max_files,
            });
        }

        let mut planned = Vec::with_capacity(files.len());
        for file in files {
            let extension = file_extension(&file.name);
            if !self.extension_allowed(&extension) {
                return Err(AdmissionError::InvalidFileType {
                    name: file.name.clone(),
                    extension,
                });
            }
            planned.push(PlannedUpload {
                name: file.name.clone(),
                content_type: file.content_type().to_string(),
                key: prefix.key_for(&file.name),
            });
        }
        Ok(planned)
    }
}

fn secure_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// A validated file together with its derived storage key, ready for
/// credential issuance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedUpload {
    pub name: String,
    pub content_type: String,
    pub key: String,
}

/// Per-request key prefix: UTC date partition plus an epoch-seconds
/// uniqueness token, sampled once and shared by every file in the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPrefix {
    date_partition: String,
    token: i64,
}

impl KeyPrefix {
    pub fn now() -> Self {
        Self::at(Utc::now())
    }

    pub fn at(instant: DateTime<Utc>) -> Self {
        Self {
            date_partition: instant.format("%Y-%m-%d").to_string(),
            token: instant.timestamp(),
        }
    }

    /// Derive the storage key for one file name: `{date}/{token}_{sanitized}`.
    pub fn key_for(&self, name: &str) -> String {
        format!(
            "{}/{}_{}",
            self.date_partition,
            self.token,
            sanitize_file_name(name)
        )
    }
}

/// Extract the lower-cased extension: the substring after the last ".".
///
/// A dot-less name yields the whole name as its own "extension", which will
/// almost always fail the allowlist. This matches the behavior the service
/// has always had; callers should not special-case it.
pub fn file_extension(name: &str) -> String {
    name.rsplit('.').next().unwrap_or(name).to_lowercase()
}

/// Replace every character outside `[\w.\-]` with an underscore. Idempotent.
pub fn sanitize_file_name(name: &str) -> String {
    disallowed_name_chars().replace_all(name, "_").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn policy() -> AdmissionPolicy {
        AdmissionPolicy::new(
            "good".to_string(),
            ["pdf", "png", "jpg", "csv", "txt"]
                .iter()
                .map(|s| s.to_string()),
            10,
            Duration::from_secs(3600),
            None,
        )
    }

    fn files(names: &[&str]) -> Vec<FileDescriptor> {
        names
            .iter()
            .map(|n| FileDescriptor {
                name: n.to_string(),
                content_type: None,
            })
            .collect()
    }

    fn prefix() -> KeyPrefix {
        KeyPrefix::at(Utc.with_ymd_and_hms(2026, 8, 27, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_authorize_exact_match_only() {
        let policy = policy();
        assert!(policy.authorize(Some("good")).is_ok());
        assert!(matches!(
            policy.authorize(Some("wrong")),
            Err(AdmissionError::Unauthorized)
        ));
        assert!(matches!(
            policy.authorize(Some("")),
            Err(AdmissionError::Unauthorized)
        ));
        assert!(matches!(
            policy.authorize(None),
            Err(AdmissionError::Unauthorized)
        ));
        // prefix of the real secret must not pass
        assert!(policy.authorize(Some("goo")).is_err());
    }

    #[test]
    fn test_empty_batch_rejected() {
        assert!(matches!(
            policy().plan_batch(&[], &prefix()),
            Err(AdmissionError::NoFiles)
        ));
    }

    #[test]
    fn test_count_limit_checked_before_per_file_validation() {
        let names: Vec<String> = (0..11).map(|i| format!("f{}.exe", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        // 11 invalid files: the count check must win over INVALID_FILE_TYPE
        match policy().plan_batch(&files(&refs), &prefix()) {
            Err(AdmissionError::TooManyFiles { count, max }) => {
                assert_eq!(count, 11);
                assert_eq!(max, 10);
            }
            other => panic!("Expected TooManyFiles, got {:?}", other),
        }
    }

    #[test]
    fn test_first_failing_file_wins() {
        let batch = files(&["ok.pdf", "bad.exe", "worse.sh"]);
        match policy().plan_batch(&batch, &prefix()) {
            Err(AdmissionError::InvalidFileType { name, extension }) => {
                assert_eq!(name, "bad.exe");
                assert_eq!(extension, "exe");
            }
            other => panic!("Expected InvalidFileType, got {:?}", other),
        }
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        let planned = policy()
            .plan_batch(&files(&["My File #1.PNG"]), &prefix())
            .unwrap();
        assert_eq!(planned[0].key, "2026-08-27/1787832000_My_File__1.PNG");
    }

    #[test]
    fn test_dotless_name_is_its_own_extension() {
        assert_eq!(file_extension("README"), "readme");
        assert!(matches!(
            policy().plan_batch(&files(&["README"]), &prefix()),
            Err(AdmissionError::InvalidFileType { .. })
        ));
        // a dot-less name that happens to equal an allowed extension passes
        let planned = policy().plan_batch(&files(&["pdf"]), &prefix()).unwrap();
        assert_eq!(planned[0].key, "2026-08-27/1787832000_pdf");
    }

    #[test]
    fn test_plan_preserves_input_order() {
        let planned = policy()
            .plan_batch(&files(&["a.pdf", "b.png", "c.csv"]), &prefix())
            .unwrap();
        let names: Vec<&str> = planned.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["a.pdf", "b.png", "c.csv"]);
    }

    #[test]
    fn test_default_content_type_applied() {
        let batch = vec![FileDescriptor {
            name: "report.pdf".to_string(),
            content_type: Some("application/pdf".to_string()),
        }];
        let planned = policy().plan_batch(&batch, &prefix()).unwrap();
        assert_eq!(planned[0].content_type, "application/pdf");

        let planned = policy().plan_batch(&files(&["report.pdf"]), &prefix()).unwrap();
        assert_eq!(planned[0].content_type, "application/octet-stream");
    }

    #[test]
    fn test_sanitize_replaces_disallowed_characters() {
        assert_eq!(sanitize_file_name("My File #1.PNG"), "My_File__1.PNG");
        assert_eq!(sanitize_file_name("report.pdf"), "report.pdf");
        assert_eq!(sanitize_file_name("a/b\\c.txt"), "a_b_c.txt");
        assert_eq!(sanitize_file_name("q?.csv"), "q_.csv");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let once = sanitize_file_name("My File #1 (final).PNG");
        assert_eq!(sanitize_file_name(&once), once);
    }

    #[test]
    fn test_key_cannot_traverse_paths() {
        let key = prefix().key_for("../../etc/passwd");
        assert_eq!(key, "2026-08-27/1787832000_.._.._etc_passwd");
        assert!(!key.contains("/../"));
    }

    #[test]
    fn test_key_determinism() {
        let p = prefix();
        assert_eq!(p.key_for("report.pdf"), p.key_for("report.pdf"));
        assert_ne!(p.key_for("report.pdf"), p.key_for("other.pdf"));
        // names that sanitize identically collide within one batch
        assert_eq!(p.key_for("a b.pdf"), p.key_for("a#b.pdf"));
    }

    #[test]
    fn test_key_matches_documented_pattern() {
        let key = prefix().key_for("report.pdf");
        assert_eq!(key, "2026-08-27/1787832000_report.pdf");
    }
}
