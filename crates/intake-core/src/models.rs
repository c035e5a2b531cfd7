//! Wire-facing domain models.
//!
//! `UploadRequest` deserializes leniently: the boundary substitutes an empty
//! object for an absent or unparseable body, so every field defaults and the
//! degenerate request simply fails authorization.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A single proposed upload within a request batch.
#[derive(Debug, Clone, Deserialize)]
pub struct FileDescriptor {
    pub name: String,
    /// Declared content type; attacker-controlled and never verified against
    /// actual bytes. Defaults to a generic binary type.
    #[serde(rename = "type")]
    pub content_type: Option<String>,
}

impl FileDescriptor {
    pub fn content_type(&self) -> &str {
        self.content_type.as_deref().unwrap_or(DEFAULT_CONTENT_TYPE)
    }
}

/// One inbound request: shared secret plus an ordered batch of descriptors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadRequest {
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default)]
    pub files: Vec<FileDescriptor>,
}

/// Opaque credential returned by the issuer. Either a bare URL for a direct
/// PUT upload, or a URL plus required form fields for POST-style uploads.
/// The admission path passes it through without inspecting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCredential {
    pub url: String,
    pub fields: Option<BTreeMap<String, String>>,
}

impl UploadCredential {
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            fields: None,
        }
    }
}

/// One issued grant, in the same position as its input descriptor.
#[derive(Debug, Clone, Serialize)]
pub struct UploadGrant {
    pub name: String,
    pub url: String,
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, String>>,
}

impl UploadGrant {
    pub fn new(name: String, key: String, credential: UploadCredential) -> Self {
        Self {
            name,
            url: credential.url,
            key,
            fields: credential.fields,
        }
    }
}
