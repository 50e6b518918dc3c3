//! Request and response payloads exchanged with the slide API.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlideFormsError};

/// A file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub name: String,
    pub bytes: Vec<u8>,
    pub mime: String,
}

impl FileUpload {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>, mime: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bytes,
            mime: mime.into(),
        }
    }

    /// Read a file from disk, guessing the MIME type from its extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| SlideFormsError::Storage(Box::new(e)))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        Ok(Self::new(name, bytes, mime.essence_str()))
    }
}

/// Design category a file is filed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category(String);

impl Category {
    /// Returns `None` for a blank selection.
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            None
        } else {
            Some(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Category {
    fn default() -> Self {
        Self("general".to_string())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Quality rating attached to an uploaded design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    High,
    #[default]
    Medium,
    Low,
}

impl Quality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Quality {
    type Err = SlideFormsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(SlideFormsError::Config(format!("unknown quality: {other}"))),
        }
    }
}

/// Multipart payload for `/api/upload-design`.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub file: FileUpload,
    pub category: Category,
    pub quality: Quality,
}

/// JSON payload for `/api/generate`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest<'a> {
    pub content: &'a str,
}

/// JSON payload for `/api/generate-slides`.
#[derive(Debug, Clone, Serialize)]
pub struct SlideRequest<'a> {
    pub content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub design_preference: Option<&'a str>,
}

/// Body of a `/api/generate` response.
///
/// Failure replies may carry only a `message`, so a missing `status` reads
/// as empty and counts as a failure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerationResult {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub download_url: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl GenerationResult {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Body of a `/api/generate-slides` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SlidesReceipt {
    pub download_url: String,
    #[serde(default)]
    pub presentation_id: Option<i64>,
    #[serde(default)]
    pub slide_count: Option<u32>,
    #[serde(default)]
    pub generation_time: Option<f64>,
}

/// Body of a successful `/api/upload-design` response.
///
/// The endpoint makes no promises about its body, so every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UploadReceipt {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub uploaded_files: Vec<UploadedFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadedFile {
    pub filename: String,
    #[serde(default)]
    pub asset_id: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Body of `/api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// Failure body. Older endpoints use `error`, newer ones `message`.
///
/// Both are kept as raw JSON: servers have been seen to put numbers there.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub error: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<serde_json::Value>,
}

impl ErrorPayload {
    pub fn error_text(&self) -> Option<String> {
        self.error.as_ref().and_then(shown_text)
    }

    pub fn message_text(&self) -> Option<String> {
        self.message.as_ref().and_then(shown_text)
    }
}

/// Text a page would show for a JSON value, or `None` for falsy values.
fn shown_text(value: &serde_json::Value) -> Option<String> {
    use serde_json::Value;

    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
