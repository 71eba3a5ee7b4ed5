//! Wire types for the file-storage API. All bodies are JSON, UTF-8.

use serde::{Deserialize, Serialize};

/// One stored file as reported by the listing endpoint.
///
/// Owned entirely by the remote API; the harness only reads and displays
/// it. `filename` is the only identity a record has, and only within a
/// single listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub filename: String,
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<String>,
    #[serde(default)]
    pub content_type: String,
}

/// Success body of `GET /files`.
#[derive(Debug, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub files: Vec<FileRecord>,
}

/// Request body of `POST /upload`. `content` is standard base64.
#[derive(Debug, Serialize)]
pub struct UploadRequest {
    pub filename: String,
    pub content: String,
}

/// Success body of `GET /download/{filename}`.
#[derive(Debug, Deserialize)]
pub struct DownloadResponse {
    pub content: String,
    #[serde(default = "default_content_type")]
    pub content_type: String,
}

fn default_content_type() -> String {
    "application/octet-stream".to_string()
}

/// Failure bodies may carry a human-readable message.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
}
