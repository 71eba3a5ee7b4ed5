//! Base64 transcoding between local binary files and the API's text
//! representation. The entire payload is held in memory for one call, so
//! this is only suitable for small and medium files.

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::error::ProbeError;

/// Decoded download payload tagged with its MIME type, ready to be written
/// to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadBlob {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Base64-encode binary content for the upload body.
pub fn encode_for_upload(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Read a local file fully into memory and encode it. Read failures carry
/// the offending path so they can be shown to the user.
pub fn encode_file(path: &Path) -> Result<String, ProbeError> {
    let bytes = std::fs::read(path).map_err(|source| ProbeError::FileRead {
        path: path.display().to_string(),
        source,
    })?;
    Ok(encode_for_upload(&bytes))
}

/// Decode a download payload and tag it with `content_type`. Tolerates a
/// `data:...;base64,` prefix and surrounding whitespace.
pub fn decode_for_download(content: &str, content_type: &str) -> Result<DownloadBlob, ProbeError> {
    let bytes = BASE64.decode(strip_data_url_prefix(content.trim()))?;
    Ok(DownloadBlob {
        bytes,
        content_type: content_type.to_string(),
    })
}

/// Strip a data-URL scheme prefix (`data:<mime>;base64,`) if present,
/// leaving the bare base64 payload.
pub fn strip_data_url_prefix(content: &str) -> &str {
    if !content.starts_with("data:") {
        return content;
    }
    match content.split_once(',') {
        Some((_, payload)) => payload,
        None => content,
    }
}
