//! HTTP client for the three file-storage endpoints.

use reqwest::{StatusCode, Url};
use tracing::{debug, info};

use crate::api::{DownloadResponse, ErrorBody, FileRecord, ListResponse, UploadRequest};
use crate::error::ProbeError;

/// Stateless client for one base URL. Requests are independent, unordered,
/// and never retried; there is no timeout, so a hung request blocks its
/// one operation.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    /// Build a client for `base_url`. A trailing slash is stripped before
    /// use. Fails without any I/O if the URL is empty or unparsable.
    pub fn new(base_url: &str) -> Result<Self, ProbeError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ProbeError::Configuration);
        }
        let base = Url::parse(trimmed).map_err(|e| ProbeError::InvalidUrl {
            url: trimmed.to_string(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(ProbeError::InvalidUrl {
                url: trimmed.to_string(),
                reason: "not an absolute HTTP URL".to_string(),
            });
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base,
        })
    }

    /// GET /files
    pub async fn list_files(&self) -> Result<Vec<FileRecord>, ProbeError> {
        let url = self.endpoint(&["files"])?;
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await?;
        let resp = check_status(resp).await?;
        let body: ListResponse = resp.json().await?;
        info!("listed {} files", body.files.len());
        Ok(body.files)
    }

    /// POST /upload with a base64 `content` payload.
    pub async fn upload(&self, filename: &str, content: String) -> Result<(), ProbeError> {
        let url = self.endpoint(&["upload"])?;
        debug!("POST {} ({} base64 chars)", url, content.len());
        let body = UploadRequest {
            filename: filename.to_string(),
            content,
        };
        let resp = self.http.post(url).json(&body).send().await?;
        check_status(resp).await?;
        info!("uploaded {}", filename);
        Ok(())
    }

    /// GET /download/{filename}, filename percent-escaped as a path segment.
    pub async fn download(&self, filename: &str) -> Result<DownloadResponse, ProbeError> {
        let url = self.endpoint(&["download", filename])?;
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await?;
        let resp = check_status(resp).await?;
        Ok(resp.json().await?)
    }

    /// Join path segments onto the base URL, escaping each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ProbeError> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ProbeError::InvalidUrl {
                    url: self.base.to_string(),
                    reason: "not an absolute HTTP URL".to_string(),
                })?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }
}

/// Pass 2xx responses through; turn anything else into an `Api` error,
/// preferring the body's `error` field over a generic phrase.
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ProbeError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.bytes().await.unwrap_or_default();
    Err(api_error(status, &body))
}

fn api_error(status: StatusCode, body: &[u8]) -> ProbeError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| "request rejected by server".to_string());
    ProbeError::Api {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base).unwrap()
    }

    #[test]
    fn test_empty_base_url_is_configuration_error() {
        assert!(matches!(
            ApiClient::new(""),
            Err(ProbeError::Configuration)
        ));
        assert!(matches!(
            ApiClient::new("   "),
            Err(ProbeError::Configuration)
        ));
    }

    #[test]
    fn test_garbage_base_url_is_invalid() {
        assert!(matches!(
            ApiClient::new("not a url"),
            Err(ProbeError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let c = client("https://api.example.com/prod/");
        let url = c.endpoint(&["files"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/prod/files");
    }

    #[test]
    fn test_download_filename_is_escaped() {
        let c = client("https://api.example.com");
        let url = c.endpoint(&["download", "my report #1.txt"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/download/my%20report%20%231.txt"
        );
    }

    #[test]
    fn test_api_error_prefers_body_message() {
        let err = api_error(StatusCode::INTERNAL_SERVER_ERROR, br#"{"error":"boom"}"#);
        match err {
            ProbeError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_api_error_generic_phrase_for_opaque_body() {
        let err = api_error(StatusCode::BAD_GATEWAY, b"<html>nope</html>");
        match err {
            ProbeError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "request rejected by server");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_api_error_null_error_field_falls_back() {
        let err = api_error(StatusCode::NOT_FOUND, br#"{"error":null}"#);
        match err {
            ProbeError::Api { message, .. } => {
                assert_eq!(message, "request rejected by server")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
