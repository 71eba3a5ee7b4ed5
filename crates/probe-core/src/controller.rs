//! Harness state and its transitions.
//!
//! One controller owns all mutable UI state (API URL, last-fetched listing,
//! in-flight flag, transient notice). At most one request is ever in
//! flight, so there is no shared mutation to coordinate.

use crate::api::FileRecord;
use crate::client::ApiClient;
use crate::error::ProbeError;

/// Severity of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// A short-lived user-visible message. The id ties a scheduled dismissal
/// to the message it was scheduled for: a newer message gets a new id, so
/// a stale timer firing late is a no-op instead of dismissing the wrong
/// notice.
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    pub id: u64,
}

/// Explicit state struct for the harness, updated only via the transition
/// methods below.
#[derive(Debug, Default)]
pub struct Harness {
    api_url: Option<String>,
    files: Vec<FileRecord>,
    in_flight: bool,
    notice: Option<Notice>,
    next_notice_id: u64,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the base URL with any trailing slash stripped. An empty or
    /// whitespace-only string clears the configuration.
    pub fn set_api_url(&mut self, url: &str) {
        let trimmed = url.trim().trim_end_matches('/');
        self.api_url = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    pub fn api_url(&self) -> Option<&str> {
        self.api_url.as_deref()
    }

    /// Build a client for the configured URL. This is the configuration
    /// check: it fails before any network I/O when no URL is set.
    pub fn client(&self) -> Result<ApiClient, ProbeError> {
        let url = self.api_url.as_deref().ok_or(ProbeError::Configuration)?;
        ApiClient::new(url)
    }

    /// Mark a request as started. Returns false (and changes nothing) if
    /// one is already outstanding.
    pub fn request_started(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    pub fn request_finished(&mut self) {
        self.in_flight = false;
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Replace the listing wholesale with a fresh fetch.
    pub fn files_loaded(&mut self, files: Vec<FileRecord>) {
        self.files = files;
    }

    /// A failed list call empties the collection. Upload and download
    /// failures do not touch it.
    pub fn list_failed(&mut self) {
        self.files.clear();
    }

    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    /// Show a notice, replacing any current one. Returns the id the caller
    /// should hand to the dismissal timer.
    pub fn message_shown(&mut self, text: impl Into<String>, kind: NoticeKind) -> u64 {
        self.next_notice_id += 1;
        let id = self.next_notice_id;
        self.notice = Some(Notice {
            text: text.into(),
            kind,
            id,
        });
        id
    }

    /// Dismiss the notice `id` was issued for. Stale ids (a newer message
    /// has since been shown) leave the current notice untouched. Returns
    /// true if a notice was actually cleared.
    pub fn message_expired(&mut self, id: u64) -> bool {
        match &self.notice {
            Some(notice) if notice.id == id => {
                self.notice = None;
                true
            }
            _ => false,
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(filename: &str) -> FileRecord {
        FileRecord {
            filename: filename.to_string(),
            size: 1,
            uploaded_at: None,
            content_type: "text/plain".to_string(),
        }
    }

    #[test]
    fn test_set_api_url_strips_trailing_slash() {
        let mut h = Harness::new();
        h.set_api_url("https://api.example.com/prod/");
        assert_eq!(h.api_url(), Some("https://api.example.com/prod"));
    }

    #[test]
    fn test_empty_url_clears_configuration() {
        let mut h = Harness::new();
        h.set_api_url("https://api.example.com");
        h.set_api_url("   ");
        assert_eq!(h.api_url(), None);
    }

    #[test]
    fn test_client_without_url_is_configuration_error() {
        let h = Harness::new();
        let err = h.client().unwrap_err();
        assert!(matches!(err, ProbeError::Configuration));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_in_flight_guard_rejects_second_start() {
        let mut h = Harness::new();
        assert!(!h.in_flight());
        assert!(h.request_started());
        assert!(h.in_flight());
        assert!(!h.request_started());
        h.request_finished();
        assert!(!h.in_flight());
        assert!(h.request_started());
    }

    #[test]
    fn test_files_loaded_replaces_wholesale() {
        let mut h = Harness::new();
        h.files_loaded(vec![record("old.txt")]);
        h.files_loaded(vec![record("new.txt")]);
        assert_eq!(h.files().len(), 1);
        assert_eq!(h.files()[0].filename, "new.txt");
    }

    #[test]
    fn test_list_failure_clears_listing() {
        let mut h = Harness::new();
        h.files_loaded(vec![record("a.txt"), record("b.txt")]);
        h.list_failed();
        assert!(h.files().is_empty());
    }

    #[test]
    fn test_stale_dismissal_is_a_noop() {
        let mut h = Harness::new();
        let first = h.message_shown("uploaded", NoticeKind::Success);
        let second = h.message_shown("boom", NoticeKind::Error);
        assert!(!h.message_expired(first));
        assert_eq!(h.notice().unwrap().text, "boom");
        assert!(h.message_expired(second));
        assert!(h.notice().is_none());
    }

    #[test]
    fn test_dismissal_after_clear_is_a_noop() {
        let mut h = Harness::new();
        let id = h.message_shown("hi", NoticeKind::Info);
        assert!(h.message_expired(id));
        assert!(!h.message_expired(id));
    }
}
