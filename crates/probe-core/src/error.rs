use thiserror::Error;

/// Everything that can go wrong during one user-triggered operation.
///
/// Configuration problems are detected before any network I/O; transport
/// and API failures are distinguished so the user can tell "the request
/// never completed" apart from "the server said no".
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("no API URL configured — pass --api-url or use the `url` command")]
    Configuration,
    #[error("invalid API URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },
    #[error("could not read {path}: {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    FileWrite {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

impl ProbeError {
    /// True for errors caught before any request was issued.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration | Self::InvalidUrl { .. })
    }
}
