use reqwest::StatusCode;
use thiserror::Error;

/// Failure while retrieving the activity directory. The caller must not
/// partially render on any of these.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("activity directory request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("activity directory request returned status {0}")]
    Status(StatusCode),
    #[error("activity directory payload could not be parsed: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum MutationError {
    #[error("request rejected with status {status}")]
    Rejected {
        status: StatusCode,
        detail: Option<String>,
    },
    #[error("request failed before a response was received: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("success response could not be parsed: {0}")]
    MalformedAck(#[source] serde_json::Error),
    #[error("missing {field}")]
    Invalid { field: &'static str },
}

#[derive(Debug, Error)]
pub enum ClientSetupError {
    #[error("invalid server url: {0}")]
    InvalidServerUrl(#[from] url::ParseError),
    #[error("server url '{0}' cannot carry a path")]
    UnsupportedServerUrl(String),
    #[error("failed to build http client: {0}")]
    Http(#[from] reqwest::Error),
}
