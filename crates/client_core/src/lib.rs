use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{header, Client};
use shared::{
    domain::ActivityDirectory,
    error::ErrorBody,
    protocol::{MutationAck, MutationKind, ACTIVITIES_PATH, CACHE_BUST_PARAM, EMAIL_PARAM},
};
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

pub mod error;
pub mod notifier;

pub use error::{ClientSetupError, FetchError, MutationError};
pub use notifier::{Notice, NoticeKind, Notifier, StatusMessage, NOTICE_DISMISS_AFTER};
pub use reqwest::StatusCode;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred";

/// The remote activity directory: one read and two mutations.
#[async_trait]
pub trait DirectoryService: Send + Sync {
    async fn fetch_directory(&self) -> Result<ActivityDirectory, FetchError>;
    /// Returns the server's success message.
    async fn signup(&self, activity: &str, email: &str) -> Result<String, MutationError>;
    /// Returns the server's success message.
    async fn unregister(&self, activity: &str, email: &str) -> Result<String, MutationError>;
}

/// Result of a signup or unregister attempt as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub ok: bool,
    pub message: String,
}

impl Outcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }

    pub fn from_result(kind: MutationKind, result: &Result<String, MutationError>) -> Self {
        match result {
            Ok(message) => Self::success(message.clone()),
            Err(err) => Self::failure(failure_message(kind, err)),
        }
    }

    pub fn notice_kind(&self) -> NoticeKind {
        if self.ok {
            NoticeKind::Success
        } else {
            NoticeKind::Error
        }
    }
}

pub fn failure_message(kind: MutationKind, err: &MutationError) -> String {
    match err {
        MutationError::Rejected { detail, .. } => detail
            .clone()
            .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
        MutationError::Transport(_) | MutationError::MalformedAck(_) => {
            transport_failure_message(kind).to_string()
        }
        MutationError::Invalid { .. } => invalid_request_message(kind).to_string(),
    }
}

pub fn transport_failure_message(kind: MutationKind) -> &'static str {
    match kind {
        MutationKind::Signup => "Failed to sign up. Please try again.",
        MutationKind::Unregister => "Failed to unregister participant. Please try again.",
    }
}

fn invalid_request_message(kind: MutationKind) -> &'static str {
    match kind {
        MutationKind::Signup => "Please choose an activity and enter an email.",
        MutationKind::Unregister => "Missing activity or participant to unregister.",
    }
}

/// Structural check applied before any mutation is sent.
pub fn validate_mutation(activity: &str, email: &str) -> Result<(), MutationError> {
    if activity.trim().is_empty() {
        return Err(MutationError::Invalid { field: "activity" });
    }
    if email.trim().is_empty() {
        return Err(MutationError::Invalid { field: "email" });
    }
    Ok(())
}

fn cache_bust_token() -> String {
    format!(
        "{}-{}",
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple()
    )
}

/// HTTP client for the directory service.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    http: Client,
    base_url: Url,
}

impl DirectoryClient {
    pub fn new(server_url: &str) -> Result<Self, ClientSetupError> {
        Self::with_timeout(server_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(server_url: &str, timeout: Duration) -> Result<Self, ClientSetupError> {
        let base_url = Url::parse(server_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ClientSetupError::UnsupportedServerUrl(
                server_url.to_string(),
            ));
        }
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// `POST /activities/{activity}/{kind}?email={email}`, with the path
    /// segment and query value percent-encoded.
    pub fn mutation_url(&self, kind: MutationKind, activity: &str, email: &str) -> Url {
        let mut url = self.endpoint([ACTIVITIES_PATH, activity, kind.path_segment()]);
        url.query_pairs_mut().append_pair(EMAIL_PARAM, email);
        url
    }

    async fn mutate(
        &self,
        kind: MutationKind,
        activity: &str,
        email: &str,
    ) -> Result<String, MutationError> {
        let url = self.mutation_url(kind, activity, email);
        debug!(kind = kind.path_segment(), %url, "sending mutation");

        let response = self
            .http
            .post(url)
            .send()
            .await
            .map_err(MutationError::Transport)?;
        let status = response.status();
        let body = response.bytes().await.map_err(MutationError::Transport)?;

        if status.is_success() {
            let ack: MutationAck =
                serde_json::from_slice(&body).map_err(MutationError::MalformedAck)?;
            info!(kind = kind.path_segment(), activity, "mutation accepted");
            return Ok(ack.message);
        }

        let detail = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|body| body.detail_text().map(str::to_owned));
        warn!(
            kind = kind.path_segment(),
            activity,
            %status,
            detail = detail.as_deref().unwrap_or(""),
            "mutation rejected"
        );
        Err(MutationError::Rejected { status, detail })
    }
}

#[async_trait]
impl DirectoryService for DirectoryClient {
    async fn fetch_directory(&self) -> Result<ActivityDirectory, FetchError> {
        let url = self.endpoint([ACTIVITIES_PATH]);
        let cache_bust = cache_bust_token();
        debug!(%url, cache_bust = %cache_bust, "fetching activity directory");

        let response = self
            .http
            .get(url)
            .query(&[(CACHE_BUST_PARAM, cache_bust.as_str())])
            .header(header::CACHE_CONTROL, "no-store")
            .header(header::PRAGMA, "no-cache")
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await.map_err(FetchError::Transport)?;
        let directory: ActivityDirectory = serde_json::from_slice(&body)?;
        debug!(activities = directory.len(), "activity directory fetched");
        Ok(directory)
    }

    async fn signup(&self, activity: &str, email: &str) -> Result<String, MutationError> {
        self.mutate(MutationKind::Signup, activity, email).await
    }

    async fn unregister(&self, activity: &str, email: &str) -> Result<String, MutationError> {
        self.mutate(MutationKind::Unregister, activity, email).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
