use crate::board::ItemId;
use crate::util::{strip_control_chars, validate_base_url, UrlValidationError};
use futures::StreamExt;
use reqwest::redirect::Policy;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Largest task response body accepted (64 KiB). The endpoint only returns a
/// short message, so anything bigger is treated as malformed.
const MAX_RESPONSE_SIZE: usize = 64 * 1024;

/// Default bound on one task request, including reading the body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    #[error("Response too large (exceeds {0} bytes)")]
    ResponseTooLarge(usize),
    #[error("Invalid UTF-8 in response")]
    InvalidUtf8,
    #[error("Malformed response body: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] UrlValidationError),
    #[error("Task panicked: {0}")]
    Panicked(String),
}

/// Coarse failure category, kept for diagnostics only. Users always see the
/// same generic failure message regardless of kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No response reached us (timeout, refused connection, DNS).
    Transport,
    /// The server answered with a non-2xx status.
    Http,
    /// The body could not be read as `{"message": string}`.
    Parse,
    /// Misconfiguration or a panic inside the task.
    Internal,
}

impl TaskError {
    pub fn kind(&self) -> FailureKind {
        match self {
            TaskError::Timeout(_) | TaskError::Network(_) => FailureKind::Transport,
            TaskError::HttpStatus(_) => FailureKind::Http,
            TaskError::ResponseTooLarge(_) | TaskError::InvalidUtf8 | TaskError::Parse(_) => {
                FailureKind::Parse
            }
            TaskError::ClientBuild(_) | TaskError::InvalidBaseUrl(_) | TaskError::Panicked(_) => {
                FailureKind::Internal
            }
        }
    }
}

/// Runs the remote task for one item.
///
/// Implementations hold no per-call state: each `run` is an independent
/// request/response mapping. The returned future must be `Send` so the
/// controller can spawn it.
pub trait TaskRunner: Clone + Send + Sync + 'static {
    fn run(&self, id: ItemId) -> impl Future<Output = Result<String, TaskError>> + Send;
}

#[derive(Deserialize)]
struct TaskResponse {
    message: String,
}

/// HTTP implementation of [`TaskRunner`] against `GET {base}/api/task/{id}`.
#[derive(Clone)]
pub struct TaskClient {
    http: reqwest::Client,
    base_url: Arc<str>,
    timeout: Duration,
    token: Option<Arc<SecretString>>,
}

impl std::fmt::Debug for TaskClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Redirects are capped at 3 hops and loops are rejected.
fn create_redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() >= 3 {
            return attempt.error("Too many redirects (max 3)");
        }
        let url = attempt.url();
        if attempt.previous().iter().any(|prev| prev == url) {
            return attempt.error("Redirect loop detected");
        }
        tracing::debug!(to = %url, hop = attempt.previous().len() + 1, "Following redirect");
        attempt.follow()
    })
}

impl TaskClient {
    /// Build a client for `base_url`.
    ///
    /// Plain `http://` is only accepted for loopback hosts, so a bearer
    /// token is never sent in the clear to a remote server.
    pub fn new(
        base_url: &str,
        timeout: Duration,
        token: Option<SecretString>,
    ) -> Result<Self, TaskError> {
        let url = validate_base_url(base_url)?;
        let base = url.as_str().trim_end_matches('/');

        let http = reqwest::Client::builder()
            .redirect(create_redirect_policy())
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()
            .map_err(TaskError::ClientBuild)?;

        tracing::debug!(base_url = %base, timeout_secs = timeout.as_secs(), "Task client ready");

        Ok(Self {
            http,
            base_url: Arc::from(base),
            timeout,
            token: token.map(Arc::new),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn task_url(&self, id: ItemId) -> String {
        format!("{}/api/task/{}", self.base_url, id)
    }

    async fn fetch(&self, id: ItemId) -> Result<String, TaskError> {
        let mut request = self.http.get(self.task_url(id));
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {}", token.expose_secret()));
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(TaskError::HttpStatus(response.status().as_u16()));
        }

        let body = read_limited_text(response, MAX_RESPONSE_SIZE).await?;
        let parsed: TaskResponse = serde_json::from_str(&body)?;
        Ok(strip_control_chars(&parsed.message).into_owned())
    }
}

impl TaskRunner for TaskClient {
    fn run(&self, id: ItemId) -> impl Future<Output = Result<String, TaskError>> + Send {
        async move {
            tracing::debug!(id, "Running task");
            tokio::time::timeout(self.timeout, self.fetch(id))
                .await
                .map_err(|_| TaskError::Timeout(self.timeout))?
        }
    }
}

async fn read_limited_text(response: reqwest::Response, limit: usize) -> Result<String, TaskError> {
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(TaskError::ResponseTooLarge(limit));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(TaskError::ResponseTooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }

    String::from_utf8(bytes).map_err(|_| TaskError::InvalidUtf8)
}
