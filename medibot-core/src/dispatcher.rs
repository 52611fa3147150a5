//! Request dispatch to the diagnostic backend.
//!
//! [`Dispatcher`] is the seam the controller talks through. [`HttpDispatcher`]
//! is the real implementation; tests substitute a scripted one.
//!
//! A dispatcher holds no conversation state: the backend tracks history per
//! `user_id`, and the client-side transcript belongs to the controller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::TransportError;
use crate::locale::Language;
use crate::types::{ChatRequest, DiagnosticReply};

/// Reachability of the backend as reported by its health endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackendStatus {
    /// No probe has completed yet.
    #[default]
    Unknown,
    Online,
    Offline,
}

/// Sends one user message and waits for the backend's structured reply.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Sends `message` on behalf of `session_id` in `language`.
    ///
    /// Resolves exactly once. Never retries.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the backend is unreachable, answers
    /// with a non-2xx status, times out, or sends an unreadable body.
    async fn send(
        &self,
        message: &str,
        session_id: &str,
        language: Language,
    ) -> Result<DiagnosticReply, TransportError>;

    /// Probes the backend's health endpoint.
    async fn health(&self) -> BackendStatus;
}

/// Default client-side timeout for a chat request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
struct HealthBody {
    #[serde(default)]
    status: String,
}

/// [`Dispatcher`] over HTTP: `POST {base_url}/chat` and `GET {base_url}/`.
pub struct HttpDispatcher {
    client: Client,
    chat_url: String,
    health_url: String,
    timeout: Duration,
}

impl HttpDispatcher {
    /// Creates a dispatcher for the backend rooted at `base_url`.
    ///
    /// `timeout` bounds each whole request, connect through body.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Request`] if the HTTP client cannot be built
    /// (e.g. the TLS backend fails to initialise).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::Request)?;
        let base = base_url.trim_end_matches('/');
        Ok(Self {
            client,
            chat_url: format!("{base}/chat"),
            health_url: format!("{base}/"),
            timeout,
        })
    }

    /// URL chat requests are posted to.
    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }
}

#[async_trait]
impl Dispatcher for HttpDispatcher {
    async fn send(
        &self,
        message: &str,
        session_id: &str,
        language: Language,
    ) -> Result<DiagnosticReply, TransportError> {
        let request = ChatRequest {
            user_id: session_id.to_owned(),
            message: message.to_owned(),
            language: language.code().to_owned(),
        };
        tracing::debug!(url = %self.chat_url, language = %language, "sending chat request");

        let response = self
            .client
            .post(&self.chat_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(e, &self.chat_url, self.timeout))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::from_reqwest(e, &self.chat_url, self.timeout))?;

        if !status.is_success() {
            return Err(TransportError::Status { status: status.as_u16(), body });
        }

        let reply = DiagnosticReply::from_json(&body)?;
        if let DiagnosticReply::Unrecognized { kind } = &reply {
            tracing::warn!(kind = %kind, "backend sent a reply type this client does not know");
        }
        Ok(reply)
    }

    async fn health(&self) -> BackendStatus {
        let response = match self.client.get(&self.health_url).send().await {
            Ok(r) if r.status().is_success() => r,
            Ok(r) => {
                tracing::info!(status = %r.status(), "health probe failed");
                return BackendStatus::Offline;
            }
            Err(e) => {
                tracing::info!(error = %e, "health probe failed");
                return BackendStatus::Offline;
            }
        };
        match response.json::<HealthBody>().await {
            Ok(body) if body.status == "online" => BackendStatus::Online,
            Ok(body) => {
                tracing::info!(status = %body.status, "backend reports itself not online");
                BackendStatus::Offline
            }
            Err(e) => {
                tracing::info!(error = %e, "health probe body unreadable");
                BackendStatus::Offline
            }
        }
    }
}
