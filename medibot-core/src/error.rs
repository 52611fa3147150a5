//! Failure taxonomy for talking to the diagnostic backend.

use std::time::Duration;

use thiserror::Error;

/// Why a request to the backend produced no usable reply.
///
/// Every variant is recovered the same way by the controller: one localized
/// error turn, then back to idle. The variants exist for logging.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The backend could not be reached at all.
    #[error("connection to {url} failed: {source}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// No response arrived within the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The backend answered with a non-2xx status.
    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not a reply this client can read.
    #[error("unreadable reply: {0}")]
    Decode(#[from] serde_json::Error),

    /// Any other transport-level failure (building the request, reading the body).
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
}

impl TransportError {
    /// Maps a reqwest error into the taxonomy, using `timeout` for the message.
    pub fn from_reqwest(err: reqwest::Error, url: &str, timeout: Duration) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(timeout)
        } else if err.is_connect() {
            TransportError::Connect { url: url.to_owned(), source: err }
        } else {
            TransportError::Request(err)
        }
    }
}
