//! Shared test doubles for the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use medibot_core::dispatcher::{BackendStatus, Dispatcher};
use medibot_core::error::TransportError;
use medibot_core::locale::Language;
use medibot_core::types::{ChatRequest, DiagnosticReply};

/// Dispatcher that answers from a queue and records every request it sees.
pub struct ScriptedDispatcher {
    replies: Mutex<VecDeque<Result<DiagnosticReply, TransportError>>>,
    pub requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedDispatcher {
    pub fn new() -> Self {
        Self { replies: Mutex::new(VecDeque::new()), requests: Mutex::new(Vec::new()) }
    }

    /// Queues a reply decoded from a JSON body, exactly as the backend would send it.
    pub fn queue_json(&self, body: &str) {
        let reply = DiagnosticReply::from_json(body).expect("test reply must decode");
        self.replies.lock().unwrap().push_back(Ok(reply));
    }

    pub fn queue_error(&self, error: TransportError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Dispatcher for ScriptedDispatcher {
    async fn send(
        &self,
        message: &str,
        session_id: &str,
        language: Language,
    ) -> Result<DiagnosticReply, TransportError> {
        self.requests.lock().unwrap().push(ChatRequest {
            user_id: session_id.to_owned(),
            message: message.to_owned(),
            language: language.code().to_owned(),
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Status { status: 503, body: "no reply queued".into() }))
    }

    async fn health(&self) -> BackendStatus {
        BackendStatus::Online
    }
}
