//! Interaction controller: the `Idle` / `AwaitingReply` state machine.
//!
//! The controller never awaits anything itself. [`Controller::submit`] records
//! the user turn, shows the pending indicator and hands back an [`Exchange`];
//! the runtime runs the exchange off the event loop and feeds its outcome to
//! [`Controller::on_reply`]. Keeping the suspension point outside the
//! controller is what lets the UI keep drawing and reading keys while a
//! request is in flight.
//!
//! The active language is passed into every call rather than stored, so a
//! reply is localized with whatever the selector shows when it arrives.

use std::sync::Arc;

use crate::dispatcher::Dispatcher;
use crate::error::TransportError;
use crate::locale::{Language, LocalizationTable};
use crate::transcript::{PendingHandle, Transcript};
use crate::types::{DiagnosticReply, Diagnosis, Turn};

/// Where the controller is in the request lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeState {
    /// Ready for a submission.
    Idle,
    /// One request is outstanding; submissions are ignored.
    AwaitingReply,
}

/// One dispatched request, ready to be awaited off the event loop.
pub struct Exchange {
    dispatcher: Arc<dyn Dispatcher>,
    message: String,
    session_id: String,
    language: Language,
}

impl Exchange {
    /// The trimmed message being sent.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Language selected at submit time, sent to the backend.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Sends the request and waits for the reply.
    ///
    /// # Errors
    ///
    /// Propagates the dispatcher's [`TransportError`].
    pub async fn run(self) -> Result<DiagnosticReply, TransportError> {
        self.dispatcher
            .send(&self.message, &self.session_id, self.language)
            .await
    }
}

/// Turns submissions and replies into transcript updates.
pub struct Controller {
    table: Arc<LocalizationTable>,
    dispatcher: Arc<dyn Dispatcher>,
    session_id: String,
    transcript: Transcript,
    state: ExchangeState,
    pending: Option<PendingHandle>,
}

impl Controller {
    /// Creates an idle controller whose transcript opens with the greeting
    /// for `language`.
    pub fn new(
        table: Arc<LocalizationTable>,
        dispatcher: Arc<dyn Dispatcher>,
        session_id: impl Into<String>,
        language: Language,
    ) -> Self {
        let transcript = Transcript::with_greeting(table.entry(language).greeting.clone());
        Self {
            table,
            dispatcher,
            session_id: session_id.into(),
            transcript,
            state: ExchangeState::Idle,
            pending: None,
        }
    }

    pub fn state(&self) -> ExchangeState {
        self.state
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Mutable access for the view, which consumes scroll requests.
    pub fn transcript_mut(&mut self) -> &mut Transcript {
        &mut self.transcript
    }

    pub fn table(&self) -> &LocalizationTable {
        &self.table
    }

    pub fn dispatcher(&self) -> Arc<dyn Dispatcher> {
        Arc::clone(&self.dispatcher)
    }

    /// Handles a submit event.
    ///
    /// Returns `None` without touching the transcript when `text` is blank or
    /// a request is already outstanding. Otherwise appends the user turn and
    /// the pending indicator, moves to [`ExchangeState::AwaitingReply`], and
    /// returns the exchange the caller must run.
    pub fn submit(&mut self, text: &str, language: Language) -> Option<Exchange> {
        let message = text.trim();
        if message.is_empty() {
            return None;
        }
        if self.state == ExchangeState::AwaitingReply {
            tracing::debug!("submit ignored while a reply is outstanding");
            return None;
        }

        self.transcript.append_turn(Turn::user(message));
        let thinking = self.table.entry(language).lookup("thinking", "...").to_owned();
        self.pending = Some(self.transcript.append_pending(thinking));
        self.state = ExchangeState::AwaitingReply;
        tracing::info!(language = %language, chars = message.chars().count(), "message submitted");

        Some(Exchange {
            dispatcher: Arc::clone(&self.dispatcher),
            message: message.to_owned(),
            session_id: self.session_id.clone(),
            language,
        })
    }

    /// Handles the outcome of the outstanding exchange.
    ///
    /// `language` is the selector's value now, not at submit time. Outcomes
    /// arriving while idle are dropped.
    pub fn on_reply(&mut self, outcome: Result<DiagnosticReply, TransportError>, language: Language) {
        if self.state != ExchangeState::AwaitingReply {
            tracing::warn!("reply arrived with no request outstanding; dropped");
            return;
        }
        if let Some(handle) = self.pending.take() {
            self.transcript.remove_pending(handle);
        }
        self.state = ExchangeState::Idle;

        match outcome {
            Ok(DiagnosticReply::Question { message }) => {
                self.transcript.append_turn(Turn::assistant(message));
            }
            Ok(DiagnosticReply::Diagnosis(diagnosis)) => self.render_diagnosis(diagnosis, language),
            Ok(DiagnosticReply::Unrecognized { kind }) => {
                tracing::info!(kind = %kind, "unrecognized reply rendered as nothing");
            }
            Err(err) => {
                tracing::error!(error = %err, "chat request failed");
                let text = self.table.entry(language).lookup("error", "Error").to_owned();
                self.transcript.append_turn(Turn::assistant(text));
            }
        }
    }

    /// Handles a language-change event. Only the greeting is re-localized.
    pub fn change_language(&mut self, language: Language) {
        let entry = self.table.entry(language);
        self.transcript.relocalize_greeting(entry);
    }

    fn render_diagnosis(&mut self, diagnosis: Diagnosis, language: Language) {
        let offers_call = diagnosis.offers_video_call();
        let Diagnosis { message, doctor, specialty, .. } = diagnosis;
        self.transcript.append_turn(Turn::assistant(message));

        match doctor {
            Some(provider) if offers_call => {
                self.transcript.render_match_card(
                    &provider,
                    language,
                    specialty.as_deref(),
                    &self.table,
                );
            }
            _ => {
                let text = self.table.entry(language).lookup("no_doc", "No doctor available").to_owned();
                self.transcript.append_turn(Turn::assistant(text));
            }
        }
    }
}
