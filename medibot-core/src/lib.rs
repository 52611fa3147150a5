//! Conversation lifecycle for the MediBot client.
//!
//! Everything here is terminal-agnostic: the `medibot` binary owns drawing and
//! input, this crate owns what a submission turns into.
//!
//! - [`locale`]: per-language UI strings and specialty labels.
//! - [`session`]: the process-wide client identifier sent with every request.
//! - [`types`]: wire types for the diagnostic backend and transcript turns.
//! - [`dispatcher`]: the request/response seam and its HTTP implementation.
//! - [`transcript`]: the append-only transcript and pending indicator.
//! - [`controller`]: the `Idle` / `AwaitingReply` state machine.

pub mod controller;
pub mod dispatcher;
pub mod error;
pub mod locale;
pub mod session;
pub mod transcript;
pub mod types;
