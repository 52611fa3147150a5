//! Process-wide client identity.
//!
//! The backend keys its per-user triage history on `user_id`, so every request
//! from one run of the client must carry the same value. The id is generated
//! on first use and never written anywhere; a new run starts a new session.

use std::sync::OnceLock;

static SESSION_ID: OnceLock<String> = OnceLock::new();

/// Length of the random part of the id, after the `user_` prefix.
const RANDOM_LEN: usize = 9;

/// Returns the session id for this process, generating it on first call.
///
/// Format: `user_` followed by 9 lowercase hex characters taken from a UUID v4.
/// Collision-resistant enough for a shared backend session pool; not a secret.
pub fn current_session_id() -> &'static str {
    SESSION_ID.get_or_init(generate)
}

fn generate() -> String {
    let random = uuid::Uuid::new_v4().simple().to_string();
    let id = format!("user_{}", &random[..RANDOM_LEN]);
    tracing::debug!(session_id = %id, "generated session id");
    id
}
