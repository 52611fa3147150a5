//! Append-only conversation transcript.
//!
//! Turns are only ever appended; the one exception to "nothing is removed" is
//! the transient pending indicator, which lives beside the turns rather than
//! among them. Every append raises a scroll-to-latest request that the view
//! consumes with [`Transcript::take_scroll_request`].

use crate::locale::{Language, LocalizationEntry, LocalizationTable};
use crate::types::{MatchCard, Provider, Sender, Turn};

/// Identifies the pending indicator returned by [`Transcript::append_pending`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingHandle(u64);

#[derive(Debug, Clone)]
struct Pending {
    handle: PendingHandle,
    text: String,
}

/// The ordered list of rendered turns plus at most one pending indicator.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
    pending: Option<Pending>,
    next_handle: u64,
    scroll_requested: bool,
}

impl Transcript {
    /// Creates a transcript that opens with `greeting` as its first assistant turn.
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        let mut transcript = Self::default();
        transcript.append_turn(Turn::assistant(greeting));
        transcript
    }

    /// All committed turns, oldest first.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Text of the pending indicator, if one is shown.
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.text.as_str())
    }

    /// Appends `turn` after every existing turn and requests scroll-to-latest.
    pub fn append_turn(&mut self, turn: Turn) {
        self.turns.push(turn);
        self.scroll_requested = true;
    }

    /// Shows a pending indicator with `text` below the last turn.
    ///
    /// Only one indicator exists at a time; showing a second replaces the first
    /// and invalidates its handle.
    pub fn append_pending(&mut self, text: impl Into<String>) -> PendingHandle {
        if let Some(previous) = &self.pending {
            tracing::warn!(handle = previous.handle.0, "replacing an outstanding pending indicator");
        }
        let handle = PendingHandle(self.next_handle);
        self.next_handle += 1;
        self.pending = Some(Pending { handle, text: text.into() });
        self.scroll_requested = true;
        handle
    }

    /// Removes the pending indicator if `handle` still identifies it.
    ///
    /// Returns `true` when an indicator was removed.
    pub fn remove_pending(&mut self, handle: PendingHandle) -> bool {
        match &self.pending {
            Some(p) if p.handle == handle => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Appends an assistant turn carrying a match card for `provider`.
    ///
    /// The specialty label is resolved from `canonical_specialty`, not from the
    /// provider's own specialty string: localized label, then the canonical
    /// identifier. When no canonical identifier was sent
    /// the provider's specialty string is shown verbatim.
    pub fn render_match_card(
        &mut self,
        provider: &Provider,
        language: Language,
        canonical_specialty: Option<&str>,
        table: &LocalizationTable,
    ) {
        let entry = table.entry(language);
        let specialty_label = match canonical_specialty.map(str::trim) {
            Some(id) if !id.is_empty() => table.resolve_specialty(language, id),
            _ if !provider.specialty.trim().is_empty() => provider.specialty.trim().to_owned(),
            _ => table.resolve_specialty(language, ""),
        };
        let card = MatchCard {
            heading: entry.lookup("match", "Match Found").to_owned(),
            doctor_name: provider.name.clone(),
            specialty_label,
            experience: provider.experience.clone(),
            meet_link: provider.meet_link.clone(),
            join_label: entry.lookup("join_btn", "Join Video Call").to_owned(),
        };
        let body = format!("{}: {}", card.heading, card.doctor_name);
        self.append_turn(Turn { sender: Sender::Assistant, body, attachment: Some(card) });
    }

    /// Rewrites the first assistant turn with `entry`'s greeting.
    ///
    /// History is never translated; only the opening greeting follows the
    /// language selector. Does not request a scroll.
    pub fn relocalize_greeting(&mut self, entry: &LocalizationEntry) {
        if let Some(first) = self.turns.iter_mut().find(|t| t.sender == Sender::Assistant) {
            first.body = entry.lookup("greeting", &first.body).to_owned();
        }
    }

    /// The most recent match card, if any turn carries one.
    pub fn latest_match_card(&self) -> Option<&MatchCard> {
        self.turns.iter().rev().find_map(|t| t.attachment.as_ref())
    }

    /// Returns and clears the scroll-to-latest request raised by appends.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_requested)
    }
}
