//! Central application state for medibot.
//!
//! `AppState` owns everything the event loop mutates: the input mode, the
//! compose buffer, the language selector, the transcript scroll position, and
//! the conversation [`Controller`]. No ratatui rendering logic lives here.

use medibot_core::controller::{Controller, Exchange, ExchangeState};
use medibot_core::dispatcher::BackendStatus;
use medibot_core::locale::Language;

/// Which keybinding set is active.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Typing into the input box (default). Enter submits.
    #[default]
    Compose,
    /// Scrolling the transcript with vim-style keys.
    Browse,
    /// Full-screen help overlay is shown above the transcript.
    HelpOverlay,
}

/// All mutable UI state passed through every render cycle.
pub struct AppState {
    pub mode: Mode,
    /// The language selector. Read at submit time and again at reply time.
    pub language: Language,
    pub controller: Controller,

    /// Text typed into the input box, not yet submitted.
    pub input: String,
    /// Cursor position in `input`, counted in chars.
    pub input_cursor: usize,

    /// Vertical scroll offset of the transcript, in wrapped rows.
    pub transcript_scroll: u16,
    /// When true, every render pins the transcript to its last row.
    pub follow_latest: bool,
    /// Inner height of the transcript panel, cached after each render.
    pub transcript_viewport_height: u16,
    /// Total wrapped rows of the transcript, cached after each render.
    pub transcript_rows: u16,

    pub help_scroll: u16,
    pub backend_status: BackendStatus,
    /// Advances on every tick; drives the pending-indicator animation.
    pub tick: u64,
}

impl AppState {
    pub fn new(controller: Controller, language: Language) -> Self {
        Self {
            mode: Mode::default(),
            language,
            controller,
            input: String::new(),
            input_cursor: 0,
            transcript_scroll: 0,
            follow_latest: true,
            transcript_viewport_height: 0,
            transcript_rows: 0,
            help_scroll: 0,
            backend_status: BackendStatus::default(),
            tick: 0,
        }
    }

    /// True while a request is outstanding.
    pub fn awaiting_reply(&self) -> bool {
        self.controller.state() == ExchangeState::AwaitingReply
    }

    /// Submits the input buffer.
    ///
    /// The buffer is cleared only when the controller accepts the submission,
    /// so text typed while a reply is outstanding is kept for the next try.
    pub fn submit_input(&mut self) -> Option<Exchange> {
        let exchange = self.controller.submit(&self.input, self.language)?;
        self.input.clear();
        self.input_cursor = 0;
        self.follow_latest = true;
        Some(exchange)
    }

    /// Moves the language selector and re-localizes the greeting.
    pub fn select_language(&mut self, language: Language) {
        if language == self.language {
            return;
        }
        tracing::info!(from = %self.language, to = %language, "language changed");
        self.language = language;
        self.controller.change_language(language);
    }

    pub fn cycle_language(&mut self) {
        self.select_language(self.language.next());
    }

    // ---------------------------------------------------------------------
    // Input editing
    // ---------------------------------------------------------------------

    fn byte_index(&self, char_index: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_index)
            .map_or(self.input.len(), |(i, _)| i)
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.input_cursor);
        self.input.insert(at, c);
        self.input_cursor += 1;
    }

    /// Deletes the char before the cursor.
    pub fn backspace(&mut self) {
        if self.input_cursor == 0 {
            return;
        }
        self.input_cursor -= 1;
        let at = self.byte_index(self.input_cursor);
        self.input.remove(at);
    }

    /// Deletes the char under the cursor.
    pub fn delete(&mut self) {
        if self.input_cursor < self.input.chars().count() {
            let at = self.byte_index(self.input_cursor);
            self.input.remove(at);
        }
    }

    pub fn cursor_left(&mut self) {
        self.input_cursor = self.input_cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        self.input_cursor = (self.input_cursor + 1).min(self.input.chars().count());
    }

    pub fn cursor_home(&mut self) {
        self.input_cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.input_cursor = self.input.chars().count();
    }

    // ---------------------------------------------------------------------
    // Transcript scrolling
    // ---------------------------------------------------------------------

    /// Largest scroll offset that still fills the viewport.
    pub fn max_scroll(&self) -> u16 {
        self.transcript_rows.saturating_sub(self.transcript_viewport_height)
    }

    /// Scrolls the transcript up by `lines` rows and stops following the tail.
    pub fn scroll_up(&mut self, lines: u16) {
        self.transcript_scroll = self.transcript_scroll.min(self.max_scroll()).saturating_sub(lines);
        self.follow_latest = false;
    }

    /// Scrolls the transcript down; reaching the bottom resumes following.
    pub fn scroll_down(&mut self, lines: u16) {
        self.transcript_scroll = self.transcript_scroll.saturating_add(lines).min(self.max_scroll());
        self.follow_latest = self.transcript_scroll >= self.max_scroll();
    }

    pub fn scroll_top(&mut self) {
        self.transcript_scroll = 0;
        self.follow_latest = false;
    }

    pub fn scroll_bottom(&mut self) {
        self.transcript_scroll = self.max_scroll();
        self.follow_latest = true;
    }

    pub fn half_page_up(&mut self) {
        self.scroll_up((self.transcript_viewport_height / 2).max(1));
    }

    pub fn half_page_down(&mut self) {
        self.scroll_down((self.transcript_viewport_height / 2).max(1));
    }
}
