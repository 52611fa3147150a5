//! Keybinding dispatcher for medibot.
//!
//! Translates raw crossterm `KeyEvent`s into `AppState` mutations and returns a
//! `KeyAction` telling the event loop what to do next. The dispatcher branches
//! first on `state.mode` so Compose, Browse and HelpOverlay each have an
//! isolated handler.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use medibot_core::controller::Exchange;

use crate::app::{AppState, Mode};
use crate::ui::help;

/// Control-flow signal returned from the key dispatcher.
pub enum KeyAction {
    /// Nothing for the loop to do beyond the next render.
    Continue,
    /// Exit cleanly.
    Quit,
    /// A submission was accepted; the loop must run the exchange.
    Send(Exchange),
    /// Open this meet link outside the terminal.
    Join(String),
}

/// Dispatches a key event to the handler matching the current mode.
pub fn handle_key(key: KeyEvent, state: &mut AppState) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }
    match state.mode {
        Mode::Compose => handle_compose(key, state),
        Mode::Browse => handle_browse(key, state),
        Mode::HelpOverlay => handle_help(key, state),
    }
}

// ---------------------------------------------------------------------------
// Compose mode
// ---------------------------------------------------------------------------

fn handle_compose(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Enter => match state.submit_input() {
            Some(exchange) => KeyAction::Send(exchange),
            None => KeyAction::Continue,
        },
        KeyCode::Tab | KeyCode::F(2) => {
            state.cycle_language();
            KeyAction::Continue
        }
        KeyCode::BackTab => {
            state.select_language(state.language.prev());
            KeyAction::Continue
        }
        KeyCode::Esc => {
            state.mode = Mode::Browse;
            KeyAction::Continue
        }
        KeyCode::F(1) => {
            open_help(state);
            KeyAction::Continue
        }
        KeyCode::Backspace => { state.backspace(); KeyAction::Continue }
        KeyCode::Delete => { state.delete(); KeyAction::Continue }
        KeyCode::Left => { state.cursor_left(); KeyAction::Continue }
        KeyCode::Right => { state.cursor_right(); KeyAction::Continue }
        KeyCode::Home => { state.cursor_home(); KeyAction::Continue }
        KeyCode::End => { state.cursor_end(); KeyAction::Continue }
        KeyCode::PageUp => { state.half_page_up(); KeyAction::Continue }
        KeyCode::PageDown => { state.half_page_down(); KeyAction::Continue }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.insert_char(c);
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

// ---------------------------------------------------------------------------
// Browse mode
// ---------------------------------------------------------------------------

fn handle_browse(key: KeyEvent, state: &mut AppState) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => { state.scroll_down(1); KeyAction::Continue }
        KeyCode::Char('k') | KeyCode::Up => { state.scroll_up(1); KeyAction::Continue }
        KeyCode::Char('g') | KeyCode::Home => { state.scroll_top(); KeyAction::Continue }
        KeyCode::Char('G') | KeyCode::End => { state.scroll_bottom(); KeyAction::Continue }
        KeyCode::Char('d') if ctrl => { state.half_page_down(); KeyAction::Continue }
        KeyCode::Char('u') if ctrl => { state.half_page_up(); KeyAction::Continue }
        KeyCode::PageDown => { state.half_page_down(); KeyAction::Continue }
        KeyCode::PageUp => { state.half_page_up(); KeyAction::Continue }

        KeyCode::Char('i') | KeyCode::Enter => {
            state.mode = Mode::Compose;
            KeyAction::Continue
        }
        KeyCode::Char('l') | KeyCode::Tab | KeyCode::F(2) => {
            state.cycle_language();
            KeyAction::Continue
        }
        KeyCode::Char('h') | KeyCode::BackTab => {
            state.select_language(state.language.prev());
            KeyAction::Continue
        }
        KeyCode::Char('o') => match state.controller.transcript().latest_match_card() {
            Some(card) => KeyAction::Join(card.meet_link.clone()),
            None => KeyAction::Continue,
        },
        KeyCode::Char('?') | KeyCode::F(1) => {
            open_help(state);
            KeyAction::Continue
        }
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        _ => KeyAction::Continue,
    }
}

// ---------------------------------------------------------------------------
// HelpOverlay mode
// ---------------------------------------------------------------------------

fn open_help(state: &mut AppState) {
    state.help_scroll = 0;
    state.mode = Mode::HelpOverlay;
}

fn scroll_help(state: &mut AppState, delta: i32) {
    let target = (i32::from(state.help_scroll) + delta).clamp(0, i32::from(help::max_scroll()));
    state.help_scroll = u16::try_from(target).unwrap_or(0);
}

/// `?`, `Esc`, `q` or `F1` close the overlay and land in Browse mode.
fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => scroll_help(state, 1),
        KeyCode::Char('k') | KeyCode::Up => scroll_help(state, -1),
        KeyCode::Char('g') => state.help_scroll = 0,
        KeyCode::Char('G') => state.help_scroll = help::max_scroll(),
        KeyCode::F(2) => state.cycle_language(),
        KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc | KeyCode::F(1) => {
            state.mode = Mode::Browse;
        }
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Mouse events
// ---------------------------------------------------------------------------

/// Scroll wheel moves the transcript, or the help overlay when it is open, by 3 rows.
pub fn handle_mouse(mouse: MouseEvent, state: &mut AppState) {
    let in_help = state.mode == Mode::HelpOverlay;
    match mouse.kind {
        MouseEventKind::ScrollUp if in_help => scroll_help(state, -3),
        MouseEventKind::ScrollDown if in_help => scroll_help(state, 3),
        MouseEventKind::ScrollUp => state.scroll_up(3),
        MouseEventKind::ScrollDown => state.scroll_down(3),
        _ => {}
    }
}
