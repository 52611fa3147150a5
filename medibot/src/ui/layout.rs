//! Layout engine for medibot's single-column chat screen.
//!
//! Pure layout arithmetic plus the shared panel and status-bar widgets. It is
//! called inside `terminal.draw()` on every render so every frame reflects
//! the current terminal size.
//!
//! ```text
//! ┌ Conversation ─────────────┐
//! │ transcript (fills height) │
//! └───────────────────────────┘
//! ┌ Message · English ────────┐
//! │ input                     │
//! └───────────────────────────┘
//!  COMPOSE  status bar (1 row)
//! ```

use medibot_core::dispatcher::BackendStatus;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use crate::app::{AppState, Mode};
use crate::theme::Theme;

/// Height of the input panel, borders included.
const INPUT_HEIGHT: u16 = 3;

/// Returns `[transcript, input, status_bar]` `Rect`s for the current frame.
///
/// Valid only inside the current draw closure.
pub fn compute_layout(frame: &Frame) -> [Rect; 3] {
    frame.area().layout(&Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(INPUT_HEIGHT),
        Constraint::Length(1),
    ]))
}

/// Returns the inner `Rect` of a panel after removing the 1-cell border.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin { vertical: 1, horizontal: 1 })
}

/// Builds a bordered `Block` for a panel; the focused panel gets a thick border.
pub fn panel_block<'a>(title: Line<'a>, is_focused: bool, theme: &Theme) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_focused { BorderType::Thick } else { BorderType::Plain };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
}

/// Renders the 1-row status bar: mode, language, backend reachability, hints.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let (mode_text, mode_fg) = match state.mode {
        Mode::Compose => (" COMPOSE ", theme.status_mode_compose),
        Mode::Browse | Mode::HelpOverlay => (" BROWSE ", theme.status_mode_browse),
    };
    let (backend_text, backend_fg) = match state.backend_status {
        BackendStatus::Online => ("● online", theme.status_online),
        BackendStatus::Offline => ("● offline", theme.status_offline),
        BackendStatus::Unknown => ("○ connecting", theme.status_bar_fg),
    };
    let hint = match state.mode {
        Mode::Compose => "Enter send · Tab language · Esc browse",
        Mode::Browse | Mode::HelpOverlay => "i compose · o join call · ? help · q quit",
    };

    let mut spans = vec![
        Span::styled(mode_text, Style::default().fg(mode_fg).add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::raw(state.language.native_name()),
        Span::raw(" │ "),
        Span::styled(backend_text, Style::default().fg(backend_fg)),
    ];
    if state.awaiting_reply() {
        spans.push(Span::raw(" │ waiting for reply"));
    }
    spans.push(Span::raw(" │ "));
    spans.push(Span::raw(hint));

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}
