//! UI rendering for medibot.
//!
//! `render()` is the single entry point called by the event loop's
//! `terminal.draw()` closure. Layout arithmetic lives in `layout.rs` and the
//! transcript text builder in `transcript_view.rs`.

mod layout;
pub mod help;
pub mod keybindings;
pub mod transcript_view;

use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::app::{AppState, Mode};
use crate::theme::Theme;
use layout::{compute_layout, inner_rect, panel_block, render_status_bar};

/// Renders one complete frame: transcript, input box, status bar, and the
/// help overlay when it is open.
///
/// Called exactly once per `AppEvent::Render`. Viewport height and wrapped row
/// count are written back into `state` so the next scroll key can clamp
/// against them.
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let [transcript_area, input_area, status_bar] = compute_layout(frame);

    render_transcript(frame, transcript_area, state, theme);
    render_input(frame, input_area, state, theme);
    render_status_bar(frame, status_bar, state, theme);

    if state.mode == Mode::HelpOverlay {
        help::render_help_overlay(frame, theme, &mut state.help_scroll);
    }
}

fn render_transcript(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let inner = inner_rect(area);
    if state.controller.transcript_mut().take_scroll_request() {
        state.follow_latest = true;
    }

    let text = transcript_view::build_text(state.controller.transcript(), theme, state.tick);
    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .style(Style::default().bg(theme.background));

    state.transcript_viewport_height = inner.height;
    state.transcript_rows = u16::try_from(paragraph.line_count(inner.width)).unwrap_or(u16::MAX);
    state.transcript_scroll = if state.follow_latest {
        state.max_scroll()
    } else {
        state.transcript_scroll.min(state.max_scroll())
    };

    let focused = state.mode == Mode::Browse;
    frame.render_widget(panel_block(Line::from(" Conversation "), focused, theme), area);
    frame.render_widget(paragraph.scroll((state.transcript_scroll, 0)), inner);
}

fn render_input(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let inner = inner_rect(area);
    let focused = state.mode == Mode::Compose;
    let title = Line::from(format!(" Message · {} ", state.language.native_name()));
    frame.render_widget(panel_block(title, focused, theme), area);

    // Horizontal scroll: drop leading chars until the cursor fits in the box.
    let chars: Vec<char> = state.input.chars().collect();
    let cursor = state.input_cursor.min(chars.len());
    let mut start = 0;
    while start < cursor && text_width(&chars[start..cursor]) >= inner.width as usize {
        start += 1;
    }

    let visible: String = chars[start..].iter().collect();
    frame.render_widget(
        Paragraph::new(Line::from(visible)).style(Style::default().bg(theme.background)),
        inner,
    );

    if focused && inner.width > 0 && inner.height > 0 {
        let offset = u16::try_from(text_width(&chars[start..cursor])).unwrap_or(inner.width);
        frame.set_cursor_position(Position {
            x: inner.x + offset.min(inner.width - 1),
            y: inner.y,
        });
    }
}

fn text_width(chars: &[char]) -> usize {
    Span::raw(chars.iter().collect::<String>()).width()
}
