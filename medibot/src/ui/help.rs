//! Help overlay renderer.
//!
//! Draws a centred modal over the chat screen. `Clear` erases the area first,
//! so the overlay is drawn in the same `terminal.draw()` closure as the panels.

use ratatui::{
    Frame,
    layout::Constraint,
    style::{Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

/// Largest `help_scroll` the key handlers may set: the last line at the top.
pub fn max_scroll() -> u16 {
    u16::try_from(build_help_text().lines.len().saturating_sub(1)).unwrap_or(u16::MAX)
}

/// Renders the help overlay, scrolled by `help_scroll` rows.
///
/// `help_scroll` is clamped so the last wrapped row sits at the bottom of the
/// box. Skipped on terminals narrower than 40 columns, where the centred
/// `Rect` would be too small to hold a bordered block.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: &mut u16) {
    if frame.area().width < 40 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(80), Constraint::Percentage(80));
    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help · j/k scroll, ? or Esc to close ")
        .border_style(Style::default().fg(theme.border_active));

    let paragraph = Paragraph::new(build_help_text()).wrap(Wrap { trim: false });
    let inner = block.inner(overlay_area);
    let rows = u16::try_from(paragraph.line_count(inner.width)).unwrap_or(u16::MAX);
    *help_scroll = (*help_scroll).min(rows.saturating_sub(inner.height));

    frame.render_widget(
        paragraph.block(block).scroll((*help_scroll, 0)),
        overlay_area,
    );
}

fn heading(text: &'static str) -> Line<'static> {
    Line::styled(text, Style::default().add_modifier(Modifier::BOLD))
}

fn build_help_text() -> Text<'static> {
    Text::from(vec![
        heading("Compose (typing a message)"),
        Line::from("  Enter         Send the message"),
        Line::from("  Tab / S-Tab   Next / previous language"),
        Line::from("  ← → Home End  Move the cursor"),
        Line::from("  PgUp / PgDn   Scroll the conversation"),
        Line::from("  Esc           Switch to Browse"),
        Line::from(""),
        heading("Browse (reading the conversation)"),
        Line::from("  j / k         Scroll down / up one line"),
        Line::from("  g / G         Jump to top / latest"),
        Line::from("  Ctrl-d / u    Scroll half page down / up"),
        Line::from("  l / h         Next / previous language"),
        Line::from("  o             Join the latest video call"),
        Line::from("  i / Enter     Back to Compose"),
        Line::from("  q / Esc       Quit"),
        Line::from(""),
        heading("Anywhere"),
        Line::from("  F1            Open / close this help"),
        Line::from("  F2            Next language"),
        Line::from("  Ctrl-c        Quit"),
        Line::from(""),
        Line::from("Changing language re-translates the greeting and applies to"),
        Line::from("the next message and the next reply. Earlier turns are kept"),
        Line::from("as they were."),
    ])
}
