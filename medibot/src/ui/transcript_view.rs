//! Turns the transcript into styled `Text` for the transcript panel.
//!
//! Each turn becomes a sender label line followed by its indented body lines,
//! with a blank line between turns. A turn carrying a match card gets the card
//! drawn under its label with box-drawing gutter characters; the pending
//! indicator is drawn last with a spinner frame chosen by the tick counter.

use medibot_core::transcript::Transcript;
use medibot_core::types::{MatchCard, Sender, Turn};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::theme::Theme;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const INDENT: &str = "  ";

/// Builds the full transcript text, oldest turn first.
pub fn build_text(transcript: &Transcript, theme: &Theme, tick: u64) -> Text<'static> {
    let mut lines: Vec<Line<'static>> = Vec::new();

    for (i, turn) in transcript.turns().iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        push_turn(&mut lines, turn, theme);
    }

    if let Some(text) = transcript.pending() {
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        let frame = SPINNER[(tick % SPINNER.len() as u64) as usize];
        lines.push(sender_label(Sender::Assistant, theme));
        lines.push(Line::from(vec![
            Span::raw(INDENT),
            Span::styled(
                format!("{frame} {text}"),
                Style::default().fg(theme.pending_text).add_modifier(Modifier::ITALIC),
            ),
        ]));
    }

    Text::from(lines)
}

fn sender_label(sender: Sender, theme: &Theme) -> Line<'static> {
    let (label, color) = match sender {
        Sender::User => ("You", theme.user_text),
        Sender::Assistant => ("MediBot", theme.assistant_text),
    };
    Line::from(Span::styled(
        label,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

fn push_turn(lines: &mut Vec<Line<'static>>, turn: &Turn, theme: &Theme) {
    let color = match turn.sender {
        Sender::User => theme.user_text,
        Sender::Assistant => theme.assistant_text,
    };
    lines.push(sender_label(turn.sender, theme));

    match &turn.attachment {
        Some(card) => push_card(lines, card, theme),
        None => {
            for body_line in turn.body.lines() {
                lines.push(Line::from(vec![
                    Span::raw(INDENT),
                    Span::styled(body_line.to_owned(), Style::default().fg(color)),
                ]));
            }
        }
    }
}

fn push_card(lines: &mut Vec<Line<'static>>, card: &MatchCard, theme: &Theme) {
    let gutter = Style::default().fg(theme.card_border);
    let detail = Style::default().fg(theme.card_detail);

    lines.push(Line::from(vec![
        Span::styled(format!("{INDENT}┌ "), gutter),
        Span::styled(
            format!("{}: {}", card.heading, card.doctor_name),
            Style::default().fg(theme.card_heading).add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled(format!("{INDENT}│ "), gutter),
        Span::styled(card.specialty_label.clone(), detail),
    ]));
    if !card.experience.trim().is_empty() {
        lines.push(Line::from(vec![
            Span::styled(format!("{INDENT}│ "), gutter),
            Span::styled(format!("Exp: {}", card.experience), detail),
        ]));
    }
    lines.push(Line::from(vec![
        Span::styled(format!("{INDENT}│ "), gutter),
        Span::styled(
            format!("▶ {}", card.join_label),
            Style::default().fg(theme.card_link).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" [o]", detail),
    ]));
    lines.push(Line::from(vec![
        Span::styled(format!("{INDENT}└ "), gutter),
        Span::styled(
            card.meet_link.clone(),
            Style::default().fg(theme.card_link).add_modifier(Modifier::UNDERLINED),
        ),
    ]));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &Text<'_>) -> Vec<String> {
        text.lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn turns_are_labelled_and_separated() {
        let mut transcript = Transcript::with_greeting("Hello!");
        transcript.append_turn(Turn::user("line one\nline two"));

        let lines = plain(&build_text(&transcript, &Theme::dark(), 0));

        assert_eq!(lines, vec!["MediBot", "  Hello!", "", "You", "  line one", "  line two"]);
    }

    #[test]
    fn pending_indicator_is_drawn_last_with_spinner() {
        let mut transcript = Transcript::with_greeting("Hello!");
        transcript.append_pending("AI is thinking...");

        let lines = plain(&build_text(&transcript, &Theme::dark(), 1));

        assert_eq!(lines.last().unwrap(), &format!("  {} AI is thinking...", SPINNER[1]));
    }

    #[test]
    fn match_card_shows_every_provider_field() {
        let mut transcript = Transcript::default();
        transcript.append_turn(Turn {
            sender: Sender::Assistant,
            body: "Match Found: Dr. A".into(),
            attachment: Some(MatchCard {
                heading: "Match Found".into(),
                doctor_name: "Dr. A".into(),
                specialty_label: "Cardiology".into(),
                experience: "10 yrs".into(),
                meet_link: "https://x".into(),
                join_label: "Join Video Call".into(),
            }),
        });

        let joined = plain(&build_text(&transcript, &Theme::dark(), 0)).join("\n");

        for needle in ["Match Found: Dr. A", "Cardiology", "Exp: 10 yrs", "▶ Join Video Call", "https://x"] {
            assert!(joined.contains(needle), "missing {needle:?} in\n{joined}");
        }
    }
}
