//! Color theme system for medibot.
//!
//! A `Theme` holds named `ratatui::style::Color` fields covering every surface
//! the chat UI draws. Two built-in themes are provided:
//!
//! - `dark`: ANSI 16 colors only, safe on any terminal including plain SSH.
//! - `catppuccin_mocha`: Catppuccin Mocha palette in RGB; needs truecolor.

use ratatui::style::Color;

/// All color values used across medibot's UI surfaces.
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    /// Border of the panel that currently receives keys.
    pub border_active: Color,
    /// Border of every other panel.
    pub border_inactive: Color,

    // Transcript
    /// Sender label and text of the user's turns.
    pub user_text: Color,
    /// Sender label and text of the assistant's turns.
    pub assistant_text: Color,
    /// The pending ("thinking") indicator.
    pub pending_text: Color,

    // Match card
    pub card_border: Color,
    pub card_heading: Color,
    /// Secondary card lines (specialty, experience).
    pub card_detail: Color,
    /// The join action and meet link.
    pub card_link: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    /// Mode indicator color in COMPOSE mode.
    pub status_mode_compose: Color,
    /// Mode indicator color in BROWSE mode.
    pub status_mode_browse: Color,
    pub status_online: Color,
    pub status_offline: Color,

    // General
    pub background: Color,
}

impl Theme {
    /// Returns the built-in dark theme using ANSI 16 colors.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            user_text: Color::Green,
            assistant_text: Color::Reset,
            pending_text: Color::DarkGray,

            card_border: Color::Magenta,
            card_heading: Color::Yellow,
            card_detail: Color::Gray,
            card_link: Color::Cyan,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_mode_compose: Color::Green,
            status_mode_browse: Color::Cyan,
            status_online: Color::Green,
            status_offline: Color::Red,

            background: Color::Reset,
        }
    }

    /// Returns the Catppuccin Mocha theme using RGB truecolor values.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        let green = Color::Rgb(166, 227, 161);    // #a6e3a1
        let red = Color::Rgb(243, 139, 168);      // #f38ba8
        let yellow = Color::Rgb(249, 226, 175);   // #f9e2af
        let sapphire = Color::Rgb(116, 199, 236); // #74c7ec
        let mauve = Color::Rgb(203, 166, 247);    // #cba6f7
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let subtext0 = Color::Rgb(166, 173, 200); // #a6adc8
        let surface1 = Color::Rgb(69, 71, 90);    // #45475a
        let base = Color::Rgb(30, 30, 46);        // #1e1e2e
        let text = Color::Rgb(205, 214, 244);     // #cdd6f4

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            user_text: green,
            assistant_text: text,
            pending_text: overlay1,

            card_border: mauve,
            card_heading: yellow,
            card_detail: subtext0,
            card_link: sapphire,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_mode_compose: green,
            status_mode_browse: lavender,
            status_online: green,
            status_offline: red,

            background: base,
        }
    }

    /// Resolves a theme name from config. Unknown names fall back to `dark()`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                tracing::warn!(theme = other, "unknown theme, falling back to 'dark'");
                Self::dark()
            }
        }
    }
}
