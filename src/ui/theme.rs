//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Card fill colours, cycled by item index.
const CARD_PALETTE: &[(u8, u8, u8)] = &[(237, 37, 78), (249, 220, 92), (194, 234, 189)];

/// Colour behind the stack; faded cards blend toward it.
const BACKGROUND: (u8, u8, u8) = (24, 24, 28);

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── cards ──────────────────────────────────────────────────
    pub fn background() -> Color {
        let (r, g, b) = BACKGROUND;
        Color::Rgb(r, g, b)
    }

    /// Fill colour for card `index` drawn at `opacity`.
    pub fn card_color(index: usize, opacity: f64) -> Color {
        let (r, g, b) = CARD_PALETTE[index % CARD_PALETTE.len()];
        let (br, bg, bb) = BACKGROUND;
        let a = opacity.clamp(0.0, 1.0);
        let mix = |c: u8, base: u8| (base as f64 + (c as f64 - base as f64) * a).round() as u8;
        Color::Rgb(mix(r, br), mix(g, bg), mix(b, bb))
    }

    pub fn card_label_style(fill: Color) -> Style {
        Style::default()
            .bg(fill)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    }

    pub fn pinned_label_style(fill: Color) -> Style {
        Style::default()
            .bg(fill)
            .fg(Color::Black)
            .add_modifier(Modifier::ITALIC)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
