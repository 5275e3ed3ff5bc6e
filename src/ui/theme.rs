//! Colour palette and text styles used across the UI.
//!
//! `primary` stands in for the page's `--color-primary` token.

use ratatui::style::{Color, Modifier, Style};

/// Central theme.  Change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    pub const PRIMARY: Color = Color::Cyan;

    // ── navbar ─────────────────────────────────────────────────
    pub fn navbar_style() -> Style {
        Style::default().bg(Color::Black).fg(Color::White)
    }

    /// Bottom edge drawn under the navbar once the page is scrolled.
    pub fn navbar_shadow_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn brand_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn nav_link_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn active_link_style() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn focused_style() -> Style {
        Style::default().add_modifier(Modifier::REVERSED)
    }

    // ── content ────────────────────────────────────────────────
    pub fn heading_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn button_style() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    pub fn card_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn card_title_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    /// Cards mid-transition.
    pub fn fading_style() -> Style {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
