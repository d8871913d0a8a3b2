//! Workshop palette and semantic styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Core Palette ──────────────────────────────────────────────────────

pub const AMBER: Color = Color::Rgb(255, 184, 76); // #ffb84c
pub const SAGE: Color = Color::Rgb(152, 214, 160); // #98d6a0
pub const CLAY: Color = Color::Rgb(232, 122, 93); // #e87a5d
pub const HONEY: Color = Color::Rgb(246, 220, 134); // #f6dc86
pub const MOSS: Color = Color::Rgb(102, 204, 120); // #66cc78
pub const BRICK: Color = Color::Rgb(240, 86, 86); // #f05656

// ── Extended Palette ──────────────────────────────────────────────────

pub const LINEN: Color = Color::Rgb(222, 214, 200); // #ded6c8
pub const DRIFTWOOD: Color = Color::Rgb(130, 118, 104); // #827668
pub const BG_HIGHLIGHT: Color = Color::Rgb(52, 44, 38); // #342c26
pub const BG_DARK: Color = Color::Rgb(32, 28, 25); // #201c19

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(AMBER).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(AMBER)
}

pub fn border_default() -> Style {
    Style::default().fg(DRIFTWOOD)
}

pub fn table_header() -> Style {
    Style::default()
        .fg(SAGE)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn table_row() -> Style {
    Style::default().fg(LINEN)
}

/// Selected / highlighted table row.
pub fn table_selected() -> Style {
    Style::default()
        .fg(AMBER)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_active() -> Style {
    Style::default().fg(AMBER).add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(LINEN)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(DRIFTWOOD)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(SAGE).add_modifier(Modifier::BOLD)
}

/// A control that cannot be used right now.
pub fn disabled() -> Style {
    Style::default()
        .fg(DRIFTWOOD)
        .add_modifier(Modifier::DIM | Modifier::CROSSED_OUT)
}

/// Text input with focus.
pub fn input_active() -> Style {
    Style::default().fg(HONEY).bg(BG_HIGHLIGHT)
}

pub fn input_idle() -> Style {
    Style::default().fg(LINEN)
}
