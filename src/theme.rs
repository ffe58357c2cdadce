//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes,
//! and `StyleMap` resolves role names to concrete styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Build the `ColorPalette` for this variant.
    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Cycle to the next variant: Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette
// ============================================================================

/// Every semantic UI role mapped to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Header and pills --
    pub title_bar: Style,
    pub pill: Style,
    pub pill_active: Style,

    // -- Cards --
    pub card_border: Style,
    pub card_selected: Style,
    pub card_title: Style,
    pub card_caption: Style,
    pub card_fallback: Style,

    // -- Page states --
    pub placeholder: Style,
    pub loading: Style,
    pub error: Style,

    // -- Chrome --
    pub status_bar: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            title_bar: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            pill: Style::default().fg(Color::Gray),
            pill_active: Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            card_border: Style::default().fg(Color::DarkGray),
            card_selected: Style::default().fg(Color::Cyan),
            card_title: Style::default().add_modifier(Modifier::BOLD),
            card_caption: Style::default().fg(Color::Gray),
            card_fallback: Style::default().fg(Color::DarkGray),

            placeholder: Style::default().fg(Color::DarkGray),
            loading: Style::default().fg(Color::Cyan),
            error: Style::default().fg(Color::Red),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
        }
    }

    fn light() -> Self {
        Self {
            title_bar: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            pill: Style::default().fg(Color::DarkGray),
            pill_active: Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            card_border: Style::default().fg(Color::Gray),
            card_selected: Style::default().fg(Color::Blue),
            card_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            card_caption: Style::default().fg(Color::DarkGray),
            card_fallback: Style::default().fg(Color::Gray),

            placeholder: Style::default().fg(Color::DarkGray),
            loading: Style::default().fg(Color::Blue),
            error: Style::default().fg(Color::Red),

            status_bar: Style::default().bg(Color::White).fg(Color::Black),
        }
    }
}

// ============================================================================
// Style Map
// ============================================================================

/// String-keyed style lookup built from a `ColorPalette`.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 12] = [
    "title_bar",
    "pill",
    "pill_active",
    "card_border",
    "card_selected",
    "card_title",
    "card_caption",
    "card_fallback",
    "placeholder",
    "loading",
    "error",
    "status_bar",
];

impl StyleMap {
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 12] = [
            p.title_bar,
            p.pill,
            p.pill_active,
            p.card_border,
            p.card_selected,
            p.card_title,
            p.card_caption,
            p.card_fallback,
            p.placeholder,
            p.loading,
            p.error,
            p.status_bar,
        ];

        let map = ROLE_NAMES.iter().copied().zip(styles).collect();
        Self { map }
    }

    /// Resolve a role name to its `Style`. Returns `Style::default()` for unknown roles.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================
