//! Colour themes

mod tokyo_night;

pub use tokyo_night::{TOKYO_NIGHT, TOKYO_NIGHT_STORM};

use ratatui::style::Color;

/// A color theme for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,

    // Background colors
    pub bg_primary: Color,
    pub bg_secondary: Color,
    pub bg_tertiary: Color,

    // Foreground colors
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_muted: Color,

    // Accent colors
    pub accent_primary: Color,
    pub accent_secondary: Color,

    // Semantic colors
    pub success: Color,
    pub error: Color,
    pub info: Color,

    // UI elements
    pub border: Color,
    pub border_focused: Color,
}

impl Theme {
    /// All built-in themes
    pub const BUILTIN: &'static [Theme] = &[TOKYO_NIGHT, TOKYO_NIGHT_STORM];

    /// Built-in theme by name, ignoring case
    pub fn named(name: &str) -> Option<Theme> {
        Self::BUILTIN.iter().find(|t| t.name.eq_ignore_ascii_case(name.trim())).copied()
    }
}

impl Default for Theme {
    fn default() -> Self {
        TOKYO_NIGHT
    }
}
