//! Color token lookup
//!
//! Theme resolution lives outside this crate. A [`Palette`] only answers
//! which background and foreground a color name maps to; the answer is
//! folded into the marker's default style.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Concrete values for one color
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorTokens {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,
}

impl ColorTokens {
    pub fn new(background: impl Into<String>, foreground: impl Into<String>) -> Self {
        Self {
            background: Some(background.into()),
            foreground: Some(foreground.into()),
        }
    }
}

/// Maps a color name to concrete values
pub trait Palette {
    /// `None` leaves the marker uncolored
    fn tokens(&self, color: &str) -> Option<ColorTokens>;
}

/// The built-in light palette
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinPalette;

impl Palette for BuiltinPalette {
    fn tokens(&self, color: &str) -> Option<ColorTokens> {
        let background = match color {
            "primary" => "#1976d2",
            "secondary" => "#9c27b0",
            "error" => "#d32f2f",
            "info" => "#0288d1",
            "success" => "#2e7d32",
            "warning" => "#ed6c02",
            _ => return None,
        };
        Some(ColorTokens::new(background, "#fff"))
    }
}

/// Built-in palette plus configured entries, which take priority
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticPalette {
    entries: BTreeMap<String, ColorTokens>,
}

impl StaticPalette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, color: impl Into<String>, tokens: ColorTokens) -> Self {
        self.entries.insert(color.into(), tokens);
        self
    }
}

impl From<BTreeMap<String, ColorTokens>> for StaticPalette {
    fn from(entries: BTreeMap<String, ColorTokens>) -> Self {
        Self { entries }
    }
}

impl Palette for StaticPalette {
    fn tokens(&self, color: &str) -> Option<ColorTokens> {
        self.entries
            .get(color)
            .cloned()
            .or_else(|| BuiltinPalette.tokens(color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_color_has_no_tokens() {
        assert_eq!(BuiltinPalette.tokens("default"), None);
        assert_eq!(
            BuiltinPalette.tokens("primary"),
            Some(ColorTokens::new("#1976d2", "#fff"))
        );
    }

    #[test]
    fn configured_entries_take_priority() {
        let palette = StaticPalette::new()
            .with_entry("brand", ColorTokens::new("#ff00aa", "#000"))
            .with_entry("primary", ColorTokens::new("#000", "#fff"));

        assert_eq!(palette.tokens("brand").unwrap().background.as_deref(), Some("#ff00aa"));
        assert_eq!(palette.tokens("primary").unwrap().background.as_deref(), Some("#000"));
        assert!(palette.tokens("warning").is_some());
        assert!(palette.tokens("unknown").is_none());
    }
}
