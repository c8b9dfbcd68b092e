//! Marker content and visibility

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::variant::{Extension, Variant};

/// Default cap for numeric content
pub const DEFAULT_MAX: u64 = 99;

/// What the marker shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BadgeContent {
    Number(i64),
    Text(String),
}

impl BadgeContent {
    fn is_zero(&self) -> bool {
        matches!(self, BadgeContent::Number(0))
    }

    fn exceeds(&self, max: u64) -> bool {
        match self {
            BadgeContent::Number(n) => i128::from(*n) > i128::from(max),
            BadgeContent::Text(s) => {
                let s = s.trim();
                is_plain_decimal(s) && s.parse::<f64>().is_ok_and(|n| n > max as f64)
            }
        }
    }
}

/// `-12`, `1000`, `2.5`; not `inf`, `NaN` or exponents
fn is_plain_decimal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let (int, frac) = digits.split_once('.').unwrap_or((digits, ""));
    !(int.is_empty() && frac.is_empty())
        && int.chars().all(|c| c.is_ascii_digit())
        && frac.chars().all(|c| c.is_ascii_digit())
}

impl fmt::Display for BadgeContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BadgeContent::Number(n) => write!(f, "{}", n),
            BadgeContent::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for BadgeContent {
    fn from(n: i64) -> Self {
        BadgeContent::Number(n)
    }
}

impl From<&str> for BadgeContent {
    fn from(s: &str) -> Self {
        BadgeContent::Text(s.to_string())
    }
}

/// Resolved content of the marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentState {
    /// Text inside the marker; `None` renders an empty marker
    pub display: Option<String>,

    pub invisible: bool,
}

/// Applies the `max`, `showZero` and `invisible` rules
///
/// Without an explicit `invisible`, the marker hides when the content is
/// `0` and `show_zero` is off, or when there is no content and the variant
/// is not `dot`. An explicit `invisible = false` still hides a zero count
/// unless `show_zero` is set.
pub fn resolve_content<E: Extension>(
    content: Option<&BadgeContent>,
    max: u64,
    show_zero: bool,
    invisible: Option<bool>,
    variant: &Variant<E>,
) -> ContentState {
    let hidden_zero = content.is_some_and(BadgeContent::is_zero) && !show_zero;

    let invisible = match invisible {
        Some(true) => true,
        Some(false) => hidden_zero,
        None => hidden_zero || (content.is_none() && !variant.is_dot()),
    };

    if invisible {
        debug!(variant = %variant, "marker is invisible");
    }

    let display = match content {
        _ if variant.is_dot() => None,
        Some(content) if content.exceeds(max) => Some(format!("{}+", max)),
        Some(content) => Some(content.to_string()),
        None => None,
    };

    ContentState { display, invisible }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::variant::NoExtension;

    fn standard() -> Variant<NoExtension> {
        Variant::Standard
    }

    fn num(n: i64) -> BadgeContent {
        BadgeContent::Number(n)
    }

    fn text(s: &str) -> BadgeContent {
        BadgeContent::from(s)
    }

    #[test]
    fn caps_numbers_above_max() {
        let state = resolve_content(Some(&num(150)), DEFAULT_MAX, false, None, &standard());
        assert_eq!(state.display.as_deref(), Some("99+"));

        let state = resolve_content(Some(&num(99)), DEFAULT_MAX, false, None, &standard());
        assert_eq!(state.display.as_deref(), Some("99"));
    }

    #[test]
    fn numeric_text_is_capped_too() {
        let state = resolve_content(Some(&text("1000")), 999, false, None, &standard());
        assert_eq!(state.display.as_deref(), Some("999+"));

        let state = resolve_content(Some(&text("new")), 999, false, None, &standard());
        assert_eq!(state.display.as_deref(), Some("new"));
    }

    #[test]
    fn non_decimal_text_is_never_capped() {
        for label in ["inf", "infinity", "NaN", "1e9", "+inf", "."] {
            let state = resolve_content(Some(&text(label)), DEFAULT_MAX, false, None, &standard());
            assert_eq!(state.display.as_deref(), Some(label));
        }

        let state = resolve_content(Some(&text("100.5")), DEFAULT_MAX, false, None, &standard());
        assert_eq!(state.display.as_deref(), Some("99+"));
    }

    #[test]
    fn zero_hides_unless_show_zero() {
        let hidden = resolve_content(Some(&num(0)), DEFAULT_MAX, false, None, &standard());
        assert!(hidden.invisible);
        assert_eq!(hidden.display.as_deref(), Some("0"));

        let shown = resolve_content(Some(&num(0)), DEFAULT_MAX, true, None, &standard());
        assert!(!shown.invisible);
    }

    #[test]
    fn explicit_visible_still_hides_zero() {
        let state = resolve_content(Some(&num(0)), DEFAULT_MAX, false, Some(false), &standard());
        assert!(state.invisible);
    }

    #[test]
    fn missing_content_hides_standard_but_not_dot() {
        assert!(resolve_content(None, DEFAULT_MAX, false, None, &standard()).invisible);
        let dot = Variant::<NoExtension>::Dot;
        assert!(!resolve_content(None, DEFAULT_MAX, false, None, &dot).invisible);
    }

    #[test]
    fn dot_never_displays_content() {
        let dot = Variant::<NoExtension>::Dot;
        let state = resolve_content(Some(&num(7)), DEFAULT_MAX, false, None, &dot);
        assert_eq!(state.display, None);
        assert!(!state.invisible);
    }

    #[test]
    fn explicit_invisible_wins() {
        let state = resolve_content(Some(&num(3)), DEFAULT_MAX, false, Some(true), &standard());
        assert!(state.invisible);
    }

    #[test]
    fn content_deserializes_from_number_or_text() {
        let n: BadgeContent = serde_json::from_str("4").unwrap();
        assert_eq!(n, BadgeContent::Number(4));
        let t: BadgeContent = serde_json::from_str("\"new\"").unwrap();
        assert_eq!(t, BadgeContent::Text("new".to_string()));
    }
}
