//! Utility class names
//!
//! Every slot gets stable `{prefix}-{key}` classes describing its state
//! (`Badge-anchorOriginTopRightCircular`, `Badge-dot`, ...). Callers can
//! attach their own class to any key through the `classes` prop.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::anchor::{AnchorOrigin, Overlap};
use super::error::BadgeError;

pub const DEFAULT_CLASS_PREFIX: &str = "Badge";

/// Class keys that exist regardless of registered names
const STATIC_KEYS: &[&str] = &[
    "root",
    "badge",
    "dot",
    "standard",
    "invisible",
    "anchorOriginTopRight",
    "anchorOriginBottomRight",
    "anchorOriginTopLeft",
    "anchorOriginBottomLeft",
    "anchorOriginTopRightRectangular",
    "anchorOriginBottomRightRectangular",
    "anchorOriginTopLeftRectangular",
    "anchorOriginBottomLeftRectangular",
    "anchorOriginTopRightCircular",
    "anchorOriginBottomRightCircular",
    "anchorOriginTopLeftCircular",
    "anchorOriginBottomLeftCircular",
    "overlapRectangular",
    "overlapCircular",
    "colorPrimary",
    "colorSecondary",
    "colorError",
    "colorInfo",
    "colorSuccess",
    "colorWarning",
];

/// Caller classes keyed by class key (`classes` prop)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassOverrides(BTreeMap<String, String>);

impl ClassOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, class: impl Into<String>) -> Self {
        self.0.insert(key.into(), class.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, String>> for ClassOverrides {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

/// Inputs that decide which keys apply
#[derive(Debug, Clone, Copy)]
pub struct ClassState<'a> {
    pub variant: &'a str,
    pub color: &'a str,
    pub anchor: AnchorOrigin,
    pub overlap: Overlap,
    pub invisible: bool,
}

/// Class strings for both slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UtilityClasses {
    pub root: String,
    pub badge: String,
}

/// Uppercases the first character (`top` -> `Top`)
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn badge_keys(state: &ClassState<'_>) -> Vec<String> {
    let corner = format!(
        "anchorOrigin{}{}",
        capitalize(state.anchor.vertical.as_str()),
        capitalize(state.anchor.horizontal.as_str())
    );
    let overlap = capitalize(state.overlap.as_str());

    let mut keys = vec![
        "badge".to_string(),
        state.variant.to_string(),
        format!("{}{}", corner, overlap),
        corner,
        format!("overlap{}", overlap),
    ];
    if state.color != "default" {
        keys.push(format!("color{}", capitalize(state.color)));
    }
    if state.invisible {
        keys.push("invisible".to_string());
    }
    keys
}

fn compose(prefix: &str, keys: &[String], overrides: &ClassOverrides) -> String {
    keys.iter()
        .map(|key| match overrides.get(key) {
            Some(extra) => format!("{}-{} {}", prefix, key, extra),
            None => format!("{}-{}", prefix, key),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builds the class strings, rejecting unknown override keys
pub fn utility_classes(
    prefix: &str,
    state: &ClassState<'_>,
    overrides: &ClassOverrides,
) -> Result<UtilityClasses, BadgeError> {
    let badge_keys = badge_keys(state);

    for key in overrides.0.keys() {
        let known = STATIC_KEYS.contains(&key.as_str()) || badge_keys.contains(key);
        if !known {
            return Err(BadgeError::invalid_value("classes", key.as_str(), STATIC_KEYS));
        }
    }

    Ok(UtilityClasses {
        root: compose(prefix, &["root".to_string()], overrides),
        badge: compose(prefix, &badge_keys, overrides),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::anchor::{Horizontal, Vertical};

    fn state() -> ClassState<'static> {
        ClassState {
            variant: "standard",
            color: "default",
            anchor: AnchorOrigin::default(),
            overlap: Overlap::Rectangular,
            invisible: false,
        }
    }

    #[test]
    fn default_classes() {
        let classes =
            utility_classes(DEFAULT_CLASS_PREFIX, &state(), &ClassOverrides::new()).unwrap();
        assert_eq!(classes.root, "Badge-root");
        assert_eq!(
            classes.badge,
            "Badge-badge Badge-standard Badge-anchorOriginTopRightRectangular \
             Badge-anchorOriginTopRight Badge-overlapRectangular"
        );
    }

    #[test]
    fn dot_circular_colored_invisible() {
        let state = ClassState {
            variant: "dot",
            color: "primary",
            anchor: AnchorOrigin::new(Vertical::Bottom, Horizontal::Left),
            overlap: Overlap::Circular,
            invisible: true,
        };
        let classes = utility_classes("X", &state, &ClassOverrides::new()).unwrap();
        let badge: Vec<&str> = classes.badge.split(' ').collect();

        assert!(badge.contains(&"X-dot"));
        assert!(badge.contains(&"X-anchorOriginBottomLeftCircular"));
        assert!(badge.contains(&"X-overlapCircular"));
        assert!(badge.contains(&"X-colorPrimary"));
        assert!(badge.contains(&"X-invisible"));
    }

    #[test]
    fn overrides_follow_their_utility_class() {
        let overrides = ClassOverrides::new()
            .with("root", "my-root")
            .with("badge", "my-badge");
        let classes = utility_classes("Badge", &state(), &overrides).unwrap();

        assert_eq!(classes.root, "Badge-root my-root");
        assert!(classes.badge.starts_with("Badge-badge my-badge "));
    }

    #[test]
    fn unknown_override_key_is_rejected() {
        let overrides = ClassOverrides::new().with("sparkle", "x");
        let err = utility_classes("Badge", &state(), &overrides).unwrap_err();
        assert!(matches!(err, BadgeError::InvalidEnumValue { field: "classes", .. }));
    }

    #[test]
    fn registered_names_have_keys() {
        let state = ClassState {
            variant: "pulse",
            color: "brand",
            ..state()
        };
        let overrides = ClassOverrides::new().with("pulse", "p").with("colorBrand", "b");
        let classes = utility_classes("Badge", &state, &overrides).unwrap();

        assert!(classes.badge.contains("Badge-pulse p"));
        assert!(classes.badge.contains("Badge-colorBrand b"));
    }

    #[test]
    fn capitalize_handles_empty() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("top"), "Top");
    }
}
