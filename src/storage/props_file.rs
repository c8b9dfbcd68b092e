//! Prop files
//!
//! A prop file holds one badge prop set in TOML or JSON, using the same
//! camelCase names as the component (`anchorOrigin`, `slotProps`, ...).
//! The format is picked from the extension.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::domain::RawBadgeProps;

/// Reads and parses a prop file
pub fn load(path: &Path) -> Result<RawBadgeProps> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read prop file: {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase);

    match extension.as_deref() {
        Some("toml") => parse_toml(&content)
            .with_context(|| format!("Failed to parse prop file: {}", path.display())),
        Some("json") => parse_json(&content)
            .with_context(|| format!("Failed to parse prop file: {}", path.display())),
        _ => bail!(
            "Unsupported prop file '{}': expected a .toml or .json extension",
            path.display()
        ),
    }
}

pub fn parse_toml(content: &str) -> Result<RawBadgeProps> {
    Ok(toml::from_str(content)?)
}

pub fn parse_json(content: &str) -> Result<RawBadgeProps> {
    Ok(serde_json::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BadgeContent, BadgeError, OverrideRegistry};
    use tempfile::TempDir;

    #[test]
    fn parses_toml_props() {
        let props = parse_toml(
            r#"
variant = "dot"
badgeContent = 4
showZero = true

[anchorOrigin]
vertical = "bottom"

[slots]
root = "div"

[slotProps.badge]
title = "unread"
"#,
        )
        .unwrap();

        assert_eq!(props.variant.as_deref(), Some("dot"));
        assert_eq!(props.badge_content, Some(BadgeContent::Number(4)));
        assert_eq!(props.show_zero, Some(true));
        assert_eq!(
            props.anchor_origin.and_then(|a| a.vertical).as_deref(),
            Some("bottom")
        );
        assert_eq!(props.slots.and_then(|s| s.root).as_deref(), Some("div"));
        assert!(props.slot_props.and_then(|s| s.badge).is_some());
    }

    #[test]
    fn parses_json_legacy_channel() {
        let props = parse_json(
            r#"{"components": {"Root": "section"}, "componentsProps": {"root": {"id": "x"}}}"#,
        )
        .unwrap();
        assert_eq!(
            props.components.and_then(|c| c.root).as_deref(),
            Some("section")
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse_json(r#"{"anchor": "top"}"#).is_err());
        assert!(parse_toml("[slots]\nmarker = \"div\"\n").is_err());
    }

    #[test]
    fn wrong_case_values_fail_validation() {
        let props = parse_toml("overlap = \"Circular\"\n\n[anchorOrigin]\nvertical = \"top\"\n")
            .unwrap();
        let err = props.validate(&OverrideRegistry::new()).unwrap_err();
        assert!(matches!(err, BadgeError::InvalidEnumValue { field: "overlap", .. }));

        let props = parse_json(r#"{"anchorOrigin": {"vertical": "Top"}}"#).unwrap();
        let err = props.validate(&OverrideRegistry::new()).unwrap_err();
        assert!(matches!(
            err,
            BadgeError::InvalidEnumValue { field: "anchorOrigin.vertical", .. }
        ));
    }

    #[test]
    fn load_picks_format_from_extension() {
        let dir = TempDir::new().unwrap();
        let toml_path = dir.path().join("props.toml");
        fs::write(&toml_path, "color = \"error\"\n").unwrap();
        let json_path = dir.path().join("props.json");
        fs::write(&json_path, r#"{"color": "info"}"#).unwrap();

        assert_eq!(load(&toml_path).unwrap().color.as_deref(), Some("error"));
        assert_eq!(load(&json_path).unwrap().color.as_deref(), Some("info"));
    }

    #[test]
    fn load_rejects_other_extensions() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("props.yaml");
        fs::write(&path, "color: error\n").unwrap();

        assert!(load(&path).is_err());
    }
}
