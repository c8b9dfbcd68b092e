//! Anchor resolution
//!
//! Maps a declared corner and the wrapped content's shape to the
//! positioning values of the marker. The marker is pinned to the anchored
//! edges, pushed half its own size outward, and for circular content
//! pulled inward so it sits on the curve instead of the bounding box corner.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::BadgeError;

/// Inset (percent of the wrapped box) applied to both anchored edges for circular content.
///
/// A circle inscribed in its bounding box meets the 45° diagonal at
/// (1 - 1/√2) / 2 ≈ 14.6% from each edge; 14% is the rounded value.
pub const CIRCULAR_INSET_PERCENT: f32 = 14.0;

/// Half the marker size, so the marker centre lands on the anchor point.
const TRANSLATE_PERCENT: f32 = 50.0;

/// Vertical edge of the anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Vertical {
    #[default]
    Top,
    Bottom,
}

impl Vertical {
    pub fn all() -> &'static [Vertical] {
        &[Vertical::Top, Vertical::Bottom]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Vertical::Top => "top",
            Vertical::Bottom => "bottom",
        }
    }

    /// Sign of the outward translation on the y axis
    fn outward(&self) -> f32 {
        match self {
            Vertical::Top => -1.0,
            Vertical::Bottom => 1.0,
        }
    }

    fn origin(&self) -> f32 {
        match self {
            Vertical::Top => 0.0,
            Vertical::Bottom => 100.0,
        }
    }
}

impl fmt::Display for Vertical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Vertical {
    type Err = BadgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Vertical::Top),
            "bottom" => Ok(Vertical::Bottom),
            _ => Err(BadgeError::invalid_value(
                "anchorOrigin.vertical",
                s,
                &["top", "bottom"],
            )),
        }
    }
}

/// Horizontal edge of the anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Horizontal {
    Left,
    #[default]
    Right,
}

impl Horizontal {
    pub fn all() -> &'static [Horizontal] {
        &[Horizontal::Left, Horizontal::Right]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Horizontal::Left => "left",
            Horizontal::Right => "right",
        }
    }

    fn outward(&self) -> f32 {
        match self {
            Horizontal::Left => -1.0,
            Horizontal::Right => 1.0,
        }
    }

    fn origin(&self) -> f32 {
        match self {
            Horizontal::Left => 0.0,
            Horizontal::Right => 100.0,
        }
    }
}

impl fmt::Display for Horizontal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Horizontal {
    type Err = BadgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Horizontal::Left),
            "right" => Ok(Horizontal::Right),
            _ => Err(BadgeError::invalid_value(
                "anchorOrigin.horizontal",
                s,
                &["left", "right"],
            )),
        }
    }
}

/// Corner of the wrapped content the marker is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct AnchorOrigin {
    pub vertical: Vertical,
    pub horizontal: Horizontal,
}

impl AnchorOrigin {
    pub const fn new(vertical: Vertical, horizontal: Horizontal) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }

    /// All four corners, clockwise from top-left
    pub fn all() -> [AnchorOrigin; 4] {
        [
            AnchorOrigin::new(Vertical::Top, Horizontal::Left),
            AnchorOrigin::new(Vertical::Top, Horizontal::Right),
            AnchorOrigin::new(Vertical::Bottom, Horizontal::Right),
            AnchorOrigin::new(Vertical::Bottom, Horizontal::Left),
        ]
    }

    /// Returns the next corner clockwise
    pub fn next(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|a| *a == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }
}

impl fmt::Display for AnchorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.vertical, self.horizontal)
    }
}

impl FromStr for AnchorOrigin {
    type Err = BadgeError;

    /// Parses `top-right`, `bottom_left`, `top left` and similar
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s
            .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();

        match parts.as_slice() {
            [vertical, horizontal] => Ok(AnchorOrigin::new(vertical.parse()?, horizontal.parse()?)),
            _ => Err(BadgeError::invalid_value(
                "anchorOrigin",
                s,
                &["top-left", "top-right", "bottom-left", "bottom-right"],
            )),
        }
    }
}

/// Geometry of the wrapped content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Overlap {
    #[default]
    Rectangular,
    Circular,
}

impl Overlap {
    pub fn all() -> &'static [Overlap] {
        &[Overlap::Rectangular, Overlap::Circular]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Overlap::Rectangular => "rectangular",
            Overlap::Circular => "circular",
        }
    }

    /// Inset from the anchored edges, in percent of the wrapped box
    pub fn inset(&self) -> f32 {
        match self {
            Overlap::Rectangular => 0.0,
            Overlap::Circular => CIRCULAR_INSET_PERCENT,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Overlap::Rectangular => Overlap::Circular,
            Overlap::Circular => Overlap::Rectangular,
        }
    }
}

impl fmt::Display for Overlap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Overlap {
    type Err = BadgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rectangular" => Ok(Overlap::Rectangular),
            "circular" => Ok(Overlap::Circular),
            _ => Err(BadgeError::invalid_value(
                "overlap",
                s,
                &["rectangular", "circular"],
            )),
        }
    }
}

/// Positioning values for the marker
///
/// All numbers are percentages: `inset` of the wrapped box, `translate_*`
/// of the marker itself, `origin_*` of the marker box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionStyle {
    /// Edge anchored on the y axis
    pub vertical: Vertical,

    /// Edge anchored on the x axis
    pub horizontal: Horizontal,

    /// Distance from both anchored edges; non-zero only for circular content
    pub inset: f32,

    pub translate_x: f32,
    pub translate_y: f32,

    pub origin_x: f32,
    pub origin_y: f32,
}

impl PositionStyle {
    /// Style keys the composition always keeps on the marker
    pub fn protected_keys(&self) -> [&'static str; 4] {
        [
            self.vertical.as_str(),
            self.horizontal.as_str(),
            "transform",
            "transform-origin",
        ]
    }

    /// CSS transform; `visible = false` collapses the marker to scale 0
    pub fn transform(&self, visible: bool) -> String {
        format!(
            "scale({}) translate({}%, {}%)",
            if visible { 1 } else { 0 },
            self.translate_x,
            self.translate_y
        )
    }

    pub fn transform_origin(&self) -> String {
        format!("{}% {}%", self.origin_x, self.origin_y)
    }

    /// Renders the position as style declarations
    pub fn to_style(&self, visible: bool) -> Map<String, Value> {
        let inset = format_length(self.inset);
        let mut style = Map::new();
        style.insert(self.vertical.as_str().to_string(), Value::String(inset.clone()));
        style.insert(self.horizontal.as_str().to_string(), Value::String(inset));
        style.insert("transform".to_string(), Value::String(self.transform(visible)));
        style.insert(
            "transform-origin".to_string(),
            Value::String(self.transform_origin()),
        );
        style
    }
}

fn format_length(percent: f32) -> String {
    if percent == 0.0 {
        "0".to_string()
    } else {
        format!("{}%", percent)
    }
}

/// Computes the marker position for an anchor and wrapped shape
pub fn resolve_position(anchor: AnchorOrigin, shape: Overlap) -> PositionStyle {
    PositionStyle {
        vertical: anchor.vertical,
        horizontal: anchor.horizontal,
        inset: shape.inset(),
        translate_x: anchor.horizontal.outward() * TRANSLATE_PERCENT,
        translate_y: anchor.vertical.outward() * TRANSLATE_PERCENT,
        origin_x: anchor.horizontal.origin(),
        origin_y: anchor.vertical.origin(),
    }
}
