//! Badge composition
//!
//! Ties the pieces together for one resolution pass:
//!
//! ```text
//! BadgeProps ─┬─> resolve_position ──> marker position style
//!             ├─> resolve_content  ──> display text, visibility
//!             ├─> utility_classes  ──> class names
//!             └─> resolve_slots    ──> root + marker element types and props
//! ```
//!
//! Nothing is cached between passes; every call works on its own inputs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::anchor::{resolve_position, AnchorOrigin, Overlap, PositionStyle};
use super::classes::{utility_classes, ClassOverrides, ClassState, DEFAULT_CLASS_PREFIX};
use super::content::{resolve_content, BadgeContent, ContentState, DEFAULT_MAX};
use super::element::{AnyElement, Element, ElementCatalog, ElementType, Node};
use super::error::{BadgeError, Result};
use super::palette::{BuiltinPalette, Palette};
use super::props::{SlotProps, CLASS_NAME, STYLE};
use super::slots::{
    resolve_slots, CurrentOverrides, LegacyComponents, LegacyOverrides, NamedProps,
    ResolvedSlotSet, Slot, SlotComponents, SlotDefaults, SlotPropsSet,
};
use super::variant::{Color, Extension, NoExtension, OverrideRegistry, Registered, Variant};

/// The full prop set of a badge
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeProps<V = NoExtension, C = NoExtension> {
    pub anchor_origin: AnchorOrigin,
    pub overlap: Overlap,
    pub variant: Variant<V>,
    pub color: Color<C>,
    pub badge_content: Option<BadgeContent>,
    pub max: u64,
    pub show_zero: bool,
    pub invisible: Option<bool>,
    pub classes: ClassOverrides,
    pub named: NamedProps,
    pub legacy: LegacyOverrides,
    pub current: CurrentOverrides,
}

impl<V, C> Default for BadgeProps<V, C> {
    fn default() -> Self {
        Self {
            anchor_origin: AnchorOrigin::default(),
            overlap: Overlap::default(),
            variant: Variant::default(),
            color: Color::default(),
            badge_content: None,
            max: DEFAULT_MAX,
            show_zero: false,
            invisible: None,
            classes: ClassOverrides::default(),
            named: NamedProps::default(),
            legacy: LegacyOverrides::default(),
            current: CurrentOverrides::default(),
        }
    }
}

/// Collaborators consulted during resolution
#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
    pub class_prefix: &'a str,
    pub palette: &'a dyn Palette,
    pub catalog: &'a dyn ElementCatalog,
}

impl Default for ResolveContext<'static> {
    fn default() -> Self {
        Self {
            class_prefix: DEFAULT_CLASS_PREFIX,
            palette: &BuiltinPalette,
            catalog: &AnyElement,
        }
    }
}

/// Result of one resolution pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedBadge {
    pub slots: ResolvedSlotSet,
    pub position: PositionStyle,
    pub content: ContentState,
}

impl ResolvedBadge {
    /// Builds the render tree: root wrapping `children`, marker last
    pub fn render(&self, children: Vec<Node>) -> Element {
        let mut marker = self.slots.badge.instantiate();
        if let Some(text) = &self.content.display {
            marker.push(Node::text(text.as_str()));
        }

        let mut root = self.slots.root.instantiate().with_children(children);
        root.push(Node::Element(marker));
        root
    }
}

impl<V: Extension, C: Extension> BadgeProps<V, C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn anchor_origin(mut self, anchor: AnchorOrigin) -> Self {
        self.anchor_origin = anchor;
        self
    }

    pub fn overlap(mut self, overlap: Overlap) -> Self {
        self.overlap = overlap;
        self
    }

    pub fn variant(mut self, variant: Variant<V>) -> Self {
        self.variant = variant;
        self
    }

    pub fn color(mut self, color: Color<C>) -> Self {
        self.color = color;
        self
    }

    pub fn content(mut self, content: impl Into<BadgeContent>) -> Self {
        self.badge_content = Some(content.into());
        self
    }

    pub fn count(self, n: i64) -> Self {
        self.content(n)
    }

    pub fn max(mut self, max: u64) -> Self {
        self.max = max;
        self
    }

    pub fn show_zero(mut self, show_zero: bool) -> Self {
        self.show_zero = show_zero;
        self
    }

    pub fn invisible(mut self, invisible: bool) -> Self {
        self.invisible = Some(invisible);
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.named.class_name = Some(class_name.into());
        self
    }

    pub fn component(mut self, ty: ElementType) -> Self {
        self.named.component = Some(ty);
        self
    }

    pub fn classes(mut self, classes: ClassOverrides) -> Self {
        self.classes = classes;
        self
    }

    pub fn legacy(mut self, legacy: LegacyOverrides) -> Self {
        self.legacy = legacy;
        self
    }

    pub fn slots(mut self, current: CurrentOverrides) -> Self {
        self.current = current;
        self
    }

    /// Resolves both slots for one render pass
    pub fn resolve(&self, ctx: &ResolveContext<'_>) -> Result<ResolvedBadge> {
        let position = resolve_position(self.anchor_origin, self.overlap);
        let content = resolve_content(
            self.badge_content.as_ref(),
            self.max,
            self.show_zero,
            self.invisible,
            &self.variant,
        );

        let classes = utility_classes(
            ctx.class_prefix,
            &ClassState {
                variant: self.variant.name(),
                color: self.color.name(),
                anchor: self.anchor_origin,
                overlap: self.overlap,
                invisible: content.invisible,
            },
            &self.classes,
        )?;

        let required = position.to_style(!content.invisible);

        let mut badge_style = marker_geometry(self.variant.is_dot());
        if let Some(tokens) = ctx.palette.tokens(self.color.name()) {
            if let Some(background) = tokens.background {
                badge_style.insert("background-color".to_string(), Value::String(background));
            }
            if let Some(foreground) = tokens.foreground {
                badge_style.insert("color".to_string(), Value::String(foreground));
            }
        }
        badge_style.extend(required.clone());

        let defaults = SlotDefaults {
            root: SlotProps::new()
                .with(CLASS_NAME, classes.root)
                .with(STYLE, root_style()),
            badge: SlotProps::new()
                .with(CLASS_NAME, classes.badge)
                .with(STYLE, Value::Object(badge_style)),
            required_badge_style: required,
        };

        let slots = resolve_slots(
            &defaults,
            &self.legacy,
            &self.current,
            &self.named,
            ctx.catalog,
        )?;

        Ok(ResolvedBadge {
            slots,
            position,
            content,
        })
    }
}

fn root_style() -> Value {
    json!({
        "position": "relative",
        "display": "inline-flex",
        "vertical-align": "middle",
        "flex-shrink": "0",
    })
}

/// Size and layout of the marker box
fn marker_geometry(dot: bool) -> Map<String, Value> {
    let (size, padding, radius) = if dot {
        ("8px", "0", "4px")
    } else {
        ("20px", "0 6px", "10px")
    };

    let style = json!({
        "position": "absolute",
        "display": "flex",
        "flex-flow": "row wrap",
        "place-content": "center",
        "align-items": "center",
        "box-sizing": "border-box",
        "z-index": "1",
        "height": size,
        "min-width": size,
        "padding": padding,
        "border-radius": radius,
    });

    match style {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Anchor origin as it appears in untyped input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawAnchorOrigin {
    pub vertical: Option<String>,
    pub horizontal: Option<String>,
}

/// Legacy element-type overrides as untyped input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawLegacyComponents {
    #[serde(rename = "Root")]
    pub root: Option<String>,
    #[serde(rename = "Badge")]
    pub badge: Option<String>,
}

/// Current element-type overrides as untyped input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawSlotComponents {
    pub root: Option<String>,
    pub badge: Option<String>,
}

/// A badge prop set before validation
///
/// This is the shape of prop files and JSON input. Every enumerated value
/// is still a string; [`RawBadgeProps::validate`] checks them all before
/// any slot is resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct RawBadgeProps {
    pub anchor_origin: Option<RawAnchorOrigin>,
    pub overlap: Option<String>,
    pub variant: Option<String>,
    pub color: Option<String>,
    pub badge_content: Option<BadgeContent>,
    pub max: Option<u64>,
    pub show_zero: Option<bool>,
    pub invisible: Option<bool>,
    pub class_name: Option<String>,
    pub component: Option<String>,
    pub classes: Option<BTreeMap<String, String>>,
    pub attrs: Option<SlotProps>,
    pub components: Option<RawLegacyComponents>,
    pub components_props: Option<SlotPropsSet>,
    pub slots: Option<RawSlotComponents>,
    pub slot_props: Option<SlotPropsSet>,
}

impl RawBadgeProps {
    /// Overlays every value set in `upper`
    pub fn merge_from(&mut self, upper: RawBadgeProps) {
        if let Some(anchor) = upper.anchor_origin {
            let base = self.anchor_origin.get_or_insert_with(RawAnchorOrigin::default);
            if anchor.vertical.is_some() {
                base.vertical = anchor.vertical;
            }
            if anchor.horizontal.is_some() {
                base.horizontal = anchor.horizontal;
            }
        }

        macro_rules! take {
            ($($field:ident),*) => {
                $(if upper.$field.is_some() {
                    self.$field = upper.$field;
                })*
            };
        }

        take!(
            overlap,
            variant,
            color,
            badge_content,
            max,
            show_zero,
            invisible,
            class_name,
            component,
            classes,
            attrs,
            components,
            components_props,
            slots,
            slot_props
        );
    }

    /// Checks every value and builds typed props
    pub fn validate(
        self,
        registry: &OverrideRegistry,
    ) -> Result<BadgeProps<Registered, Registered>> {
        let anchor = self.anchor_origin.unwrap_or_default();
        let anchor_origin = AnchorOrigin::new(
            match anchor.vertical {
                Some(v) => v.parse()?,
                None => Default::default(),
            },
            match anchor.horizontal {
                Some(h) => h.parse()?,
                None => Default::default(),
            },
        );

        let overlap = match self.overlap {
            Some(o) => o.parse()?,
            None => Overlap::default(),
        };
        let variant = match self.variant {
            Some(v) => registry.variant(&v)?,
            None => Variant::default(),
        };
        let color = match self.color {
            Some(c) => registry.color(&c)?,
            None => Color::default(),
        };

        let components = self.components.unwrap_or_default();
        let slots = self.slots.unwrap_or_default();

        Ok(BadgeProps {
            anchor_origin,
            overlap,
            variant,
            color,
            badge_content: self.badge_content,
            max: self.max.unwrap_or(DEFAULT_MAX),
            show_zero: self.show_zero.unwrap_or(false),
            invisible: self.invisible,
            classes: self.classes.map(ClassOverrides::from).unwrap_or_default(),
            named: NamedProps {
                class_name: self.class_name,
                component: parse_element(Slot::Root, self.component)?,
                attrs: self.attrs.unwrap_or_default(),
            },
            legacy: LegacyOverrides {
                components: LegacyComponents {
                    root: parse_element(Slot::Root, components.root)?,
                    badge: parse_element(Slot::Badge, components.badge)?,
                },
                components_props: self.components_props.unwrap_or_default(),
            },
            current: CurrentOverrides {
                slots: SlotComponents {
                    root: parse_element(Slot::Root, slots.root)?,
                    badge: parse_element(Slot::Badge, slots.badge)?,
                },
                slot_props: self.slot_props.unwrap_or_default(),
            },
        })
    }
}

fn parse_element(slot: Slot, raw: Option<String>) -> Result<Option<ElementType>> {
    raw.map(|name| {
        name.parse::<ElementType>()
            .map_err(|reason| BadgeError::invalid_slot(slot, reason))
    })
    .transpose()
}
