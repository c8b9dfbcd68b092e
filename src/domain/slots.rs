//! Slot and override resolution
//!
//! A badge has two slots, `root` and `badge` (the marker). Callers can
//! override them through two channels that predate each other:
//!
//! | Channel | Element types | Props |
//! |---------|---------------|-------|
//! | Legacy  | `components.Root` | `componentsProps.{root,badge}` |
//! | Current | `slots.root`      | `slotProps.{root,badge}` |
//!
//! Internally there is one [`OverrideChannel`]; the legacy form is
//! converted into it and the current channel is layered on top.
//!
//! ## Precedence
//!
//! Root element type: `slots.root` > `components.Root` > `component` > `span`.
//! The marker element type is fixed; overriding it is an error.
//!
//! Props, lowest to highest: library defaults, legacy props, current
//! props, named top-level props (`className`, passthrough attributes).
//! Marker position declarations survive every layer.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use super::element::{instantiate, Element, ElementCatalog, ElementType};
use super::error::{BadgeError, Result};
use super::props::{SlotProps, CLASS_NAME};

/// Default element of the root slot
pub const DEFAULT_ROOT_ELEMENT: &str = "span";

/// Element of the marker slot.
///
/// Nothing upstream says how this is chosen; it is fixed by the library
/// and cannot be swapped, only its props and style can.
pub const MARKER_ELEMENT: &str = "span";

/// Named sub-element of the badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Root,
    Badge,
}

impl Slot {
    pub fn all() -> &'static [Slot] {
        &[Slot::Root, Slot::Badge]
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Root => write!(f, "root"),
            Slot::Badge => write!(f, "badge"),
        }
    }
}

/// Element-type overrides, one per slot (`slots`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlotComponents {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<ElementType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<ElementType>,
}

impl SlotComponents {
    pub fn get(&self, slot: Slot) -> Option<&ElementType> {
        match slot {
            Slot::Root => self.root.as_ref(),
            Slot::Badge => self.badge.as_ref(),
        }
    }
}

/// Element-type overrides in the legacy spelling (`components`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LegacyComponents {
    #[serde(rename = "Root", skip_serializing_if = "Option::is_none")]
    pub root: Option<ElementType>,
    #[serde(rename = "Badge", skip_serializing_if = "Option::is_none")]
    pub badge: Option<ElementType>,
}

/// Prop overrides, one per slot (`slotProps` / `componentsProps`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlotPropsSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<SlotProps>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<SlotProps>,
}

impl SlotPropsSet {
    pub fn get(&self, slot: Slot) -> Option<&SlotProps> {
        match slot {
            Slot::Root => self.root.as_ref(),
            Slot::Badge => self.badge.as_ref(),
        }
    }
}

/// The current override channel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CurrentOverrides {
    pub slots: SlotComponents,
    pub slot_props: SlotPropsSet,
}

/// The legacy override channel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LegacyOverrides {
    pub components: LegacyComponents,
    pub components_props: SlotPropsSet,
}

/// The single internal representation both channels translate into
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverrideChannel {
    pub components: SlotComponents,
    pub props: SlotPropsSet,
}

impl From<CurrentOverrides> for OverrideChannel {
    fn from(current: CurrentOverrides) -> Self {
        Self {
            components: current.slots,
            props: current.slot_props,
        }
    }
}

impl From<LegacyOverrides> for OverrideChannel {
    fn from(legacy: LegacyOverrides) -> Self {
        Self {
            components: SlotComponents {
                root: legacy.components.root,
                badge: legacy.components.badge,
            },
            props: legacy.components_props,
        }
    }
}

impl OverrideChannel {
    /// Layers `upper` over this channel
    ///
    /// Element types: `upper` wins when present. Props: `upper` is merged
    /// on top, key by key.
    pub fn layer(self, upper: OverrideChannel) -> OverrideChannel {
        for slot in Slot::all() {
            if let (Some(lower), Some(higher)) =
                (self.components.get(*slot), upper.components.get(*slot))
            {
                if lower != higher {
                    debug!(
                        %slot,
                        lower = %lower,
                        upper = %higher,
                        "both override channels set an element type"
                    );
                }
            }
        }

        OverrideChannel {
            components: SlotComponents {
                root: upper.components.root.or(self.components.root),
                badge: upper.components.badge.or(self.components.badge),
            },
            props: SlotPropsSet {
                root: layer_props(self.props.root, upper.props.root),
                badge: layer_props(self.props.badge, upper.props.badge),
            },
        }
    }
}

fn layer_props(lower: Option<SlotProps>, upper: Option<SlotProps>) -> Option<SlotProps> {
    match (lower, upper) {
        (Some(lower), Some(upper)) => Some(lower.merged(&upper)),
        (lower, upper) => upper.or(lower),
    }
}

/// Top-level props that target the root slot directly
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedProps {
    pub class_name: Option<String>,

    /// Root element type used when no channel overrides it
    pub component: Option<ElementType>,

    /// Passthrough attributes (`id`, `data-*`, ...)
    pub attrs: SlotProps,
}

impl NamedProps {
    fn to_props(&self) -> SlotProps {
        let mut props = self.attrs.clone();
        if let Some(class_name) = &self.class_name {
            props.merge(&SlotProps::new().with(CLASS_NAME, class_name.as_str()));
        }
        props
    }
}

/// Library defaults for both slots
#[derive(Debug, Clone, PartialEq)]
pub struct SlotDefaults {
    pub root: SlotProps,
    pub badge: SlotProps,

    /// Marker style declarations no caller layer may remove
    pub required_badge_style: Map<String, Value>,
}

/// A slot ready to instantiate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSlot {
    pub element: ElementType,
    pub props: SlotProps,
}

impl ResolvedSlot {
    pub fn instantiate(&self) -> Element {
        instantiate(&self.element, None, self.props.clone())
    }
}

/// Both slots ready to instantiate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSlotSet {
    pub root: ResolvedSlot,
    pub badge: ResolvedSlot,
}

impl ResolvedSlotSet {
    pub fn get(&self, slot: Slot) -> &ResolvedSlot {
        match slot {
            Slot::Root => &self.root,
            Slot::Badge => &self.badge,
        }
    }
}

/// Resolves the element type and merged props of every slot
pub fn resolve_slots(
    defaults: &SlotDefaults,
    legacy: &LegacyOverrides,
    current: &CurrentOverrides,
    named: &NamedProps,
    catalog: &dyn ElementCatalog,
) -> Result<ResolvedSlotSet> {
    check_marker_fixed(legacy.components.badge.as_ref())?;
    check_marker_fixed(current.slots.badge.as_ref())?;

    for ty in [
        legacy.components.root.as_ref(),
        current.slots.root.as_ref(),
        named.component.as_ref(),
    ]
    .into_iter()
    .flatten()
    {
        check_renderable(Slot::Root, ty, catalog)?;
    }

    let channel =
        OverrideChannel::from(legacy.clone()).layer(OverrideChannel::from(current.clone()));

    let default_root = ElementType::tag(DEFAULT_ROOT_ELEMENT);
    let root_override = channel.components.root.as_ref().or(named.component.as_ref());
    let mut root_props = defaults.root.clone();
    if let Some(props) = &channel.props.root {
        root_props.merge(props);
    }
    root_props.merge(&named.to_props());

    let mut badge_props = defaults.badge.clone();
    if let Some(props) = &channel.props.badge {
        badge_props.merge(props);
    }
    badge_props.retain_style(&defaults.required_badge_style);

    let root = instantiate(&default_root, root_override, root_props);

    Ok(ResolvedSlotSet {
        root: ResolvedSlot {
            element: root.ty,
            props: root.props,
        },
        badge: ResolvedSlot {
            element: ElementType::tag(MARKER_ELEMENT),
            props: badge_props,
        },
    })
}

fn check_marker_fixed(ty: Option<&ElementType>) -> Result<()> {
    match ty {
        Some(ty) => Err(BadgeError::invalid_slot(
            Slot::Badge,
            format!(
                "the marker element type is fixed, cannot use '{}'; override its props instead",
                ty
            ),
        )),
        None => Ok(()),
    }
}

fn check_renderable(slot: Slot, ty: &ElementType, catalog: &dyn ElementCatalog) -> Result<()> {
    ty.validate()
        .map_err(|reason| BadgeError::invalid_slot(slot, reason))?;

    if catalog.is_renderable(ty) {
        Ok(())
    } else {
        Err(BadgeError::invalid_slot(
            slot,
            format!("'{}' is not a renderable element", ty),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::element::{AnyElement, KnownComponents};
    use proptest::prelude::*;
    use serde_json::json;

    fn props(value: Value) -> SlotProps {
        SlotProps::from_value(value).unwrap()
    }

    fn defaults() -> SlotDefaults {
        let required = json!({
            "top": "0",
            "right": "0",
            "transform": "scale(1) translate(50%, -50%)",
        });
        SlotDefaults {
            root: SlotProps::new(),
            badge: props(json!({"style": required.clone()})),
            required_badge_style: required.as_object().unwrap().clone(),
        }
    }

    fn resolve(
        defaults: &SlotDefaults,
        legacy: &LegacyOverrides,
        current: &CurrentOverrides,
        named: &NamedProps,
    ) -> Result<ResolvedSlotSet> {
        resolve_slots(defaults, legacy, current, named, &AnyElement)
    }

    #[test]
    fn no_overrides_use_library_defaults() {
        let resolved = resolve(
            &defaults(),
            &LegacyOverrides::default(),
            &CurrentOverrides::default(),
            &NamedProps::default(),
        )
        .unwrap();

        assert_eq!(resolved.root.element, ElementType::tag("span"));
        assert!(resolved.root.props.is_empty());
        assert_eq!(resolved.badge.element, ElementType::tag(MARKER_ELEMENT));
        assert_eq!(resolved.badge.props, defaults().badge);
    }

    #[test]
    fn current_channel_wins_root_type() {
        let legacy = LegacyOverrides {
            components: LegacyComponents {
                root: Some(ElementType::tag("div")),
                badge: None,
            },
            ..Default::default()
        };
        let current = CurrentOverrides {
            slots: SlotComponents {
                root: Some(ElementType::tag("section")),
                badge: None,
            },
            ..Default::default()
        };

        let resolved = resolve(&defaults(), &legacy, &current, &NamedProps::default()).unwrap();
        assert_eq!(resolved.root.element, ElementType::tag("section"));
    }

    #[test]
    fn legacy_channel_used_when_current_absent() {
        let legacy = LegacyOverrides {
            components: LegacyComponents {
                root: Some(ElementType::tag("div")),
                badge: None,
            },
            ..Default::default()
        };

        let resolved = resolve(
            &defaults(),
            &legacy,
            &CurrentOverrides::default(),
            &NamedProps::default(),
        )
        .unwrap();
        assert_eq!(resolved.root.element, ElementType::tag("div"));
    }

    #[test]
    fn component_prop_is_lowest_override() {
        let named = NamedProps {
            component: Some(ElementType::tag("a")),
            ..Default::default()
        };
        let resolved = resolve(
            &defaults(),
            &LegacyOverrides::default(),
            &CurrentOverrides::default(),
            &named,
        )
        .unwrap();
        assert_eq!(resolved.root.element, ElementType::tag("a"));

        let legacy = LegacyOverrides {
            components: LegacyComponents {
                root: Some(ElementType::tag("div")),
                badge: None,
            },
            ..Default::default()
        };
        let resolved = resolve(&defaults(), &legacy, &CurrentOverrides::default(), &named).unwrap();
        assert_eq!(resolved.root.element, ElementType::tag("div"));
    }

    #[test]
    fn merge_law_for_root_props() {
        let defaults = SlotDefaults {
            root: props(json!({"p": 1})),
            ..defaults()
        };
        let legacy = LegacyOverrides {
            components_props: SlotPropsSet {
                root: Some(props(json!({"p": 2, "q": 2}))),
                badge: None,
            },
            ..Default::default()
        };
        let current = CurrentOverrides {
            slot_props: SlotPropsSet {
                root: Some(props(json!({"q": 3}))),
                badge: None,
            },
            ..Default::default()
        };
        let named = NamedProps {
            class_name: Some("c".to_string()),
            ..Default::default()
        };

        let resolved = resolve(&defaults, &legacy, &current, &named).unwrap();
        assert_eq!(
            resolved.root.props,
            props(json!({"p": 2, "q": 3, "className": "c"}))
        );
    }

    #[test]
    fn named_props_beat_slot_props() {
        let current = CurrentOverrides {
            slot_props: SlotPropsSet {
                root: Some(props(json!({"id": "from-slot"}))),
                badge: None,
            },
            ..Default::default()
        };
        let named = NamedProps {
            attrs: props(json!({"id": "named"})),
            ..Default::default()
        };

        let resolved =
            resolve(&defaults(), &LegacyOverrides::default(), &current, &named).unwrap();
        assert_eq!(resolved.root.props.get("id"), Some(&json!("named")));
    }

    #[test]
    fn marker_position_cannot_be_removed() {
        let current = CurrentOverrides {
            slot_props: SlotPropsSet {
                root: None,
                badge: Some(props(json!({"style": {"transform": null, "color": "red"}}))),
            },
            ..Default::default()
        };

        let resolved = resolve(
            &defaults(),
            &LegacyOverrides::default(),
            &current,
            &NamedProps::default(),
        )
        .unwrap();
        let style = resolved.badge.props.style().unwrap();
        assert_eq!(style["transform"], "scale(1) translate(50%, -50%)");
        assert_eq!(style["color"], "red");
    }

    #[test]
    fn marker_style_values_can_be_replaced() {
        let legacy = LegacyOverrides {
            components_props: SlotPropsSet {
                root: None,
                badge: Some(props(json!({"style": {"top": "2px"}}))),
            },
            ..Default::default()
        };

        let resolved = resolve(
            &defaults(),
            &legacy,
            &CurrentOverrides::default(),
            &NamedProps::default(),
        )
        .unwrap();
        assert_eq!(resolved.badge.props.style().unwrap()["top"], "2px");
    }

    #[test]
    fn marker_element_type_is_fixed() {
        let legacy = LegacyOverrides {
            components: LegacyComponents {
                root: None,
                badge: Some(ElementType::tag("div")),
            },
            ..Default::default()
        };
        let err = resolve(
            &defaults(),
            &legacy,
            &CurrentOverrides::default(),
            &NamedProps::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            BadgeError::InvalidSlotOverride { slot: Slot::Badge, .. }
        ));

        let current = CurrentOverrides {
            slots: SlotComponents {
                root: None,
                badge: Some(ElementType::tag("div")),
            },
            ..Default::default()
        };
        assert!(resolve(
            &defaults(),
            &LegacyOverrides::default(),
            &current,
            &NamedProps::default()
        )
        .is_err());
    }

    #[test]
    fn malformed_root_override_is_rejected() {
        let current = CurrentOverrides {
            slots: SlotComponents {
                root: Some(ElementType::Tag("not a tag".to_string())),
                badge: None,
            },
            ..Default::default()
        };
        let err = resolve(
            &defaults(),
            &LegacyOverrides::default(),
            &current,
            &NamedProps::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            BadgeError::InvalidSlotOverride { slot: Slot::Root, .. }
        ));
    }

    #[test]
    fn unknown_component_is_rejected_by_catalog() {
        let current = CurrentOverrides {
            slots: SlotComponents {
                root: Some(ElementType::component("Ghost")),
                badge: None,
            },
            ..Default::default()
        };
        let catalog = KnownComponents::new(["Avatar"]);

        let result = resolve_slots(
            &defaults(),
            &LegacyOverrides::default(),
            &current,
            &NamedProps::default(),
            &catalog,
        );
        assert!(result.is_err());
    }

    #[test]
    fn layer_merges_props_and_prefers_upper_types() {
        let lower = OverrideChannel {
            components: SlotComponents {
                root: Some(ElementType::tag("div")),
                badge: None,
            },
            props: SlotPropsSet {
                root: Some(props(json!({"a": 1, "b": 1}))),
                badge: Some(props(json!({"c": 1}))),
            },
        };
        let upper = OverrideChannel {
            components: SlotComponents::default(),
            props: SlotPropsSet {
                root: Some(props(json!({"b": 2}))),
                badge: None,
            },
        };

        let layered = lower.layer(upper);
        assert_eq!(layered.components.root, Some(ElementType::tag("div")));
        assert_eq!(layered.props.root, Some(props(json!({"a": 1, "b": 2}))));
        assert_eq!(layered.props.badge, Some(props(json!({"c": 1}))));
    }

    #[test]
    fn legacy_channel_deserializes_capitalised_keys() {
        let legacy: LegacyOverrides = serde_json::from_value(json!({
            "components": {"Root": "div"},
            "componentsProps": {"badge": {"title": "x"}},
        }))
        .unwrap();

        assert_eq!(legacy.components.root, Some(ElementType::tag("div")));
        assert_eq!(
            legacy.components_props.badge,
            Some(props(json!({"title": "x"})))
        );
    }

    fn tag_name() -> impl Strategy<Value = ElementType> {
        "[a-z][a-z0-9]{0,6}".prop_map(ElementType::Tag)
    }

    proptest! {
        #[test]
        fn current_root_type_always_wins(legacy_ty in tag_name(), current_ty in tag_name()) {
            let legacy = LegacyOverrides {
                components: LegacyComponents { root: Some(legacy_ty), badge: None },
                ..Default::default()
            };
            let current = CurrentOverrides {
                slots: SlotComponents { root: Some(current_ty.clone()), badge: None },
                ..Default::default()
            };

            let resolved = resolve(&defaults(), &legacy, &current, &NamedProps::default()).unwrap();
            prop_assert_eq!(resolved.root.element, current_ty);
        }

        #[test]
        fn required_style_survives_any_caller_style(key in "[a-z]{1,10}", remove in any::<bool>()) {
            let value = if remove { Value::Null } else { json!("1px") };
            let mut style = Map::new();
            style.insert(key, value);
            let current = CurrentOverrides {
                slot_props: SlotPropsSet {
                    root: None,
                    badge: Some(SlotProps::new().with("style", Value::Object(style))),
                },
                ..Default::default()
            };

            let resolved = resolve(
                &defaults(),
                &LegacyOverrides::default(),
                &current,
                &NamedProps::default(),
            )
            .unwrap();
            let style = resolved.badge.props.style().unwrap();
            for key in defaults().required_badge_style.keys() {
                prop_assert!(style.get(key).is_some_and(|v| !v.is_null()));
            }
        }
    }
}
