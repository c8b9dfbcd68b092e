//! Domain models for badge resolution
//!
//! Pure resolution logic without any I/O concerns: anchor positioning,
//! slot and override merging, content rules and utility classes.

mod anchor;
mod badge;
mod classes;
mod content;
mod element;
mod error;
mod palette;
mod props;
mod slots;
mod variant;

pub use anchor::{
    resolve_position, AnchorOrigin, Horizontal, Overlap, PositionStyle, Vertical,
    CIRCULAR_INSET_PERCENT,
};
pub use badge::{
    BadgeProps, RawAnchorOrigin, RawBadgeProps, RawLegacyComponents, RawSlotComponents,
    ResolveContext, ResolvedBadge,
};
pub use classes::{
    capitalize, utility_classes, ClassOverrides, ClassState, UtilityClasses, DEFAULT_CLASS_PREFIX,
};
pub use content::{resolve_content, BadgeContent, ContentState, DEFAULT_MAX};
pub use element::{
    instantiate, AnyElement, Element, ElementCatalog, ElementType, KnownComponents, MarkupError,
    Node,
};
pub use error::{BadgeError, Result};
pub use palette::{BuiltinPalette, ColorTokens, Palette, StaticPalette};
pub use props::{SlotProps, CLASS_NAME, STYLE};
pub use slots::{
    resolve_slots, CurrentOverrides, LegacyComponents, LegacyOverrides, NamedProps,
    OverrideChannel, ResolvedSlot, ResolvedSlotSet, Slot, SlotComponents, SlotDefaults,
    SlotPropsSet, DEFAULT_ROOT_ELEMENT, MARKER_ELEMENT,
};
pub use variant::{Color, Extension, NoExtension, OverrideRegistry, Registered, Variant};
