//! Badge - overlay marker resolution for UI components
//!
//! A badge attaches a small marker (a count, a label or a dot) to a corner
//! of some wrapped content. This crate resolves where the marker sits and
//! which element types and props each part of the badge receives.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{
    resolve_position, AnchorOrigin, BadgeError, BadgeProps, Overlap, PositionStyle, ResolveContext,
    ResolvedBadge,
};
