//! Error taxonomy for badge resolution
//!
//! Every error is local to one resolution attempt. Resolution is
//! deterministic, so retrying with the same input yields the same error.

use thiserror::Error;

use super::slots::Slot;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BadgeError {
    #[error("Invalid {field} value '{value}': expected one of {expected}")]
    InvalidEnumValue {
        field: &'static str,
        value: String,
        expected: String,
    },

    #[error("Invalid override for the '{slot}' slot: {reason}")]
    InvalidSlotOverride { slot: Slot, reason: String },
}

impl BadgeError {
    /// Builds an `InvalidEnumValue` from the list of accepted names
    pub fn invalid_value(field: &'static str, value: impl Into<String>, expected: &[&str]) -> Self {
        BadgeError::InvalidEnumValue {
            field,
            value: value.into(),
            expected: expected.join(", "),
        }
    }

    /// Builds an `InvalidSlotOverride`
    pub fn invalid_slot(slot: Slot, reason: impl Into<String>) -> Self {
        BadgeError::InvalidSlotOverride {
            slot,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BadgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_lists_expected_names() {
        let err = BadgeError::invalid_value("overlap", "hexagonal", &["rectangular", "circular"]);
        assert_eq!(
            err.to_string(),
            "Invalid overlap value 'hexagonal': expected one of rectangular, circular"
        );
    }

    #[test]
    fn invalid_slot_names_the_slot() {
        let err = BadgeError::invalid_slot(Slot::Badge, "element type is fixed");
        assert!(err.to_string().contains("'badge' slot"));
    }
}
