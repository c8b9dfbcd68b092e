//! Open enumerations for the marker variant and color
//!
//! Both enums are a closed set of built-in names plus a `Custom` arm whose
//! payload type is an extension point. With the default [`NoExtension`]
//! the enums are closed and unknown names are rejected. Downstream crates
//! can plug in their own [`Extension`] type to add names checked at
//! compile time, or use [`Registered`] names minted by an
//! [`OverrideRegistry`] built from configuration.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::error::BadgeError;

/// Extra names accepted by [`Variant`] or [`Color`]
pub trait Extension: Sized + Clone + fmt::Debug + PartialEq + Eq {
    /// Name as it appears in props and class names
    fn name(&self) -> &str;

    /// Parses a name; `None` if this extension does not know it
    fn parse(name: &str) -> Option<Self>;

    /// Names listed in error messages
    fn known() -> Vec<String> {
        Vec::new()
    }
}

/// The empty extension: only built-in names are valid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoExtension {}

impl Extension for NoExtension {
    fn name(&self) -> &str {
        match *self {}
    }

    fn parse(_name: &str) -> Option<Self> {
        None
    }
}

/// A custom name accepted by an [`OverrideRegistry`]
///
/// Values can only be obtained from a registry, so holding one proves the
/// name was registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Registered(String);

impl Registered {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Extension for Registered {
    fn name(&self) -> &str {
        &self.0
    }

    fn parse(_name: &str) -> Option<Self> {
        None
    }
}

/// Visual style of the marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Variant<E = NoExtension> {
    /// Shows content such as a count
    Standard,

    /// Small indicator without content
    Dot,

    Custom(E),
}

impl<E: Extension> Variant<E> {
    pub const BUILTIN: &'static [&'static str] = &["standard", "dot"];

    pub fn name(&self) -> &str {
        match self {
            Variant::Standard => "standard",
            Variant::Dot => "dot",
            Variant::Custom(ext) => ext.name(),
        }
    }

    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "standard" => Some(Variant::Standard),
            "dot" => Some(Variant::Dot),
            _ => None,
        }
    }

    pub fn is_dot(&self) -> bool {
        matches!(self, Variant::Dot)
    }
}

impl<E> Default for Variant<E> {
    fn default() -> Self {
        Variant::Standard
    }
}

impl<E: Extension> fmt::Display for Variant<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<E: Extension> FromStr for Variant<E> {
    type Err = BadgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::builtin(s)
            .or_else(|| E::parse(s).map(Variant::Custom))
            .ok_or_else(|| invalid("variant", s, Self::BUILTIN, E::known()))
    }
}

/// Palette color of the marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Color<E = NoExtension> {
    Default,
    Primary,
    Secondary,
    Error,
    Info,
    Success,
    Warning,
    Custom(E),
}

impl<E: Extension> Color<E> {
    pub const BUILTIN: &'static [&'static str] = &[
        "default",
        "primary",
        "secondary",
        "error",
        "info",
        "success",
        "warning",
    ];

    pub fn name(&self) -> &str {
        match self {
            Color::Default => "default",
            Color::Primary => "primary",
            Color::Secondary => "secondary",
            Color::Error => "error",
            Color::Info => "info",
            Color::Success => "success",
            Color::Warning => "warning",
            Color::Custom(ext) => ext.name(),
        }
    }

    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Color::Default),
            "primary" => Some(Color::Primary),
            "secondary" => Some(Color::Secondary),
            "error" => Some(Color::Error),
            "info" => Some(Color::Info),
            "success" => Some(Color::Success),
            "warning" => Some(Color::Warning),
            _ => None,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Color::Default)
    }
}

impl<E> Default for Color<E> {
    fn default() -> Self {
        Color::Default
    }
}

impl<E: Extension> fmt::Display for Color<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<E: Extension> FromStr for Color<E> {
    type Err = BadgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::builtin(s)
            .or_else(|| E::parse(s).map(Color::Custom))
            .ok_or_else(|| invalid("color", s, Self::BUILTIN, E::known()))
    }
}

fn invalid(field: &'static str, value: &str, builtin: &[&str], extra: Vec<String>) -> BadgeError {
    let mut expected: Vec<&str> = builtin.to_vec();
    expected.extend(extra.iter().map(String::as_str));
    BadgeError::invalid_value(field, value, &expected)
}

macro_rules! name_serde {
    ($ty:ident) => {
        impl<E: Extension> Serialize for $ty<E> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.name())
            }
        }

        impl<'de, E: Extension> Deserialize<'de> for $ty<E> {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let name = String::deserialize(deserializer)?;
                name.parse().map_err(de::Error::custom)
            }
        }
    };
}

name_serde!(Variant);
name_serde!(Color);

/// Custom variant and color names a caller has declared
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideRegistry {
    variants: BTreeSet<String>,
    colors: BTreeSet<String>,
}

impl OverrideRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a custom variant name
    pub fn register_variant(&mut self, name: &str) -> Result<(), BadgeError> {
        let name = validate_name("overrides.variants", name)?;
        if Variant::<NoExtension>::builtin(&name).is_none() {
            self.variants.insert(name);
        }
        Ok(())
    }

    /// Registers a custom color name
    pub fn register_color(&mut self, name: &str) -> Result<(), BadgeError> {
        let name = validate_name("overrides.colors", name)?;
        if Color::<NoExtension>::builtin(&name).is_none() {
            self.colors.insert(name);
        }
        Ok(())
    }

    /// Builds a registry from lists of names
    pub fn from_names<V, C>(variants: V, colors: C) -> Result<Self, BadgeError>
    where
        V: IntoIterator,
        V::Item: AsRef<str>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let mut registry = Self::new();
        for name in variants {
            registry.register_variant(name.as_ref())?;
        }
        for name in colors {
            registry.register_color(name.as_ref())?;
        }
        Ok(registry)
    }

    pub fn variants(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(String::as_str)
    }

    pub fn colors(&self) -> impl Iterator<Item = &str> {
        self.colors.iter().map(String::as_str)
    }

    /// Parses a variant, accepting built-ins and registered names
    pub fn variant(&self, name: &str) -> Result<Variant<Registered>, BadgeError> {
        if let Some(builtin) = Variant::builtin(name) {
            return Ok(builtin);
        }
        if self.variants.contains(name) {
            return Ok(Variant::Custom(Registered(name.to_string())));
        }
        Err(invalid(
            "variant",
            name,
            Variant::<Registered>::BUILTIN,
            self.variants.iter().cloned().collect(),
        ))
    }

    /// Parses a color, accepting built-ins and registered names
    pub fn color(&self, name: &str) -> Result<Color<Registered>, BadgeError> {
        if let Some(builtin) = Color::builtin(name) {
            return Ok(builtin);
        }
        if self.colors.contains(name) {
            return Ok(Color::Custom(Registered(name.to_string())));
        }
        Err(invalid(
            "color",
            name,
            Color::<Registered>::BUILTIN,
            self.colors.iter().cloned().collect(),
        ))
    }
}

fn validate_name(field: &'static str, name: &str) -> Result<String, BadgeError> {
    let name = name.trim();
    let valid = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(name.to_string())
    } else {
        Err(BadgeError::invalid_value(
            field,
            name,
            &["a name starting with a letter, using letters, digits, '-' or '_'"],
        ))
    }
}
