//! Element types and the render tree
//!
//! An [`ElementType`] names what a slot instantiates: either an intrinsic
//! tag (`span`, `div`) or a component known to the rendering engine
//! (`Avatar`, `MyRoot`). Resolution never renders anything itself; it
//! produces [`Element`] requests that a renderer turns into output.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use askama::Template;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

use super::props::{SlotProps, CLASS_NAME, STYLE};

/// What a slot instantiates
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// Intrinsic element, lowercase (`span`, `my-element`)
    Tag(String),

    /// Component reference, capitalised (`Avatar`)
    Component(String),
}

impl ElementType {
    pub fn tag(name: impl Into<String>) -> Self {
        ElementType::Tag(name.into())
    }

    pub fn component(name: impl Into<String>) -> Self {
        ElementType::Component(name.into())
    }

    pub fn name(&self) -> &str {
        match self {
            ElementType::Tag(name) | ElementType::Component(name) => name,
        }
    }

    pub fn is_component(&self) -> bool {
        matches!(self, ElementType::Component(_))
    }

    /// Checks the name is well formed for its kind
    pub fn validate(&self) -> Result<(), String> {
        let name = self.name();
        let Some(first) = name.chars().next() else {
            return Err("element type name is empty".to_string());
        };
        let rest = &name[first.len_utf8()..];

        match self {
            ElementType::Tag(_) => {
                if !first.is_ascii_lowercase() {
                    return Err(format!("tag '{}' must start with a lowercase letter", name));
                }
                if !rest
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
                {
                    return Err(format!("tag '{}' contains invalid characters", name));
                }
            }
            ElementType::Component(_) => {
                if !first.is_ascii_uppercase() {
                    return Err(format!(
                        "component '{}' must start with an uppercase letter",
                        name
                    ));
                }
                if !rest
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
                {
                    return Err(format!("component '{}' contains invalid characters", name));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementType {
    type Err = String;

    /// Lowercase names are tags, capitalised names are components
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let ty = if s.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
            ElementType::Component(s.to_string())
        } else {
            ElementType::Tag(s.to_string())
        };
        ty.validate()?;
        Ok(ty)
    }
}

impl Serialize for ElementType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for ElementType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(de::Error::custom)
    }
}

/// Decides which element types the rendering engine can instantiate
pub trait ElementCatalog {
    fn is_renderable(&self, ty: &ElementType) -> bool;
}

/// Accepts every well-formed element type
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyElement;

impl ElementCatalog for AnyElement {
    fn is_renderable(&self, ty: &ElementType) -> bool {
        ty.validate().is_ok()
    }
}

/// Accepts every well-formed tag and only the listed components
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownComponents(BTreeSet<String>);

impl KnownComponents {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }
}

impl ElementCatalog for KnownComponents {
    fn is_renderable(&self, ty: &ElementType) -> bool {
        ty.validate().is_ok()
            && match ty {
                ElementType::Tag(_) => true,
                ElementType::Component(name) => self.0.contains(name),
            }
    }
}

/// A node in the render tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }
}

/// An instantiation request: element type, props and children
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub ty: ElementType,
    pub props: SlotProps,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Element {
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Serialises the tree as HTML-like markup
    ///
    /// Attribute names and style properties must be plain identifiers;
    /// values and text are HTML-escaped.
    pub fn to_markup(&self) -> Result<String, MarkupError> {
        let mut out = String::new();
        self.write_markup(&mut out)?;
        Ok(out)
    }

    fn write_markup(&self, out: &mut String) -> Result<(), MarkupError> {
        self.ty.validate().map_err(MarkupError::InvalidElement)?;
        out.push('<');
        out.push_str(self.ty.name());

        for (key, value) in self.props.iter() {
            let name = if key == CLASS_NAME { "class" } else { key.as_str() };
            if !is_attribute_name(name) {
                return Err(MarkupError::InvalidAttribute(key.clone()));
            }
            match attribute_value(key, value)? {
                None => {}
                Some(Attribute::Flag) => {
                    out.push(' ');
                    out.push_str(name);
                }
                Some(Attribute::Value(v)) => {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    Escaped { text: &v }.render_into(out)?;
                    out.push('"');
                }
            }
        }
        out.push('>');

        for child in &self.children {
            match child {
                Node::Element(element) => element.write_markup(out)?,
                Node::Text(text) => Escaped { text }.render_into(out)?,
            }
        }

        out.push_str("</");
        out.push_str(self.ty.name());
        out.push('>');
        Ok(())
    }
}

/// Wraps a slot's resolved type and props into an instantiation request
///
/// `override_ty` wins over `default` when present.
pub fn instantiate(
    default: &ElementType,
    override_ty: Option<&ElementType>,
    props: SlotProps,
) -> Element {
    Element {
        ty: override_ty.unwrap_or(default).clone(),
        props,
        children: Vec::new(),
    }
}

/// Errors from serialising a render tree as markup
#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("Invalid element type: {0}")]
    InvalidElement(String),

    #[error("Invalid attribute name '{0}'")]
    InvalidAttribute(String),

    #[error("Invalid style property '{0}'")]
    InvalidStyleProperty(String),

    #[error("Failed to escape markup: {0}")]
    Escape(#[from] askama::Error),
}

/// HTML-escapes a value or text node
#[derive(Template)]
#[template(source = "{{ text }}", ext = "html")]
struct Escaped<'a> {
    text: &'a str,
}

enum Attribute {
    Flag,
    Value(String),
}

/// `[A-Za-z_:][-A-Za-z0-9_:.]*`
fn is_attribute_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == ':')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
}

/// Property names, including `--custom` properties
fn is_style_property(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn attribute_value(key: &str, value: &Value) -> Result<Option<Attribute>, MarkupError> {
    let attribute = match value {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some(Attribute::Flag),
        Value::String(s) => Some(Attribute::Value(s.clone())),
        Value::Number(n) => Some(Attribute::Value(n.to_string())),
        Value::Object(map) if key == STYLE => {
            let mut declarations = Vec::new();
            for (property, v) in map {
                if !is_style_property(property) {
                    return Err(MarkupError::InvalidStyleProperty(property.clone()));
                }
                match v {
                    Value::String(s) => declarations.push(format!("{}: {}", property, s)),
                    Value::Number(n) => declarations.push(format!("{}: {}", property, n)),
                    _ => {}
                }
            }
            (!declarations.is_empty()).then(|| Attribute::Value(declarations.join("; ")))
        }
        other => Some(Attribute::Value(other.to_string())),
    };
    Ok(attribute)
}
