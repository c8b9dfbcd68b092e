//! Prop bags attached to slots
//!
//! Layering follows the usual component rules: `className` strings are
//! concatenated, `style` objects are merged declaration by declaration and
//! every other key is replaced by the upper layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const CLASS_NAME: &str = "className";
pub const STYLE: &str = "style";

/// Props for one slot, keyed by prop name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotProps(BTreeMap<String, Value>);

impl SlotProps {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder form of [`SlotProps::set`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn class_name(&self) -> Option<&str> {
        self.0.get(CLASS_NAME).and_then(Value::as_str)
    }

    pub fn style(&self) -> Option<&Map<String, Value>> {
        self.0.get(STYLE).and_then(Value::as_object)
    }

    /// Converts a JSON object into props; other values yield `None`
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map.into_iter().collect())),
            _ => None,
        }
    }

    /// Layers `upper` on top of these props
    ///
    /// A `null` in `upper` removes the key, except for `className` and
    /// `style` where it contributes nothing.
    pub fn merge(&mut self, upper: &SlotProps) {
        for (key, value) in upper.iter() {
            match key.as_str() {
                CLASS_NAME => self.merge_class_name(value),
                STYLE => self.merge_style(value),
                _ if value.is_null() => {
                    self.0.remove(key);
                }
                _ => {
                    self.0.insert(key.clone(), value.clone());
                }
            }
        }
    }

    /// Returns these props with `upper` layered on top
    pub fn merged(mut self, upper: &SlotProps) -> Self {
        self.merge(upper);
        self
    }

    /// Restores style declarations that a caller layer removed
    ///
    /// Values a caller replaced are kept; only missing or `null`
    /// declarations fall back to `required`.
    pub fn retain_style(&mut self, required: &Map<String, Value>) {
        let style = self
            .0
            .entry(STYLE.to_string())
            .or_insert_with(|| Value::Object(Map::new()));

        if !style.is_object() {
            *style = Value::Object(Map::new());
        }

        if let Value::Object(style) = style {
            for (key, value) in required {
                let missing = style.get(key).map_or(true, Value::is_null);
                if missing {
                    style.insert(key.clone(), value.clone());
                }
            }
        }
    }

    fn merge_class_name(&mut self, value: &Value) {
        let Some(upper) = value.as_str().map(str::trim).filter(|s| !s.is_empty()) else {
            return;
        };

        let joined = match self.class_name().map(str::trim).filter(|s| !s.is_empty()) {
            Some(base) => format!("{} {}", base, upper),
            None => upper.to_string(),
        };
        self.0.insert(CLASS_NAME.to_string(), Value::String(joined));
    }

    fn merge_style(&mut self, value: &Value) {
        let Some(upper) = value.as_object() else {
            return;
        };

        let base = self
            .0
            .entry(STYLE.to_string())
            .or_insert_with(|| Value::Object(Map::new()));

        if !base.is_object() {
            *base = Value::Object(Map::new());
        }

        if let Value::Object(base) = base {
            for (key, value) in upper {
                if value.is_null() {
                    base.remove(key);
                } else {
                    base.insert(key.clone(), value.clone());
                }
            }
        }
    }
}

impl FromIterator<(String, Value)> for SlotProps {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
