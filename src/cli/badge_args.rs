//! Badge prop flags shared by `resolve`, `render` and `preview`

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde_json::Value;

use super::output::Output;
use crate::domain::{
    AnchorOrigin, BadgeContent, BadgeProps, RawAnchorOrigin, RawBadgeProps, RawLegacyComponents,
    RawSlotComponents, Registered, SlotProps, SlotPropsSet,
};
use crate::storage::{props_file, Config};

#[derive(Args, Debug, Clone, Default)]
pub struct BadgeArgs {
    /// Prop file (.toml or .json); flags override its values
    #[arg(long, value_name = "FILE")]
    pub props: Option<PathBuf>,

    /// Corner of the wrapped content (top-right, bottom-left, ...)
    #[arg(long, short = 'a', value_name = "ANCHOR")]
    pub anchor: Option<String>,

    /// Shape of the wrapped content (rectangular, circular)
    #[arg(long, short = 'o', value_name = "SHAPE")]
    pub overlap: Option<String>,

    /// Marker variant (standard, dot, or a registered name)
    #[arg(long)]
    pub variant: Option<String>,

    /// Marker color (default, primary, ..., or a registered name)
    #[arg(long)]
    pub color: Option<String>,

    /// Marker content; integers are capped at --max
    #[arg(long)]
    pub content: Option<String>,

    /// Cap for numeric content
    #[arg(long)]
    pub max: Option<u64>,

    /// Keep the marker visible when the content is 0
    #[arg(long)]
    pub show_zero: bool,

    /// Hide the marker
    #[arg(long, conflicts_with = "visible")]
    pub invisible: bool,

    /// Force the marker visible (a hidden zero stays hidden without --show-zero)
    #[arg(long)]
    pub visible: bool,

    /// Class appended to the root
    #[arg(long)]
    pub class_name: Option<String>,

    /// Root element type when no slot override sets one
    #[arg(long, value_name = "TYPE")]
    pub component: Option<String>,

    /// Root element type through `slots.root`
    #[arg(long, value_name = "TYPE")]
    pub slot_root: Option<String>,

    /// Root element type through the legacy `components.Root`
    #[arg(long, value_name = "TYPE")]
    pub legacy_root: Option<String>,

    /// `slotProps` as JSON, e.g. '{"badge":{"title":"x"}}'
    #[arg(long, value_name = "JSON")]
    pub slot_props: Option<String>,

    /// `componentsProps` as JSON
    #[arg(long, value_name = "JSON")]
    pub components_props: Option<String>,

    /// Extra class for a utility class key (KEY=CLASS, repeatable)
    #[arg(long = "class", value_name = "KEY=CLASS")]
    pub classes: Vec<String>,

    /// Passthrough root attribute (KEY=VALUE, repeatable)
    #[arg(long = "attr", value_name = "KEY=VALUE")]
    pub attrs: Vec<String>,
}

impl BadgeArgs {
    /// Combines the prop file (if any) with the flags
    pub fn to_raw(&self) -> Result<RawBadgeProps> {
        let mut raw = match &self.props {
            Some(path) => props_file::load(path)?,
            None => RawBadgeProps::default(),
        };
        raw.merge_from(self.flags()?);
        Ok(raw)
    }

    /// Builds typed props, validating every value against the config
    pub fn load(
        &self,
        config: &Config,
        output: &Output,
    ) -> Result<BadgeProps<Registered, Registered>> {
        let raw = self.to_raw()?;
        output.verbose_ctx("props", &format!("Raw props: {:?}", raw));

        let registry = config.registry()?;
        let props = raw.validate(&registry)?;
        output.verbose_ctx(
            "props",
            &format!(
                "anchor={} overlap={} variant={} color={}",
                props.anchor_origin, props.overlap, props.variant, props.color
            ),
        );
        Ok(props)
    }

    fn flags(&self) -> Result<RawBadgeProps> {
        let anchor_origin = match &self.anchor {
            Some(anchor) => {
                let anchor: AnchorOrigin = anchor.parse()?;
                Some(RawAnchorOrigin {
                    vertical: Some(anchor.vertical.to_string()),
                    horizontal: Some(anchor.horizontal.to_string()),
                })
            }
            None => None,
        };

        let invisible = match (self.invisible, self.visible) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        let classes = if self.classes.is_empty() {
            None
        } else {
            let mut map = std::collections::BTreeMap::new();
            for pair in &self.classes {
                let (key, class) = split_pair(pair, "--class")?;
                map.insert(key.to_string(), class.to_string());
            }
            Some(map)
        };

        let attrs = if self.attrs.is_empty() {
            None
        } else {
            let mut props = SlotProps::new();
            for pair in &self.attrs {
                let (key, value) = split_pair(pair, "--attr")?;
                props.set(key, attr_value(value));
            }
            Some(props)
        };

        Ok(RawBadgeProps {
            anchor_origin,
            overlap: self.overlap.clone(),
            variant: self.variant.clone(),
            color: self.color.clone(),
            badge_content: self.content.as_deref().map(parse_content),
            max: self.max,
            show_zero: self.show_zero.then_some(true),
            invisible,
            class_name: self.class_name.clone(),
            component: self.component.clone(),
            classes,
            attrs,
            components: self.legacy_root.clone().map(|root| RawLegacyComponents {
                root: Some(root),
                badge: None,
            }),
            components_props: parse_props_set(
                self.components_props.as_deref(),
                "--components-props",
            )?,
            slots: self.slot_root.clone().map(|root| RawSlotComponents {
                root: Some(root),
                badge: None,
            }),
            slot_props: parse_props_set(self.slot_props.as_deref(), "--slot-props")?,
        })
    }
}

/// Integers become counts, anything else is text
fn parse_content(raw: &str) -> BadgeContent {
    match raw.trim().parse::<i64>() {
        Ok(n) => BadgeContent::Number(n),
        Err(_) => BadgeContent::Text(raw.to_string()),
    }
}

fn split_pair<'a>(pair: &'a str, flag: &str) -> Result<(&'a str, &'a str)> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => bail!("Invalid {} '{}': expected KEY=VALUE", flag, pair),
    }
}

/// JSON literals keep their type; anything else is a string
fn attr_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn parse_props_set(raw: Option<&str>, flag: &str) -> Result<Option<SlotPropsSet>> {
    raw.map(|json| {
        serde_json::from_str(json).with_context(|| format!("Invalid {} JSON", flag))
    })
    .transpose()
}
