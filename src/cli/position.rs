//! Position command

use anyhow::{bail, Result};
use serde_json::json;

use super::output::Output;
use crate::domain::{resolve_position, AnchorOrigin, Overlap};

/// Prints the marker position for one anchor/shape pair, or all of them
pub fn position(
    output: &Output,
    anchor: Option<&str>,
    overlap: Option<&str>,
    all: bool,
) -> Result<()> {
    let pairs: Vec<(AnchorOrigin, Overlap)> = if all {
        AnchorOrigin::all()
            .into_iter()
            .flat_map(|anchor| Overlap::all().iter().map(move |shape| (anchor, *shape)))
            .collect()
    } else {
        let anchor: AnchorOrigin = match anchor {
            Some(anchor) => anchor.parse()?,
            None => bail!("Missing ANCHOR (or pass --all)"),
        };
        let overlap: Overlap = match overlap {
            Some(shape) => shape.parse()?,
            None => Overlap::default(),
        };
        vec![(anchor, overlap)]
    };

    output.verbose_ctx("position", &format!("Resolving {} anchor/shape pairs", pairs.len()));

    if output.is_json() {
        let items: Vec<_> = pairs
            .iter()
            .map(|(anchor, shape)| {
                let position = resolve_position(*anchor, *shape);
                json!({
                    "anchorOrigin": anchor,
                    "overlap": shape,
                    "style": position.to_style(true),
                })
            })
            .collect();
        if all {
            output.data(&items);
        } else if let Some(item) = items.first() {
            output.data(item);
        }
        return Ok(());
    }

    for (i, (anchor, shape)) in pairs.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{} {}", anchor, shape);
        for (key, value) in resolve_position(*anchor, *shape).to_style(true) {
            println!("  {}: {}", key, value.as_str().unwrap_or_default());
        }
    }

    Ok(())
}
