//! Resolution commands (resolve, render)

use anyhow::Result;
use serde_json::Value;

use super::badge_args::BadgeArgs;
use super::output::Output;
use crate::domain::{AnyElement, Node, ResolveContext, ResolvedBadge, ResolvedSlot, Slot};
use crate::storage::Config;

/// Resolves a badge with the effective configuration
pub fn resolve_badge(args: &BadgeArgs, config: &Config, output: &Output) -> Result<ResolvedBadge> {
    let props = args.load(config, output)?;
    let palette = config.palette();
    let ctx = ResolveContext {
        class_prefix: config.class_prefix(),
        palette: &palette,
        catalog: &AnyElement,
    };

    output.verbose_ctx(
        "resolve",
        &format!("Resolving with class prefix '{}'", ctx.class_prefix),
    );
    let resolved = props.resolve(&ctx)?;
    output.verbose_ctx(
        "resolve",
        &format!(
            "root={} badge={} invisible={}",
            resolved.slots.root.element, resolved.slots.badge.element, resolved.content.invisible
        ),
    );

    Ok(resolved)
}

/// Prints the resolved slot set
pub fn resolve(output: &Output, args: &BadgeArgs) -> Result<()> {
    let config = Config::load()?;
    let resolved = resolve_badge(args, &config, output)?;

    if output.is_json() {
        output.data(&resolved);
        return Ok(());
    }

    for slot in Slot::all() {
        print_slot(*slot, resolved.slots.get(*slot));
    }

    let content = resolved.content.display.as_deref().unwrap_or("(empty)");
    let visibility = if resolved.content.invisible {
        "invisible"
    } else {
        "visible"
    };
    println!("content: {} ({})", content, visibility);

    Ok(())
}

fn print_slot(slot: Slot, resolved: &ResolvedSlot) {
    println!("{} <{}>", slot, resolved.element);
    for (key, value) in resolved.props.iter() {
        match value {
            Value::Object(map) => {
                println!("  {}:", key);
                for (name, v) in map {
                    println!("    {}: {}", name, plain(v));
                }
            }
            other => println!("  {}: {}", key, plain(other)),
        }
    }
}

fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Prints the render tree as markup
pub fn render(output: &Output, args: &BadgeArgs, child: Option<&str>) -> Result<()> {
    let config = Config::load()?;
    let resolved = resolve_badge(args, &config, output)?;

    let children = child.map(Node::text).into_iter().collect();
    let tree = resolved.render(children);

    if output.is_json() {
        output.data(&tree);
    } else {
        println!("{}", tree.to_markup()?);
    }

    Ok(())
}
