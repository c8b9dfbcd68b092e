//! Config command

use anyhow::Result;
use serde_json::json;

use super::output::Output;
use crate::storage::Config;

/// Prints the effective configuration
pub fn show(output: &Output) -> Result<()> {
    let config = Config::load()?;
    let registry = config.registry()?;
    let root = config
        .project_root
        .as_ref()
        .map(|p| p.display().to_string());
    let global_dir = Config::global_config_dir().map(|p| p.display().to_string());

    if output.is_json() {
        output.data(&json!({
            "project_root": root,
            "global_config_dir": global_dir,
            "class_prefix": config.class_prefix(),
            "default_format": config.global.default_format,
            "variants": registry.variants().collect::<Vec<_>>(),
            "colors": registry.colors().collect::<Vec<_>>(),
            "palette": config.project.palette,
        }));
        return Ok(());
    }

    println!("project root:   {}", root.as_deref().unwrap_or("(none)"));
    println!("global config:  {}", global_dir.as_deref().unwrap_or("(unknown)"));
    println!("class prefix:   {}", config.class_prefix());
    println!("variants:       {}", list(registry.variants()));
    println!("colors:         {}", list(registry.colors()));
    for (color, tokens) in &config.project.palette {
        println!(
            "palette.{}: background={} foreground={}",
            color,
            tokens.background.as_deref().unwrap_or("-"),
            tokens.foreground.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}

fn list<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let names: Vec<_> = names.collect();
    if names.is_empty() {
        "(built-in only)".to_string()
    } else {
        names.join(", ")
    }
}
