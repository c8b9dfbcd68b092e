//! Terminal preview of a resolved badge
//!
//! Without `--interactive` the preview is rendered off-screen and printed.
//! With it, a ratatui app lets the user cycle anchors, shapes, variants
//! and colors and watch the marker move.

mod app;
mod canvas;
mod event;
mod ui;

use std::panic::{self, AssertUnwindSafe};

use anyhow::{anyhow, Result};
use serde_json::json;

use super::badge_args::BadgeArgs;
use super::Output;
use crate::domain::{AnyElement, ResolveContext};
use crate::storage::Config;
use app::App;
use canvas::Scene;
use event::EventHandler;

/// Preview options
#[derive(Debug, Clone)]
pub struct PreviewOptions<'a> {
    pub child: &'a str,
    pub width: u16,
    pub height: u16,
    pub interactive: bool,
}

impl PreviewOptions<'_> {
    /// Size of the wrapped box: the label plus a border and some room
    fn child_size(&self) -> (u16, u16) {
        let label = canvas::cell_width(self.child);
        (label.saturating_add(6).max(8), 3)
    }
}

/// Launch the preview
pub fn run(output: &Output, args: &BadgeArgs, options: &PreviewOptions<'_>) -> Result<()> {
    let config = Config::load()?;
    let props = args.load(&config, output)?;
    let registry = config.registry()?;
    let palette = config.palette();
    let ctx = ResolveContext {
        class_prefix: config.class_prefix(),
        palette: &palette,
        catalog: &AnyElement,
    };

    if !options.interactive {
        let badge = props.resolve(&ctx)?;
        let (child_width, child_height) = options.child_size();
        let scene = Scene {
            badge: &badge,
            overlap: props.overlap,
            child: options.child,
            child_width,
            child_height,
        };
        let lines = canvas::to_lines(&scene, options.width, options.height);

        if output.is_json() {
            output.data(&json!({ "lines": lines }));
        } else {
            for line in lines {
                println!("{}", line);
            }
        }
        return Ok(());
    }

    output.verbose_ctx("tui", "Initializing preview");

    let mut app = App::new(props, &registry, ctx, options.child, options.child_size());
    let mut terminal = ui::init_terminal()?;
    let event_handler = EventHandler::new();

    // Restore the terminal even if the app panics
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        app.run(&mut terminal, event_handler)
    }));

    let restore_result = ui::restore_terminal();

    match result {
        Ok(inner_result) => {
            restore_result?;
            inner_result
        }
        Err(panic_payload) => {
            let _ = restore_result;
            if let Some(s) = panic_payload.downcast_ref::<&str>() {
                Err(anyhow!("Preview panicked: {}", s))
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                Err(anyhow!("Preview panicked: {}", s))
            } else {
                Err(anyhow!("Preview panicked with unknown error"))
            }
        }
    }
}
