//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `resolve` | Element type and merged props of every slot |
//! | `position` | Marker position style for an anchor and shape |
//! | `render` | Render tree as markup |
//! | `preview` | Terminal preview, optionally interactive |
//! | `config` | Effective configuration |
//!
//! ## Output Formats
//!
//! All commands support the `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output:
//! ```bash
//! badge --verbose resolve --variant dot
//! ```
//!
//! `RUST_LOG` controls the library's `tracing` events independently.

mod app;
mod badge_args;
mod config_cmd;
mod output;
mod position;
mod resolve;
mod tui;

pub use app::{run, Cli, Commands};
pub use badge_args::BadgeArgs;
pub use output::{Output, OutputFormat};
