//! Main CLI application structure

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use super::badge_args::BadgeArgs;
use super::output::{Output, OutputFormat};
use super::tui::PreviewOptions;
use super::{config_cmd, position, resolve, tui};
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "badge")]
#[command(author, version, about = "Resolve, render and preview overlay badges")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve element types and merged props of every slot
    Resolve {
        #[command(flatten)]
        badge: BadgeArgs,
    },

    /// Show the marker position for an anchor and shape
    Position {
        /// Corner, e.g. top-right
        anchor: Option<String>,

        /// Shape of the wrapped content
        #[arg(long, short = 'o')]
        overlap: Option<String>,

        /// Show all anchor/shape combinations
        #[arg(long, conflicts_with_all = ["anchor", "overlap"])]
        all: bool,
    },

    /// Render the badge as markup
    Render {
        #[command(flatten)]
        badge: BadgeArgs,

        /// Text content wrapped by the badge
        #[arg(long)]
        child: Option<String>,
    },

    /// Draw the badge in the terminal
    Preview {
        #[command(flatten)]
        badge: BadgeArgs,

        /// Label of the wrapped box
        #[arg(long, default_value = "content")]
        child: String,

        /// Canvas width in cells
        #[arg(long, default_value = "32")]
        width: u16,

        /// Canvas height in cells
        #[arg(long, default_value = "9")]
        height: u16,

        /// Open an interactive preview
        #[arg(long, short = 'i')]
        interactive: bool,
    },

    /// Show the effective configuration
    Config,
}

/// Installs the `tracing` subscriber; `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let default = if verbose { "badge_cli=debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let format = match cli.format {
        Some(format) => format,
        None => Config::load()
            .map(|config| OutputFormat::from(config.global.default_format))
            .unwrap_or_default(),
    };
    let output = Output::new(format, cli.verbose);

    output.verbose("Badge CLI starting");

    match cli.command {
        Commands::Resolve { badge } => resolve::resolve(&output, &badge)?,

        Commands::Position { anchor, overlap, all } => {
            output.verbose_ctx(
                "position",
                &format!("anchor={:?} overlap={:?} all={}", anchor, overlap, all),
            );
            position::position(&output, anchor.as_deref(), overlap.as_deref(), all)?
        }

        Commands::Render { badge, child } => resolve::render(&output, &badge, child.as_deref())?,

        Commands::Preview {
            badge,
            child,
            width,
            height,
            interactive,
        } => {
            let options = PreviewOptions {
                child: &child,
                width,
                height,
                interactive,
            };
            tui::run(&output, &badge, &options)?
        }

        Commands::Config => config_cmd::show(&output)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn badge_flags_flatten_into_subcommands() {
        let cli = Cli::try_parse_from([
            "badge", "resolve", "--anchor", "bottom-left", "--variant", "dot", "--content", "4",
        ])
        .unwrap();
        let Commands::Resolve { badge } = cli.command else {
            panic!("expected resolve");
        };
        assert_eq!(badge.anchor.as_deref(), Some("bottom-left"));
        assert_eq!(badge.variant.as_deref(), Some("dot"));
    }

    #[test]
    fn format_is_optional_and_global() {
        let cli =
            Cli::try_parse_from(["badge", "position", "top-left", "--format", "json"]).unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));

        let cli = Cli::try_parse_from(["badge", "config"]).unwrap();
        assert_eq!(cli.format, None);
    }

    #[test]
    fn all_conflicts_with_anchor() {
        assert!(Cli::try_parse_from(["badge", "position", "top-left", "--all"]).is_err());
    }
}
