//! # Storage Layer
//!
//! Configuration and prop files.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Project config | TOML | `.badge/config.toml` |
//! | Global config | TOML | `~/.config/badge/config.toml` |
//! | Prop files | TOML or JSON | anywhere, passed with `--props` |
//!
//! ## Key Types
//!
//! - [`Config`] - Project and global configuration
//! - [`props_file::load`] - Reads one badge prop set

mod config;
pub mod props_file;

pub use config::{
    Config, ConfigError, GlobalConfig, OutputFormat, OverridesConfig, ProjectConfig, PROJECT_DIR,
};
