//! Configuration handling for the badge CLI
//!
//! Configuration is stored in `.badge/config.toml` (project) and
//! `~/.config/badge/config.toml` (global). Project values beat global
//! values, which beat built-in defaults.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{ColorTokens, OverrideRegistry, StaticPalette, DEFAULT_CLASS_PREFIX};

/// Directory that marks a badge project
pub const PROJECT_DIR: &str = ".badge";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Names registered on top of the built-in variants and colors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverridesConfig {
    pub variants: Vec<String>,
    pub colors: Vec<String>,
}

/// Project-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Prefix of utility class names (`{prefix}-root`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_prefix: Option<String>,

    /// Registered variant and color names
    pub overrides: OverridesConfig,

    /// Color tokens keyed by color name
    pub palette: BTreeMap<String, ColorTokens>,
}

/// Global user configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_prefix: Option<String>,
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Combined configuration (global + project)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
    pub project_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from default locations
    pub fn load() -> Result<Self> {
        let global = Self::load_global()?;
        let (project, project_root) = Self::load_project()?;

        Ok(Self {
            project,
            global,
            project_root,
        })
    }

    /// Loads configuration for a specific project
    pub fn for_project(project_root: &Path) -> Result<Self> {
        let global = Self::load_global()?;
        let project = Self::load_project_config(project_root)?;

        Ok(Self {
            project,
            global,
            project_root: Some(project_root.to_path_buf()),
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "badge", "badge-cli").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration
    fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    /// Finds and loads project configuration
    fn load_project() -> Result<(ProjectConfig, Option<PathBuf>)> {
        let project_root = Self::find_project_root();

        match project_root {
            Some(root) => {
                let config = Self::load_project_config(&root)?;
                Ok((config, Some(root)))
            }
            None => Ok((ProjectConfig::default(), None)),
        }
    }

    /// Loads project configuration from a specific root
    fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
        let config_path = project_root.join(PROJECT_DIR).join("config.toml");

        if !config_path.exists() {
            return Ok(ProjectConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read project config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse project config")
    }

    /// Finds the project root by looking for a `.badge/` directory
    pub fn find_project_root() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::find_project_root_from(&current)
    }

    /// Walks up from `start` looking for a `.badge/` directory
    pub fn find_project_root_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            if current.join(PROJECT_DIR).is_dir() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Returns true if we're in a badge project
    pub fn is_in_project(&self) -> bool {
        self.project_root.is_some()
    }

    /// Effective utility class prefix
    pub fn class_prefix(&self) -> &str {
        self.project
            .class_prefix
            .as_deref()
            .or(self.global.class_prefix.as_deref())
            .unwrap_or(DEFAULT_CLASS_PREFIX)
    }

    /// Builds the registry of configured variant and color names
    pub fn registry(&self) -> Result<OverrideRegistry> {
        let overrides = &self.project.overrides;
        OverrideRegistry::from_names(&overrides.variants, &overrides.colors)
            .map_err(|e| ConfigError::Invalid(e.to_string()))
            .context("Invalid [overrides] in project config")
    }

    /// Built-in palette plus configured entries
    pub fn palette(&self) -> StaticPalette {
        StaticPalette::from(self.project.palette.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Palette, Variant};
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();

        assert_eq!(config.class_prefix(), "Badge");
        assert_eq!(config.global.default_format, OutputFormat::Text);
        assert!(!config.is_in_project());
    }

    #[test]
    fn parse_project_config() {
        let toml = r##"
class_prefix = "Mui"

[overrides]
variants = ["pulse"]
colors = ["brand"]

[palette.brand]
background = "#ff00aa"
foreground = "#000"
"##;

        let config: ProjectConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.class_prefix.as_deref(), Some("Mui"));
        assert_eq!(config.overrides.variants, vec!["pulse"]);
        assert_eq!(
            config.palette.get("brand"),
            Some(&ColorTokens::new("#ff00aa", "#000"))
        );
    }

    #[test]
    fn parse_global_config() {
        let toml = r#"
default_format = "json"
class_prefix = "G"
"#;

        let config: GlobalConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.default_format, OutputFormat::Json);
        assert_eq!(config.class_prefix.as_deref(), Some("G"));
    }

    #[test]
    fn project_prefix_beats_global() {
        let mut config = Config::default();
        config.global.class_prefix = Some("G".to_string());
        assert_eq!(config.class_prefix(), "G");

        config.project.class_prefix = Some("P".to_string());
        assert_eq!(config.class_prefix(), "P");
    }

    #[test]
    fn registry_from_overrides() {
        let mut config = Config::default();
        config.project.overrides.variants = vec!["pulse".to_string()];

        let registry = config.registry().unwrap();
        assert!(matches!(registry.variant("pulse"), Ok(Variant::Custom(_))));
        assert!(registry.variant("wobble").is_err());
    }

    #[test]
    fn invalid_override_name_is_config_error() {
        let mut config = Config::default();
        config.project.overrides.colors = vec!["not a name".to_string()];
        assert!(config.registry().is_err());
    }

    #[test]
    fn palette_includes_configured_colors() {
        let mut config = Config::default();
        config
            .project
            .palette
            .insert("brand".to_string(), ColorTokens::new("#123", "#fff"));

        let palette = config.palette();
        assert!(palette.tokens("brand").is_some());
        assert!(palette.tokens("primary").is_some());
    }

    #[test]
    fn find_project_root() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(PROJECT_DIR)).unwrap();

        let sub_dir = dir.path().join("sub").join("dir");
        fs::create_dir_all(&sub_dir).unwrap();

        let root = Config::find_project_root_from(&sub_dir);
        assert_eq!(root.as_deref(), Some(dir.path()));
    }

    #[test]
    fn for_project_reads_config_file() {
        let dir = TempDir::new().unwrap();
        let badge_dir = dir.path().join(PROJECT_DIR);
        fs::create_dir_all(&badge_dir).unwrap();
        fs::write(badge_dir.join("config.toml"), "class_prefix = \"Team\"\n").unwrap();

        let config = Config::for_project(dir.path()).unwrap();
        assert_eq!(config.class_prefix(), "Team");
        assert!(config.is_in_project());
    }

    #[test]
    fn malformed_project_config_is_error() {
        let dir = TempDir::new().unwrap();
        let badge_dir = dir.path().join(PROJECT_DIR);
        fs::create_dir_all(&badge_dir).unwrap();
        fs::write(badge_dir.join("config.toml"), "class_prefix = [").unwrap();

        assert!(Config::for_project(dir.path()).is_err());
    }
}
