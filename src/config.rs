//! Configuration management for rename
//!
//! rename reads optional defaults from ~/.rename/config.toml. Every field may
//! be omitted; command-line flags are combined with the values found here.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// When to colorize previews
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

/// rename configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Preview output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Default behavior for move/copy
    #[serde(default)]
    pub behavior: BehaviorConfig,

    /// Debug log settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Color mode: "auto", "always", or "never"
    #[serde(default = "default_color")]
    pub color: String,

    /// Always show renamed files
    #[serde(default)]
    pub verbose: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            verbose: false,
        }
    }
}

impl OutputConfig {
    pub fn color_mode(&self) -> Result<ColorMode> {
        ColorMode::parse(&self.color).with_context(|| {
            format!(
                "Invalid color: {} (must be 'auto', 'always', or 'never')",
                self.color
            )
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BehaviorConfig {
    /// Overwrite existing files
    #[serde(default)]
    pub force: bool,

    /// Copy instead of move
    #[serde(default)]
    pub copy: bool,

    /// Ask before renaming
    #[serde(default)]
    pub interactive: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write a debug log to ~/.rename/rename.log
    #[serde(default)]
    pub debug: bool,
}

fn default_color() -> String {
    "auto".to_string()
}

/// Directory holding the config file and the debug log
pub fn rename_dir() -> Result<PathBuf> {
    let home_dir =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home_dir.join(".rename"))
}

/// Get the configuration file path
pub fn config_file_path() -> Result<PathBuf> {
    Ok(rename_dir()?.join("config.toml"))
}

/// Parse configuration text
pub fn parse_config(text: &str) -> Result<Config> {
    let config: Config = toml::from_str(text).context("Failed to parse configuration")?;
    validate_config(&config)?;
    Ok(config)
}

/// Load configuration from a specific file
pub fn load_config_from(path: &Path) -> Result<Config> {
    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config(&config_str)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}

/// Load configuration
///
/// An explicit path must exist. Without one, the default location is used
/// and a missing file means defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return load_config_from(path);
    }

    let config_path = match config_file_path() {
        Ok(path) => path,
        Err(_) => return Ok(Config::default()),
    };

    if !config_path.exists() {
        return Ok(Config::default());
    }

    load_config_from(&config_path)
}

/// Validate configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    config.output.color_mode()?;
    Ok(())
}
