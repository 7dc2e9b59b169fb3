//! Inventory settings with layered resolution.

use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::common::error::{InventoryError, Result};

/// Config file picked up from the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "inventory.toml";

pub const ENV_DATA_FILE: &str = "INVENTORY_DATA_FILE";
pub const ENV_LOG: &str = "INVENTORY_LOG";
pub const ENV_SHOW_TIMING: &str = "INVENTORY_SHOW_TIMING";

/// Runtime settings.
///
/// Resolution order (highest priority first):
/// 1. CLI flags
/// 2. Environment variables (`INVENTORY_*`)
/// 3. Config file (`--config` path, else `inventory.toml` if present)
/// 4. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// JSON file holding the vehicle records
    pub data_file: PathBuf,
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Print how long each shell option took
    pub show_timing: bool,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        InventoryConfig {
            data_file: PathBuf::from("cars.json"),
            log_filter: "warn".to_string(),
            show_timing: false,
        }
    }
}

/// Settings given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub data_file: Option<PathBuf>,
    pub verbose: bool,
}

impl InventoryConfig {
    /// Resolve the configuration against the process environment
    pub fn load(config_path: Option<&Path>, cli: &CliOverrides) -> Result<Self> {
        Self::load_with_env(config_path, cli, |key| std::env::var(key).ok())
    }

    /// Resolve the configuration with an explicit environment lookup
    pub fn load_with_env(
        config_path: Option<&Path>,
        cli: &CliOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env(env)?;
        config.apply_cli(cli);
        config.validate()?;

        Ok(config)
    }

    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            InventoryError::Config(format!("cannot read config file '{}': {}", path.display(), e))
        })?;

        toml::from_str(&content).map_err(|e| {
            InventoryError::Config(format!("invalid config file '{}': {}", path.display(), e))
        })
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(data_file) = env(ENV_DATA_FILE) {
            self.data_file = PathBuf::from(data_file);
        }

        if let Some(filter) = env(ENV_LOG) {
            self.log_filter = filter;
        }

        if let Some(flag) = env(ENV_SHOW_TIMING) {
            self.show_timing = parse_flag(&flag).ok_or_else(|| {
                InventoryError::Config(format!("{} must be true or false, got '{}'", ENV_SHOW_TIMING, flag))
            })?;
        }

        Ok(())
    }

    fn apply_cli(&mut self, cli: &CliOverrides) {
        if let Some(ref data_file) = cli.data_file {
            self.data_file = data_file.clone();
        }

        if cli.verbose {
            self.log_filter = "debug".to_string();
        }
    }

    /// Validate the resolved values
    pub fn validate(&self) -> Result<()> {
        if self.data_file.as_os_str().is_empty() {
            return Err(InventoryError::Config("data_file must not be empty".to_string()));
        }

        if self.log_filter.trim().is_empty() {
            return Err(InventoryError::Config("log_filter must not be empty".to_string()));
        }

        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
