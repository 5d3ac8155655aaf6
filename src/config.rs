//! Configuration for tick

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use log::debug;
use serde::Deserialize;

use crate::error::{Result, TickError};

/// Environment variable naming the backing task file.
pub const FILE_ENV: &str = "TICK_FILE";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Neon,
    Pastel,
    Matrix,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Path to the task file
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Colour theme for pretty output
    #[serde(default)]
    pub theme: Theme,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("todos.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            theme: Theme::default(),
        }
    }
}

impl Config {
    /// Load config from an explicit file, else the first default location
    /// that exists, else defaults.
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            if !config_path.exists() {
                return Err(TickError::Config(format!(
                    "config file {} not found",
                    config_path.display()
                )));
            }
            return Self::from_file(config_path);
        }

        let default_paths = [
            dirs::config_dir().map(|p| p.join("tick").join("config.yml")),
            Some(PathBuf::from("tick.yml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                return Self::from_file(path);
            }
        }

        Ok(Config::default())
    }

    fn from_file(path: &Path) -> Result<Self> {
        debug!("reading config from {}", path.display());
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Backing file: explicit flag, then `TICK_FILE`, then the configured path.
    pub fn resolve_store_path(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| {
            std::env::var_os(FILE_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| self.store_path.clone())
    }
}
