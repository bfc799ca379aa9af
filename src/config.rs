//! Runtime configuration for the `circles` binary.
//!
//! Loaded from an optional TOML file; every section has defaults so an empty
//! file (or no file) yields an in-memory registry starting at block 0.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CircleError, CircleResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub chain: ChainConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the registry keeps its state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StorageConfig {
    /// Discarded when the process exits.
    #[default]
    Memory,

    /// SQLite database file.
    File { path: PathBuf },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Height of the last block before the first submitted transaction.
    #[serde(default)]
    pub genesis_height: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, used when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

fn default_level() -> String {
    "warn".to_string()
}

impl RegistryConfig {
    /// Load from `path`, or return the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> CircleResult<Self> {
        match path {
            Some(p) => {
                let text = fs::read_to_string(p)?;
                Self::from_toml(&text)
                    .map_err(|e| CircleError::Config(format!("{}: {}", p.display(), e)))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(text: &str) -> CircleResult<Self> {
        toml::from_str(text).map_err(|e| CircleError::Config(e.to_string()))
    }
}
