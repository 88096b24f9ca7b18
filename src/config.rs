//! Configuration file management
//!
//! Reads gog's TOML configuration. Only settings that affect the CLI itself
//! live here; Google credentials are stored elsewhere.

use crate::{env_vars, paths};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config at {}: {source}", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config at {}: {source}", path.display())]
    ParseError {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },
}

/// Application configuration loaded from TOML files
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Enable debug logging (same as `--debug`)
    #[serde(default)]
    pub debug: Option<bool>,

    /// Shell completion settings
    #[serde(default)]
    pub completion: CompletionConfig,
}

/// `[completion]` table
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CompletionConfig {
    /// Extra names the program may be invoked as (for example `g` when
    /// `alias g=gog` is set), recognized as the first word of a command line
    #[serde(default)]
    pub program_names: Vec<String>,
}

impl Config {
    /// Load configuration.
    /// Priority: `GOG_CONFIG` -> ./.gog.toml -> `<config dir>/gogcli/config.toml`
    ///
    /// A missing file is skipped; a file that exists but cannot be read or
    /// parsed is an error. `GOG_NO_CONFIG` skips all files.
    pub fn load() -> Result<Self, ConfigError> {
        let custom = env_vars::gog_config().map(|path| paths::expand_path(&path));
        Self::load_with_options(custom.as_deref(), env_vars::gog_no_config())
    }

    /// Load configuration with custom options.
    ///
    /// # Arguments
    /// * `custom_path` - Optional custom path to config file (overrides defaults)
    /// * `skip_rc` - If true, skip loading config files (return default config)
    pub fn load_with_options(custom_path: Option<&Path>, skip_rc: bool) -> Result<Self, ConfigError> {
        if skip_rc {
            return Ok(Self::default());
        }

        if let Some(path) = custom_path {
            return Self::load_from(path);
        }

        let local = Path::new(paths::LOCAL_CONFIG_FILE);
        if let Some(config) = Self::load_if_exists(local)? {
            return Ok(config);
        }

        if let Some(user) = paths::user_config_file()
            && let Some(config) = Self::load_if_exists(&user)?
        {
            return Ok(config);
        }

        Ok(Self::default())
    }

    /// Load and parse a specific configuration file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: Box::new(source),
        })
    }

    fn load_if_exists(path: &Path) -> Result<Option<Self>, ConfigError> {
        if path.is_file() {
            Self::load_from(path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Whether debug logging was requested in the file
    pub fn debug_enabled(&self) -> bool {
        self.debug.unwrap_or(false)
    }
}
