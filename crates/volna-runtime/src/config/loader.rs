//! Configuration loader using figment.
//!
//! Layered loading, later sources override earlier ones:
//!
//! 1. Built-in defaults
//! 2. Config file (`volna.toml`, feature `toml-config`)
//! 3. Environment variables (`VOLNA_*`, `__` as section separator)
//! 4. Programmatic overrides
//!
//! # Environment Variable Mapping
//!
//! - `VOLNA_LOGGING__LEVEL=debug` → `logging.level = "debug"`
//! - `VOLNA_LOGGING__FORMAT=pretty` → `logging.format = "pretty"`
//!
//! # Example
//!
//! ```rust,ignore
//! use volna_runtime::config::ConfigLoader;
//!
//! let config = ConfigLoader::new().load()?;
//!
//! let config = ConfigLoader::new()
//!     .file("./config/volna.toml")
//!     .load()?;
//! ```

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Serialized};
#[cfg(feature = "toml-config")]
use figment::providers::{Format, Toml};
#[cfg(feature = "toml-config")]
use tracing::debug;

use super::schema::VolnaConfig;
use crate::error::{ConfigError, ConfigResult};

/// Default config file searched in the working directory.
#[cfg(feature = "toml-config")]
const DEFAULT_CONFIG_FILE: &str = "volna.toml";

/// Environment variable prefix.
const ENV_PREFIX: &str = "VOLNA_";

/// Builder for layered configuration loading.
pub struct ConfigLoader {
    file: Option<PathBuf>,
    env: bool,
    overrides: Option<VolnaConfig>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a loader with defaults + `volna.toml` + environment layers.
    pub fn new() -> Self {
        Self {
            file: None,
            env: true,
            overrides: None,
        }
    }

    /// Loads from a specific file instead of the default search path.
    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Disables the environment variable layer.
    pub fn without_env(mut self) -> Self {
        self.env = false;
        self
    }

    /// Merges programmatic overrides as the highest-priority layer.
    pub fn merge(mut self, overrides: VolnaConfig) -> Self {
        self.overrides = Some(overrides);
        self
    }

    /// Extracts the final configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Figment`] on parse or type errors;
    /// [`ConfigError::UnsupportedFormat`] if a file was requested while the
    /// `toml-config` feature is disabled.
    pub fn load(self) -> ConfigResult<VolnaConfig> {
        let mut figment = Figment::from(Serialized::defaults(VolnaConfig::default()));

        #[cfg(feature = "toml-config")]
        {
            let path = self
                .file
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            if path.exists() {
                debug!(path = %path.display(), "loading config file");
                figment = figment.merge(Toml::file(path));
            }
        }
        #[cfg(not(feature = "toml-config"))]
        if let Some(path) = &self.file {
            return Err(ConfigError::UnsupportedFormat {
                path: path.display().to_string(),
            });
        }

        if self.env {
            figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        }

        if let Some(overrides) = self.overrides {
            figment = figment.merge(Serialized::defaults(overrides));
        }

        Ok(figment.extract()?)
    }
}

/// Loads configuration from the default locations.
pub fn load() -> ConfigResult<VolnaConfig> {
    ConfigLoader::new().load()
}
