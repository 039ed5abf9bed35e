//! Error types for the runtime layer.

use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Extraction or merge failure from the underlying provider stack.
    #[error(transparent)]
    Figment(#[from] Box<figment::Error>),

    /// A config file was requested but its format feature is disabled.
    #[error("config file '{path}' requires the 'toml-config' feature")]
    UnsupportedFormat {
        /// The requested file path.
        path: String,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
