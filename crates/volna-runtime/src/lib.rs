//! # Volna Runtime
//!
//! Configuration and logging layer for the Volna bot framework.
//!
//! The runtime crate owns the two ambient concerns the core deliberately
//! avoids: loading layered configuration (defaults → file → environment →
//! programmatic overrides) and wiring the global `tracing` subscriber.
//!
//! ## Bootstrap
//!
//! Initialization is one explicit sequence, no hidden static state:
//!
//! ```rust,ignore
//! let config = volna_runtime::bootstrap()?;
//!
//! let table = Registry::new().with(my_group).finish()?;
//! let dispatcher = Dispatcher::new(table);
//! ```

pub mod config;
pub mod error;
pub mod logging;

pub use config::{ConfigLoader, LogFormat, LogLevel, LoggingConfig, VolnaConfig};
pub use error::{ConfigError, ConfigResult};
pub use logging::{LoggingBuilder, init_from_config};

/// Loads configuration from the default locations and initializes logging.
///
/// # Errors
///
/// Propagates [`ConfigError`] from the loader; logging initialization
/// itself never fails (a pre-existing subscriber is left in place).
pub fn bootstrap() -> ConfigResult<VolnaConfig> {
    let config = config::load()?;
    logging::init_from_config(&config.logging);
    Ok(config)
}
