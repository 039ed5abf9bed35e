//! Logging setup over `tracing` and `tracing-subscriber`.
//!
//! # Configuration-Based Initialization
//!
//! ```rust,ignore
//! let config = volna_runtime::config::load()?;
//! volna_runtime::logging::init_from_config(&config.logging);
//! ```
//!
//! # Manual Initialization
//!
//! ```rust,ignore
//! use volna_runtime::logging::LoggingBuilder;
//!
//! LoggingBuilder::new()
//!     .with_level(tracing::Level::DEBUG)
//!     .directive("volna_core=trace")
//!     .init();
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::schema::{LogFormat, LoggingConfig};

/// Initialize logging from a [`LoggingConfig`].
///
/// Safe to call more than once; subsequent calls are no-ops.
pub fn init_from_config(config: &LoggingConfig) {
    let _ = LoggingBuilder::from_config(config).try_init();
}

/// A builder for configuring the global tracing subscriber.
#[derive(Default)]
pub struct LoggingBuilder {
    directives: Vec<String>,
    level: Option<tracing::Level>,
    format: LogFormat,
    with_target: bool,
}

impl LoggingBuilder {
    /// Creates a builder with compact output and targets shown.
    pub fn new() -> Self {
        Self {
            format: LogFormat::Compact,
            with_target: true,
            ..Default::default()
        }
    }

    /// Creates a builder from a [`LoggingConfig`].
    pub fn from_config(config: &LoggingConfig) -> Self {
        let mut builder = Self::new();
        builder.level = Some(config.level.to_tracing_level());
        builder.format = config.format;
        for (module, level) in &config.filters {
            builder.directives.push(format!("{}={}", module, level.as_str()));
        }
        builder
    }

    /// Sets the global log level.
    pub fn with_level(mut self, level: tracing::Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Adds a filter directive, e.g. `"volna_core=debug"`.
    pub fn directive(mut self, directive: &str) -> Self {
        self.directives.push(directive.to_string());
        self
    }

    /// Sets the output format.
    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Includes or hides the target (module path) in log output.
    pub fn with_target(mut self, enabled: bool) -> Self {
        self.with_target = enabled;
        self
    }

    /// Builds the filter; `RUST_LOG` takes precedence over configured levels.
    fn build_filter(&self) -> EnvFilter {
        let base_level = self.level.unwrap_or(tracing::Level::INFO);
        let base_filter = base_level.to_string().to_lowercase();

        let mut filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&base_filter));

        for directive in &self.directives {
            if let Ok(d) = directive.parse() {
                filter = filter.add_directive(d);
            }
        }

        filter
    }

    /// Initializes the global subscriber, ignoring an already-set one.
    pub fn init(self) {
        let _ = self.try_init();
    }

    /// Tries to initialize the global subscriber.
    pub fn try_init(self) -> Result<(), TryInitError> {
        let filter = self.build_filter();

        match self.format {
            #[cfg(feature = "json-log")]
            LogFormat::Json => {
                let layer = fmt::layer().json().with_target(self.with_target);
                tracing_subscriber::registry()
                    .with(layer)
                    .with(filter)
                    .try_init()
            }
            #[cfg(not(feature = "json-log"))]
            LogFormat::Json | LogFormat::Compact => {
                let layer = fmt::layer().compact().with_target(self.with_target);
                tracing_subscriber::registry()
                    .with(layer)
                    .with(filter)
                    .try_init()
            }
            #[cfg(feature = "json-log")]
            LogFormat::Compact => {
                let layer = fmt::layer().compact().with_target(self.with_target);
                tracing_subscriber::registry()
                    .with(layer)
                    .with(filter)
                    .try_init()
            }
            LogFormat::Full => {
                let layer = fmt::layer().with_target(self.with_target);
                tracing_subscriber::registry()
                    .with(layer)
                    .with(filter)
                    .try_init()
            }
            LogFormat::Pretty => {
                let layer = fmt::layer().pretty().with_target(self.with_target);
                tracing_subscriber::registry()
                    .with(layer)
                    .with(filter)
                    .try_init()
            }
        }
    }
}
