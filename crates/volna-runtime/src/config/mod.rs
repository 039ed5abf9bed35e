//! Configuration loading and schema.

pub mod loader;
pub mod schema;

pub use loader::{ConfigLoader, load};
pub use schema::{LogFormat, LogLevel, LoggingConfig, VolnaConfig};
