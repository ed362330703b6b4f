//! Layered configuration management for Keel services.
//!
//! Configuration is read from YAML files in a directory: base files load
//! first, then the file matching the current environment overrides them
//! key by key. The environment is selected by an environment variable with
//! a documented fallback.

pub mod domains;
pub mod environment;
pub mod error;
pub mod loader;

// Re-export main types
pub use domains::{AppConfig, DatabaseConfig, LoggingConfig, ServerConfig};
pub use environment::Environment;
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
