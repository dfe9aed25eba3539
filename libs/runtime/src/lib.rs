//! Runtime support for the clinic server: layered configuration and
//! tracing/logging initialization.

pub mod config;
pub mod logging;

pub use config::{AppConfig, CliArgs, DatabaseConfig, LoggingConfig, ServerConfig};
