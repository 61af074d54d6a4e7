//! Process-level plumbing shared by the server binary: layered configuration
//! loading and logging bootstrap.

pub mod config;
pub mod logging;

pub use config::{
    AppConfig, AuthConfig, CliArgs, DatabaseConfig, LoggingConfig, ServerConfig, StorageConfig,
};
