//! Process-level plumbing shared by the members directory binaries:
//! layered configuration loading and logging initialisation.

pub mod config;
pub mod home_dir;
pub mod logging;

pub use config::{default_logging_config, AppConfig, CliArgs, ClientConfig, LoggingConfig, Section};
