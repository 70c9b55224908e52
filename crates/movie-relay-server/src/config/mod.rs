//! Application configuration module.
//!
//! Loads the TOML config file holding listener and upstream settings.
//! The TMDB API key itself is read from the environment, never from the file.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, ValidationError};
pub use paths::resolve_config_path;
