//! # Application Configuration
//!
//! This module defines the configuration structure for the
//! `workflow-importer-server` and provides the logic for loading it from an
//! optional `config.yml` file and environment variables. Programmatic
//! defaults are layered first, then the file, then the environment, so the
//! server runs with no configuration at all.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;
use std::fs;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The storage directories image references resolve against.
#[derive(Debug, Deserialize, Clone)]
pub struct DirsConfig {
    pub input: String,
    pub output: String,
    pub temp: String,
}

/// The root configuration structure.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    pub port: u16,
    /// Storage directories for resolving `image_path` and triple references.
    pub dirs: DirsConfig,
    /// Maximum accepted multipart upload size, in bytes.
    pub max_upload_bytes: usize,
}

/// Loads the application configuration.
///
/// Layering, lowest to highest precedence:
/// 1. Programmatic defaults.
/// 2. An optional `config.yml` in the working directory (or the override
///    path, which must then exist).
/// 3. Environment variables: top-level keys directly (`PORT`), nested keys
///    with the `WORKFLOW_IMPORTER_` prefix (e.g.
///    `WORKFLOW_IMPORTER_DIRS__OUTPUT`).
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigBuilder::builder()
        .set_default("port", 8189)?
        .set_default("dirs.input", "data/input")?
        .set_default("dirs.output", "data/output")?
        .set_default("dirs.temp", "data/temp")?
        .set_default("max_upload_bytes", 50 * 1024 * 1024)?;

    let config_path = config_path_override.unwrap_or("config.yml");
    if std::path::Path::new(config_path).exists() {
        let content = fs::read_to_string(config_path).map_err(|e| {
            ConfigError::General(format!("Failed to read config file '{config_path}': {e}"))
        })?;
        builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
    } else if config_path_override.is_some() {
        return Err(ConfigError::General(format!(
            "Config file not found at '{config_path}'"
        )));
    }

    let settings = builder
        .add_source(Environment::default())
        .add_source(
            Environment::with_prefix("WORKFLOW_IMPORTER")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
