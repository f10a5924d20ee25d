//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the
//! logic for building it at startup. The state holds the configuration and
//! the resolved storage directories, making them accessible to all request
//! handlers.

use crate::config::AppConfig;
use std::{path::PathBuf, sync::Arc};
use workflow_importer::StorageDirs;

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Arc<AppConfig>,
    /// Resolved storage directories for the path resolver.
    pub dirs: Arc<StorageDirs>,
}

/// Builds the shared application state from the configuration.
///
/// Resolves the storage directories and creates them if they do not exist
/// yet, so path references can be served immediately after startup.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let dirs = StorageDirs {
        input: PathBuf::from(&config.dirs.input),
        output: PathBuf::from(&config.dirs.output),
        temp: PathBuf::from(&config.dirs.temp),
    };
    for dir in [&dirs.input, &dirs.output, &dirs.temp] {
        tokio::fs::create_dir_all(dir).await?;
    }

    Ok(AppState {
        config: Arc::new(config),
        dirs: Arc::new(dirs),
    })
}
