use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use codemaster_application::ProgressionEngine;
use codemaster_infrastructure::{
    CodemasterPaths, ConfigService, FileKeyValueStore, KeyValueProgressRepository, load_catalog,
};
use tracing_subscriber::EnvFilter;

/// Loads config, installs logging, and opens the engine on the progress file.
pub fn build_engine(
    config_path: Option<PathBuf>,
    store_path: Option<PathBuf>,
) -> Result<ProgressionEngine> {
    let config_service = match config_path {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new()?,
    };
    let config = config_service
        .get_config()
        .with_context(|| format!("Failed to load {}", config_service.path().display()))?;

    init_tracing(&config.logging.filter);

    let store_path = match store_path.or(config.storage.progress_file) {
        Some(path) => path,
        None => CodemasterPaths::progress_file()?,
    };
    tracing::debug!("[bootstrap] Progress store: {}", store_path.display());

    let mut catalog_config = config.catalog;
    if catalog_config.path.is_none() {
        catalog_config.path = CodemasterPaths::catalog_file()
            .ok()
            .filter(|path| path.exists());
    }
    let catalog = load_catalog(&catalog_config).context("Failed to load course catalog")?;
    let store = Arc::new(FileKeyValueStore::open(store_path));
    let mut engine =
        ProgressionEngine::new(catalog, Arc::new(KeyValueProgressRepository::new(store)));

    if config.progression.seed_defaults {
        engine.seed_default_statuses();
    }
    Ok(engine)
}

/// `RUST_LOG` wins over the configured filter. Output goes to stderr.
fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
