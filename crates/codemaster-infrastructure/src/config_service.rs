//! Configuration service implementation.
//!
//! Loads the root configuration from `config.toml`
//! (`~/.config/codemaster/config.toml` unless a path is given).

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use codemaster_core::config::RootConfig;
use codemaster_core::error::{CodemasterError, Result};

use crate::paths::CodemasterPaths;

/// Loads and caches the root configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration, filled on first access.
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    /// Creates a service for the platform default config file.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(CodemasterPaths::config_file()?))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the root configuration, loading it from file if not cached.
    ///
    /// A missing file is created with the default configuration. A file
    /// that fails to parse is reported as `CodemasterError::Config`.
    pub fn get_config(&self) -> Result<RootConfig> {
        {
            let read_lock = self
                .config
                .read()
                .map_err(|e| CodemasterError::internal(e.to_string()))?;
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = self.load_or_create()?;

        let mut write_lock = self
            .config
            .write()
            .map_err(|e| CodemasterError::internal(e.to_string()))?;
        *write_lock = Some(loaded.clone());

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    fn load_or_create(&self) -> Result<RootConfig> {
        if !self.path.exists() {
            let default_config = RootConfig::default();
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&self.path, toml::to_string_pretty(&default_config)?)?;
            tracing::info!("[ConfigService] Created default config at {}", self.path.display());
            return Ok(default_config);
        }

        let content = fs::read_to_string(&self.path)?;
        toml::from_str(&content).map_err(|e| {
            CodemasterError::config(format!("{}: {}", self.path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");
        let service = ConfigService::with_path(&path);

        let config = service.get_config().unwrap();

        assert_eq!(config, RootConfig::default());
        assert!(path.exists());
        let written: RootConfig = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, config);
    }

    #[test]
    fn test_reads_existing_file_and_caches() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[logging]\nfilter = \"debug\"\n").unwrap();
        let service = ConfigService::with_path(&path);

        assert_eq!(service.get_config().unwrap().logging.filter, "debug");

        fs::write(&path, "[logging]\nfilter = \"trace\"\n").unwrap();
        assert_eq!(service.get_config().unwrap().logging.filter, "debug");

        service.invalidate_cache();
        assert_eq!(service.get_config().unwrap().logging.filter, "trace");
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[logging\nfilter = ").unwrap();

        let err = ConfigService::with_path(&path).get_config().unwrap_err();
        assert!(err.is_config());
    }
}
