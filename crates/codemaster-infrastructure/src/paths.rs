//! Unified path management for codemaster files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/codemaster/        # Config directory
//! ├── config.toml              # Application configuration
//! ├── progress.json            # Key-value store with the progress maps
//! └── catalog.toml             # Optional course catalog
//! ```

use std::path::PathBuf;

use codemaster_core::CodemasterError;

const APP_DIR: &str = "codemaster";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for CodemasterError {
    fn from(e: PathError) -> Self {
        CodemasterError::config(e.to_string())
    }
}

pub struct CodemasterPaths;

impl CodemasterPaths {
    /// Returns the codemaster configuration directory (e.g. `~/.config/codemaster/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Default location of the progress key-value store.
    pub fn progress_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("progress.json"))
    }

    pub fn catalog_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("catalog.toml"))
    }
}
