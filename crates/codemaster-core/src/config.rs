//! Application configuration model (`config.toml`).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RootConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub progression: ProgressionConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageConfig {
    /// Key-value file holding the progress maps. Defaults to the platform
    /// config directory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_file: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogConfig {
    /// TOML course catalog. The built-in course is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "warn".to_string()
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ProgressionConfig {
    /// Insert each node's default status into the completion map on startup.
    #[serde(default = "default_true")]
    pub seed_defaults: bool,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            seed_defaults: true,
        }
    }
}

fn default_true() -> bool {
    true
}
