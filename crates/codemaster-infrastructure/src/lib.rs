pub mod catalog_repository;
pub mod config_service;
pub mod paths;
pub mod progress_repository;
pub mod storage;

pub use crate::catalog_repository::{TomlCatalogRepository, load_catalog};
pub use crate::config_service::ConfigService;
pub use crate::paths::CodemasterPaths;
pub use crate::progress_repository::{COMPLETION_STATUS_KEY, KeyValueProgressRepository, POINTS_KEY};
pub use crate::storage::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore};
