//! Course catalog loading.
//!
//! A catalog file is a TOML document of nested `[[course]]`,
//! `[[course.stage]]`, `[[course.stage.lesson]]` and
//! `[[course.stage.lesson.sub_lesson]]` tables. Sub-lessons do not repeat
//! their owner id; it is filled in after parsing.

use std::fs;
use std::path::{Path, PathBuf};

use codemaster_core::config::CatalogConfig;
use codemaster_core::course::{Course, CourseCatalog, sample};
use codemaster_core::error::{CodemasterError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "course")]
    courses: Vec<Course>,
}

/// Reads and writes a TOML course catalog.
#[derive(Debug, Clone)]
pub struct TomlCatalogRepository {
    path: PathBuf,
}

impl TomlCatalogRepository {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses the catalog file. A missing file is `NotFound`.
    pub fn load(&self) -> Result<CourseCatalog> {
        if !self.path.exists() {
            return Err(CodemasterError::not_found(
                "catalog",
                self.path.display().to_string(),
            ));
        }

        let content = fs::read_to_string(&self.path)?;
        let file: CatalogFile = toml::from_str(&content)?;
        let catalog = CourseCatalog::new(file.courses);
        warn_on_duplicates(&catalog);

        tracing::debug!(
            "[TomlCatalogRepository] Loaded {} courses from {}",
            catalog.courses().len(),
            self.path.display()
        );
        Ok(catalog)
    }

    pub fn save(&self, catalog: &CourseCatalog) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = CatalogFile {
            courses: catalog.courses().to_vec(),
        };
        fs::write(&self.path, toml::to_string_pretty(&file)?)?;
        Ok(())
    }
}

/// Loads the configured catalog, or the built-in course when none is set.
pub fn load_catalog(config: &CatalogConfig) -> Result<CourseCatalog> {
    match &config.path {
        Some(path) => TomlCatalogRepository::with_path(path).load(),
        None => Ok(CourseCatalog::new(sample::beginner_c_courses())),
    }
}

fn warn_on_duplicates(catalog: &CourseCatalog) {
    for id in catalog.duplicate_ids() {
        tracing::warn!(
            "[TomlCatalogRepository] Id '{}' is used by more than one lesson or sub-lesson; they will share progress",
            id
        );
    }
}
