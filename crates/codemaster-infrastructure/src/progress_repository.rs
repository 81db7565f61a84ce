//! Progress repository over a string key-value store.
//!
//! Each map is stored as one JSON blob under its own key, the way a mobile
//! app keeps them in shared preferences.

use std::sync::Arc;

use codemaster_core::error::Result;
use codemaster_core::progress::{CompletionStatusMap, PointsMap, ProgressRepository};
use serde::{Serialize, de::DeserializeOwned};

use crate::storage::KeyValueStore;

/// Key of the serialized `id → LessonStatus` map.
pub const COMPLETION_STATUS_KEY: &str = "lesson_completion_status";
/// Key of the serialized `id → points` map.
pub const POINTS_KEY: &str = "points";

/// JSON-encodes the progress maps into a [`KeyValueStore`].
pub struct KeyValueProgressRepository<S: ?Sized> {
    store: Arc<S>,
}

impl<S: KeyValueStore + ?Sized> KeyValueProgressRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    fn load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.store.get_string(key)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn save_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        tracing::debug!("[ProgressRepository] Writing {} ({} bytes)", key, json.len());
        self.store.put_string(key, &json)
    }
}

impl<S: KeyValueStore + ?Sized> ProgressRepository for KeyValueProgressRepository<S> {
    fn load_completion_status(&self) -> Result<Option<CompletionStatusMap>> {
        self.load_json(COMPLETION_STATUS_KEY)
    }

    fn save_completion_status(&self, status: &CompletionStatusMap) -> Result<()> {
        self.save_json(COMPLETION_STATUS_KEY, status)
    }

    fn load_points(&self) -> Result<Option<PointsMap>> {
        self.load_json(POINTS_KEY)
    }

    fn save_points(&self, points: &PointsMap) -> Result<()> {
        self.save_json(POINTS_KEY, points)
    }
}
