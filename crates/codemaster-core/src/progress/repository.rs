//! Progress repository trait.

use crate::error::Result;
use crate::progress::model::{CompletionStatusMap, PointsMap};

/// Durable storage for the two progress maps.
///
/// `Ok(None)` means nothing has been saved yet. A malformed blob is an
/// `Err`; callers decide whether to degrade it to an empty map.
pub trait ProgressRepository: Send + Sync {
    fn load_completion_status(&self) -> Result<Option<CompletionStatusMap>>;

    /// Replaces the stored completion map as a whole.
    fn save_completion_status(&self, status: &CompletionStatusMap) -> Result<()>;

    fn load_points(&self) -> Result<Option<PointsMap>>;

    /// Replaces the stored points map as a whole.
    fn save_points(&self, points: &PointsMap) -> Result<()>;
}
