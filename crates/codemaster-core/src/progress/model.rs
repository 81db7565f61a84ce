//! Learner progress domain models.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Unlock/completion state of a lesson or sub-lesson.
///
/// Progression only moves forward: `Locked → Active → Completed`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LessonStatus {
    /// Not yet available to the learner.
    #[default]
    Locked,
    /// Available but not finished.
    Active,
    Completed,
}

impl LessonStatus {
    /// True when moving from `self` to `next` would not demote the node.
    pub fn can_advance_to(self, next: LessonStatus) -> bool {
        next >= self
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LessonStatus::Locked => "LOCKED",
            LessonStatus::Active => "ACTIVE",
            LessonStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for LessonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Node id → status. Absent entries read as `Locked`.
pub type CompletionStatusMap = BTreeMap<String, LessonStatus>;

/// Node id → last awarded point amount. Settles at 0 after every award.
pub type PointsMap = BTreeMap<String, u32>;

/// Looks up a node's status, treating a missing entry as `Locked`.
pub fn status_of(map: &CompletionStatusMap, id: &str) -> LessonStatus {
    map.get(id).copied().unwrap_or_default()
}

/// Completed-lesson tally for one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageProgress {
    pub stage_id: String,
    pub title: String,
    pub total_lessons: usize,
    pub completed_lessons: usize,
}

impl StageProgress {
    pub fn is_complete(&self) -> bool {
        self.total_lessons > 0 && self.completed_lessons == self.total_lessons
    }
}
