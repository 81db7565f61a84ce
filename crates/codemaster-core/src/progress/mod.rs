//! Learner progress domain module.
//!
//! - `model`: `LessonStatus`, the completion and points maps, stage tallies
//! - `repository`: persistence trait for the two maps

mod model;
pub mod repository;

pub use model::{CompletionStatusMap, LessonStatus, PointsMap, StageProgress, status_of};
pub use repository::ProgressRepository;
