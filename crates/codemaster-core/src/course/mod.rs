//! Course content domain module.
//!
//! # Module Structure
//!
//! - `model`: the `Course → Stage → Lesson → SubLesson` tree
//! - `content`: display payload attached to lessons
//! - `catalog`: read-only lookups over a set of courses
//! - `sample`: the built-in beginner C course

mod catalog;
mod content;
mod model;
pub mod sample;

pub use catalog::CourseCatalog;
pub use content::{ContentBlock, LessonContent, LessonContentType, QuizContentBlock};
pub use model::{Course, Lesson, Stage, SubLesson};
