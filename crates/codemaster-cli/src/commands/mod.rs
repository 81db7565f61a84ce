pub mod complete;
pub mod courses;
pub mod progress;
pub mod recheck;

use codemaster_core::progress::LessonStatus;
use colored::{ColoredString, Colorize};

/// Fixed-width, colored status tag for terminal listings.
pub fn status_label(status: LessonStatus) -> ColoredString {
    let label = format!("{:<9}", status.as_str());
    match status {
        LessonStatus::Locked => label.dimmed(),
        LessonStatus::Active => label.yellow(),
        LessonStatus::Completed => label.green(),
    }
}
