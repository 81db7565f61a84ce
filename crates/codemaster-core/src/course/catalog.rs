//! Read-only lookups over the full content tree.

use std::collections::BTreeSet;

use super::model::{Course, Lesson, Stage, SubLesson};

/// The immutable set of courses the engine progresses through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseCatalog {
    courses: Vec<Course>,
}

impl CourseCatalog {
    /// Wraps the given courses, linking every sub-lesson to its lesson.
    pub fn new(mut courses: Vec<Course>) -> Self {
        for course in &mut courses {
            course.link_sub_lessons();
        }
        Self { courses }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn find_course(&self, course_id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == course_id)
    }

    /// Linear search for a top-level lesson.
    ///
    /// Sub-lessons are never matched here: a sub-lesson id only resolves if
    /// it happens to equal some lesson id.
    pub fn find_lesson_by_id(&self, lesson_id: &str) -> Option<&Lesson> {
        self.courses
            .iter()
            .flat_map(Course::lessons)
            .find(|lesson| lesson.id == lesson_id)
    }

    pub fn find_sub_lesson_by_id(&self, sub_lesson_id: &str) -> Option<&SubLesson> {
        self.courses
            .iter()
            .flat_map(Course::lessons)
            .flat_map(|lesson| lesson.sub_lessons.iter())
            .find(|sub| sub.id == sub_lesson_id)
    }

    /// Returns the stage whose lesson sequence contains `lesson_id`.
    pub fn find_stage_containing(&self, lesson_id: &str) -> Option<&Stage> {
        self.courses
            .iter()
            .flat_map(|course| course.stages.iter())
            .find(|stage| stage.lesson_index(lesson_id).is_some())
    }

    pub fn find_stage(&self, stage_id: &str) -> Option<&Stage> {
        self.courses
            .iter()
            .flat_map(|course| course.stages.iter())
            .find(|stage| stage.id == stage_id)
    }

    /// Ids used by more than one lesson or sub-lesson.
    ///
    /// The completion map is keyed by bare id, so a collision makes two
    /// nodes share one status entry.
    pub fn duplicate_ids(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut duplicates = BTreeSet::new();
        for lesson in self.courses.iter().flat_map(Course::lessons) {
            let ids = std::iter::once(lesson.id.as_str())
                .chain(lesson.sub_lessons.iter().map(|s| s.id.as_str()));
            for id in ids {
                if !seen.insert(id) {
                    duplicates.insert(id.to_string());
                }
            }
        }
        duplicates.into_iter().collect()
    }
}

impl From<Vec<Course>> for CourseCatalog {
    fn from(courses: Vec<Course>) -> Self {
        Self::new(courses)
    }
}
