//! Course tree domain models.
//!
//! The tree is `Course → Stage → Lesson → SubLesson`. It is built once at
//! startup (from the built-in sample or a catalog file) and never mutated
//! afterwards; learner progress lives in the completion map instead.

use serde::{Deserialize, Serialize};

use super::content::LessonContent;
use crate::progress::LessonStatus;

/// A programming course, e.g. "C for beginners".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    /// Programming language label shown to the learner.
    pub language: String,
    #[serde(default, rename = "stage")]
    pub stages: Vec<Stage>,
}

/// A difficulty tier grouping lessons (Beginner, Intermediate, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub id: String,
    pub title: String,
    #[serde(default, rename = "lesson")]
    pub lessons: Vec<Lesson>,
}

/// A content unit with ordered sub-lessons and a point reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "sub_lesson")]
    pub sub_lessons: Vec<SubLesson>,
    /// Display payload. Irrelevant to progression.
    #[serde(default, rename = "content")]
    pub lesson_contents: Vec<LessonContent>,
    #[serde(default)]
    pub points: u32,
    /// Initial seed only; the completion map is authoritative.
    #[serde(default)]
    pub status: LessonStatus,
}

/// The smallest trackable unit of completion.
///
/// Sub-lessons are flat records that point back at their owning lesson
/// through `lesson_id` and know their ordinal `position` inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubLesson {
    pub id: String,
    #[serde(default)]
    pub lesson_id: String,
    #[serde(default)]
    pub position: usize,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: LessonStatus,
}

impl Course {
    pub fn new(id: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            language: language.into(),
            stages: Vec::new(),
        }
    }

    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    /// Fills in `lesson_id` and `position` on every sub-lesson.
    ///
    /// Catalog files nest sub-lessons under their lesson and omit both
    /// fields, so loaders call this once after deserializing.
    pub fn link_sub_lessons(&mut self) {
        for lesson in self.stages.iter_mut().flat_map(|s| s.lessons.iter_mut()) {
            lesson.link_sub_lessons();
        }
    }

    /// Iterates over every lesson of every stage, in order.
    pub fn lessons(&self) -> impl Iterator<Item = &Lesson> {
        self.stages.iter().flat_map(|stage| stage.lessons.iter())
    }
}

impl Stage {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            lessons: Vec::new(),
        }
    }

    pub fn with_lesson(mut self, lesson: Lesson) -> Self {
        self.lessons.push(lesson);
        self
    }

    /// Returns the index of the lesson with the given id.
    pub fn lesson_index(&self, lesson_id: &str) -> Option<usize> {
        self.lessons.iter().position(|l| l.id == lesson_id)
    }
}

impl Lesson {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            sub_lessons: Vec::new(),
            lesson_contents: Vec::new(),
            points: 0,
            status: LessonStatus::Locked,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_points(mut self, points: u32) -> Self {
        self.points = points;
        self
    }

    pub fn with_status(mut self, status: LessonStatus) -> Self {
        self.status = status;
        self
    }

    /// Appends a sub-lesson, taking ownership of its back-reference.
    pub fn with_sub_lesson(mut self, mut sub_lesson: SubLesson) -> Self {
        sub_lesson.lesson_id = self.id.clone();
        sub_lesson.position = self.sub_lessons.len();
        self.sub_lessons.push(sub_lesson);
        self
    }

    pub fn with_content(mut self, content: LessonContent) -> Self {
        self.lesson_contents.push(content);
        self
    }

    pub fn link_sub_lessons(&mut self) {
        for (position, sub_lesson) in self.sub_lessons.iter_mut().enumerate() {
            sub_lesson.lesson_id = self.id.clone();
            sub_lesson.position = position;
        }
    }

    /// Returns the index of the sub-lesson with the given id.
    pub fn sub_lesson_index(&self, sub_lesson_id: &str) -> Option<usize> {
        self.sub_lessons.iter().position(|s| s.id == sub_lesson_id)
    }

    pub fn first_sub_lesson(&self) -> Option<&SubLesson> {
        self.sub_lessons.first()
    }
}

impl SubLesson {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            lesson_id: String::new(),
            position: 0,
            title: title.into(),
            description: String::new(),
            status: LessonStatus::Locked,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_status(mut self, status: LessonStatus) -> Self {
        self.status = status;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_sub_lesson_assigns_owner_and_position() {
        let lesson = Lesson::new("L1", "Intro")
            .with_sub_lesson(SubLesson::new("A", "First"))
            .with_sub_lesson(SubLesson::new("B", "Second"));

        assert_eq!(lesson.sub_lessons[0].lesson_id, "L1");
        assert_eq!(lesson.sub_lessons[0].position, 0);
        assert_eq!(lesson.sub_lessons[1].lesson_id, "L1");
        assert_eq!(lesson.sub_lessons[1].position, 1);
        assert_eq!(lesson.sub_lesson_index("B"), Some(1));
        assert_eq!(lesson.sub_lesson_index("Z"), None);
    }

    #[test]
    fn test_link_sub_lessons_after_deserialize() {
        let json = r#"{
            "id": "course_c",
            "language": "C",
            "stage": [{
                "id": "beginner_stage",
                "title": "Beginner",
                "lesson": [{
                    "id": "L1",
                    "title": "Intro",
                    "points": 20,
                    "sub_lesson": [
                        { "id": "A", "title": "First", "status": "ACTIVE" },
                        { "id": "B", "title": "Second" }
                    ]
                }]
            }]
        }"#;
        let mut course: Course = serde_json::from_str(json).unwrap();
        assert!(course.stages[0].lessons[0].sub_lessons[1].lesson_id.is_empty());

        course.link_sub_lessons();

        let lesson = &course.stages[0].lessons[0];
        assert_eq!(lesson.points, 20);
        assert_eq!(lesson.status, LessonStatus::Locked);
        assert_eq!(lesson.sub_lessons[0].status, LessonStatus::Active);
        assert_eq!(lesson.sub_lessons[1].lesson_id, "L1");
        assert_eq!(lesson.sub_lessons[1].position, 1);
    }

    #[test]
    fn test_stage_lesson_index() {
        let stage = Stage::new("s", "Stage")
            .with_lesson(Lesson::new("L1", "One"))
            .with_lesson(Lesson::new("L2", "Two"));
        assert_eq!(stage.lesson_index("L2"), Some(1));
        assert_eq!(stage.lesson_index("L3"), None);
    }
}
