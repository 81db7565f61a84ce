//! Lesson display payload.

use serde::{Deserialize, Serialize};

/// Whether a content page is read-only or asks the learner something.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LessonContentType {
    #[default]
    NonInteractive,
    Quiz,
}

/// One page of lesson content, usually mirroring a sub-lesson id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonContent {
    pub id: String,
    pub title: String,
    #[serde(default, rename = "block")]
    pub content_blocks: Vec<ContentBlock>,
    #[serde(default, rename = "type")]
    pub content_type: LessonContentType,
}

/// A single renderable block inside a content page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
    Code { code: String },
    /// Name of a bundled image resource.
    Image { resource: String },
    Quiz(QuizContentBlock),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizContentBlock {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl QuizContentBlock {
    /// Compares an answer against the expected one, ignoring surrounding whitespace.
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer.trim() == answer.trim()
    }
}

impl LessonContent {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content_blocks: Vec::new(),
            content_type: LessonContentType::NonInteractive,
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content_blocks.push(ContentBlock::Text { text: text.into() });
        self
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.content_blocks.push(ContentBlock::Code { code: code.into() });
        self
    }

    /// Appends a quiz block and marks the page as interactive.
    pub fn quiz(mut self, quiz: QuizContentBlock) -> Self {
        self.content_blocks.push(ContentBlock::Quiz(quiz));
        self.content_type = LessonContentType::Quiz;
        self
    }

    pub fn quizzes(&self) -> impl Iterator<Item = &QuizContentBlock> {
        self.content_blocks.iter().filter_map(|block| match block {
            ContentBlock::Quiz(quiz) => Some(quiz),
            _ => None,
        })
    }
}
