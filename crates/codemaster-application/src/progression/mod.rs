//! Lesson progression.
//!
//! - `engine`: selection state, unlock/completion rules, points pulses
//! - `summary`: per-stage completion tallies

mod engine;
pub mod summary;

pub use engine::ProgressionEngine;
