use anyhow::{Context, Result};
use codemaster_application::ProgressionEngine;

use super::status_label;

pub fn run(
    engine: &mut ProgressionEngine,
    course_id: &str,
    stage_id: &str,
    lesson_id: &str,
) -> Result<()> {
    let course = engine
        .catalog()
        .find_course(course_id)
        .cloned()
        .with_context(|| format!("Unknown course '{}'", course_id))?;
    let stage = course
        .stages
        .iter()
        .find(|stage| stage.id == stage_id)
        .cloned()
        .with_context(|| format!("Stage '{}' is not part of {}", stage_id, course_id))?;
    let lesson_index = stage
        .lesson_index(lesson_id)
        .with_context(|| format!("Lesson '{}' is not part of {}", lesson_id, stage_id))?;
    let lesson = stage.lessons[lesson_index].clone();

    engine.select_language(course);
    engine.select_stage(stage);
    engine.select_lesson(lesson);
    engine.select_lesson_index(lesson_index);
    engine.update_lesson_completion_status();

    println!("{} {}", lesson_id, status_label(engine.status_of(lesson_id)));
    Ok(())
}
