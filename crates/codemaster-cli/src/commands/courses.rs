use anyhow::Result;
use codemaster_application::ProgressionEngine;
use colored::Colorize;

use super::status_label;

pub fn run(engine: &ProgressionEngine) -> Result<()> {
    if engine.catalog().is_empty() {
        println!("No courses in the catalog.");
        return Ok(());
    }

    for course in engine.courses() {
        println!(
            "{}",
            format!("{} ({})", course.language, course.id)
                .bright_magenta()
                .bold()
        );
        for stage in &course.stages {
            println!("  {} {}", stage.title.bold(), format!("[{}]", stage.id).dimmed());
            for lesson in &stage.lessons {
                println!(
                    "    {} {} {}",
                    status_label(engine.status_of(&lesson.id)),
                    lesson.id,
                    lesson.title.dimmed()
                );
                for sub_lesson in &lesson.sub_lessons {
                    println!(
                        "      {} {} {}",
                        status_label(engine.status_of(&sub_lesson.id)),
                        sub_lesson.id,
                        sub_lesson.title.dimmed()
                    );
                }
            }
        }
    }

    Ok(())
}
