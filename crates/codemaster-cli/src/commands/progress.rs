use anyhow::Result;
use codemaster_application::ProgressionEngine;
use colored::Colorize;

pub fn run(engine: &ProgressionEngine) -> Result<()> {
    for course in engine.courses() {
        println!("{}", course.language.bright_magenta().bold());

        for stage in engine.course_progress(&course.id).unwrap_or_default() {
            let tally = format!("{}/{}", stage.completed_lessons, stage.total_lessons);
            let tally = if stage.is_complete() {
                tally.green()
            } else {
                tally.normal()
            };
            println!("  {:<28} {}", stage.title, tally);
        }
    }
    Ok(())
}
