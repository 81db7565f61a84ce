use anyhow::Result;
use codemaster_application::ProgressionEngine;
use codemaster_core::progress::{CompletionStatusMap, LessonStatus, PointsMap, status_of};
use colored::Colorize;

use super::status_label;

pub fn run(engine: &mut ProgressionEngine, sub_lesson_id: &str, lesson_id: &str) -> Result<()> {
    if engine.find_lesson_by_id(lesson_id).is_none() {
        println!(
            "{}",
            format!(
                "⚠️  Unknown lesson '{}': only '{}' will be marked",
                lesson_id, sub_lesson_id
            )
            .yellow()
        );
    }

    let mut points = engine.points().subscribe();
    let before = engine.lesson_completion_status().get().clone();

    engine.mark_sub_lesson_as_completed(sub_lesson_id, lesson_id);

    for (id, from, to) in status_changes(&before, engine.lesson_completion_status().get()) {
        println!("{} {} -> {}", id, status_label(from), status_label(to));
    }
    for (id, amount) in awarded_points(&points.drain()) {
        println!("{}", format!("🎉 +{} points for {}", amount, id).green().bold());
    }

    Ok(())
}

/// Every non-zero entry in the published snapshots, in publish order.
fn awarded_points(snapshots: &[PointsMap]) -> Vec<(String, u32)> {
    snapshots
        .iter()
        .flat_map(|snapshot| {
            snapshot
                .iter()
                .filter(|(_, amount)| **amount > 0)
                .map(|(id, amount)| (id.clone(), *amount))
        })
        .collect()
}

fn status_changes(
    before: &CompletionStatusMap,
    after: &CompletionStatusMap,
) -> Vec<(String, LessonStatus, LessonStatus)> {
    after
        .iter()
        .filter_map(|(id, to)| {
            let from = status_of(before, id);
            (from != *to).then(|| (id.clone(), from, *to))
        })
        .collect()
}
