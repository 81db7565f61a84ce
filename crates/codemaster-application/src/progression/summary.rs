use codemaster_core::course::Stage;
use codemaster_core::progress::{CompletionStatusMap, LessonStatus, StageProgress, status_of};

/// Counts the stage's lessons whose status is `Completed`.
pub fn stage_progress(stage: &Stage, completion_status: &CompletionStatusMap) -> StageProgress {
    let completed_lessons = stage
        .lessons
        .iter()
        .filter(|lesson| status_of(completion_status, &lesson.id) == LessonStatus::Completed)
        .count();

    StageProgress {
        stage_id: stage.id.clone(),
        title: stage.title.clone(),
        total_lessons: stage.lessons.len(),
        completed_lessons,
    }
}
