//! Lesson progression engine.
//!
//! Owns the learner's selection and the two progress maps, and applies the
//! unlock/completion rules to them. Every mutating operation writes the
//! affected map back through the [`ProgressRepository`] before returning.

use std::sync::Arc;

use codemaster_core::course::{Course, CourseCatalog, Lesson, Stage};
use codemaster_core::error::Result;
use codemaster_core::observable::Observable;
use codemaster_core::progress::{
    CompletionStatusMap, LessonStatus, PointsMap, ProgressRepository, StageProgress, status_of,
};

use super::summary;

/// State container for learner progress through a fixed course catalog.
///
/// # Lifecycle
///
/// construct (loads both maps) → mutate through the operations below →
/// each mutation flushes to the repository.
///
/// # Thread Safety
///
/// Mutations take `&mut self`, so there is exactly one writer. Readers
/// observe changes by subscribing to the exposed [`Observable`]s, which
/// deliver every intermediate value, including both halves of a points
/// pulse.
pub struct ProgressionEngine {
    catalog: Arc<CourseCatalog>,
    repository: Arc<dyn ProgressRepository>,
    selected_course: Observable<Option<Course>>,
    selected_stage: Observable<Option<Stage>>,
    selected_lesson: Observable<Option<Lesson>>,
    selected_sub_lesson_index: Observable<usize>,
    selected_lesson_index: Observable<usize>,
    lesson_completion_status: Observable<CompletionStatusMap>,
    points: Observable<PointsMap>,
}

impl ProgressionEngine {
    /// Creates the engine and restores both maps from `repository`.
    ///
    /// A missing or unreadable map starts out empty. Stored ids are kept
    /// as-is even when the catalog no longer contains them.
    pub fn new(
        catalog: impl Into<Arc<CourseCatalog>>,
        repository: Arc<dyn ProgressRepository>,
    ) -> Self {
        let completion_status =
            load_or_default("lesson_completion_status", repository.load_completion_status());
        let points = load_or_default("points", repository.load_points());

        tracing::debug!(
            "[ProgressionEngine] Restored {} status entries and {} point entries",
            completion_status.len(),
            points.len()
        );

        Self {
            catalog: catalog.into(),
            repository,
            selected_course: Observable::new(None),
            selected_stage: Observable::new(None),
            selected_lesson: Observable::new(None),
            selected_sub_lesson_index: Observable::new(0),
            selected_lesson_index: Observable::new(0),
            lesson_completion_status: Observable::new(completion_status),
            points: Observable::new(points),
        }
    }

    // ============================================================================
    // Observable state
    // ============================================================================

    pub fn catalog(&self) -> &CourseCatalog {
        &self.catalog
    }

    pub fn courses(&self) -> &[Course] {
        self.catalog.courses()
    }

    pub fn selected_course(&self) -> &Observable<Option<Course>> {
        &self.selected_course
    }

    pub fn selected_stage(&self) -> &Observable<Option<Stage>> {
        &self.selected_stage
    }

    pub fn selected_lesson(&self) -> &Observable<Option<Lesson>> {
        &self.selected_lesson
    }

    pub fn selected_sub_lesson_index(&self) -> &Observable<usize> {
        &self.selected_sub_lesson_index
    }

    pub fn selected_lesson_index(&self) -> &Observable<usize> {
        &self.selected_lesson_index
    }

    pub fn lesson_completion_status(&self) -> &Observable<CompletionStatusMap> {
        &self.lesson_completion_status
    }

    pub fn points(&self) -> &Observable<PointsMap> {
        &self.points
    }

    /// Status of a lesson or sub-lesson; unknown ids are `Locked`.
    pub fn status_of(&self, id: &str) -> LessonStatus {
        status_of(self.lesson_completion_status.get(), id)
    }

    // ============================================================================
    // Selection
    // ============================================================================

    pub fn select_language(&mut self, course: Course) {
        self.selected_course.set(Some(course));
    }

    pub fn select_stage(&mut self, stage: Stage) {
        self.selected_stage.set(Some(stage));
    }

    pub fn select_lesson(&mut self, lesson: Lesson) {
        self.selected_lesson.set(Some(lesson));
    }

    pub fn select_sub_lesson_index(&mut self, index: usize) {
        self.selected_sub_lesson_index.set(index);
    }

    pub fn select_lesson_index(&mut self, index: usize) {
        self.selected_lesson_index.set(index);
    }

    /// Resolves the selected stage inside the selected course by id.
    pub fn get_current_stage(&self) -> Option<&Stage> {
        let stage_id = &self.selected_stage.get().as_ref()?.id;
        self.selected_course
            .get()
            .as_ref()?
            .stages
            .iter()
            .find(|stage| &stage.id == stage_id)
    }

    /// Resolves the selected lesson inside the current stage by id.
    pub fn get_current_lesson(&self) -> Option<&Lesson> {
        let lesson_id = &self.selected_lesson.get().as_ref()?.id;
        self.get_current_stage()?
            .lessons
            .iter()
            .find(|lesson| &lesson.id == lesson_id)
    }

    /// Searches every course for a top-level lesson with this id.
    ///
    /// Sub-lesson ids do not resolve here, so point lookups for sub-lessons
    /// only succeed when the id collides with a lesson id.
    pub fn find_lesson_by_id(&self, lesson_id: &str) -> Option<&Lesson> {
        self.catalog.find_lesson_by_id(lesson_id)
    }

    // ============================================================================
    // Progression
    // ============================================================================

    /// Completes a sub-lesson and cascades to its lesson and successors.
    ///
    /// Within one call the sub-lesson may complete, the lesson may complete
    /// (awarding its points and unlocking the next lesson), and the next
    /// sub-lesson may unlock. The completion map is flushed once more at
    /// the end.
    pub fn mark_sub_lesson_as_completed(&mut self, sub_lesson_id: &str, lesson_id: &str) {
        if self.status_of(sub_lesson_id) != LessonStatus::Completed {
            self.set_status(sub_lesson_id, LessonStatus::Completed);
            tracing::info!("[ProgressionEngine] Sub-lesson completed: {}", sub_lesson_id);

            self.collect_points_for_sub_lesson(sub_lesson_id);
        }

        let catalog = Arc::clone(&self.catalog);
        match catalog.find_lesson_by_id(lesson_id) {
            Some(lesson) => {
                if self.all_sub_lessons_completed(lesson)
                    && self.status_of(&lesson.id) != LessonStatus::Completed
                {
                    self.set_status(&lesson.id, LessonStatus::Completed);
                    tracing::info!("[ProgressionEngine] Lesson completed: {}", lesson.id);

                    self.collect_points_for_lesson(&lesson.id);
                    self.unlock_next_lesson(lesson);
                }

                self.unlock_next_sub_lesson(lesson, sub_lesson_id);
            }
            None => {
                tracing::debug!(
                    "[ProgressionEngine] Lesson '{}' not in catalog, skipping cascade",
                    lesson_id
                );
            }
        }

        self.save_completion_status();
    }

    /// Re-checks the currently selected lesson and completes it if every
    /// sub-lesson is done. Does not unlock anything.
    pub fn update_lesson_completion_status(&mut self) {
        let Some(lesson) = self.get_current_lesson().cloned() else {
            return;
        };

        if self.all_sub_lessons_completed(&lesson)
            && self.status_of(&lesson.id) != LessonStatus::Completed
        {
            self.set_status(&lesson.id, LessonStatus::Completed);
            tracing::info!("[ProgressionEngine] Lesson updated to completed: {}", lesson.id);

            self.collect_points_for_lesson(&lesson.id);
            self.save_completion_status();
        }
    }

    /// Unlocks the lesson after `current_lesson` in its stage, together
    /// with that lesson's first sub-lesson.
    ///
    /// No-op for the last lesson of a stage. A successor that is already
    /// active or completed is left as it is.
    pub fn unlock_next_lesson(&mut self, current_lesson: &Lesson) {
        let catalog = Arc::clone(&self.catalog);
        let Some(stage) = catalog.find_stage_containing(&current_lesson.id) else {
            return;
        };
        let Some(next_lesson) = stage
            .lesson_index(&current_lesson.id)
            .and_then(|index| stage.lessons.get(index + 1))
        else {
            tracing::debug!(
                "[ProgressionEngine] {} is the last lesson of {}",
                current_lesson.id,
                stage.id
            );
            return;
        };

        if self.unlock(&next_lesson.id) {
            tracing::info!("[ProgressionEngine] Next lesson unlocked: {}", next_lesson.id);

            if let Some(first_sub_lesson) = next_lesson.first_sub_lesson() {
                if self.unlock(&first_sub_lesson.id) {
                    tracing::info!(
                        "[ProgressionEngine] First sub-lesson unlocked: {}",
                        first_sub_lesson.id
                    );
                }
            }
        }

        self.save_completion_status();
    }

    /// Unlocks the sub-lesson following `current_sub_lesson_id`, unless it
    /// is already active or completed.
    pub fn unlock_next_sub_lesson(&mut self, current_lesson: &Lesson, current_sub_lesson_id: &str) {
        let Some(next_sub_lesson) = current_lesson
            .sub_lesson_index(current_sub_lesson_id)
            .and_then(|index| current_lesson.sub_lessons.get(index + 1))
        else {
            return;
        };

        if self.unlock(&next_sub_lesson.id) {
            tracing::info!(
                "[ProgressionEngine] Next sub-lesson unlocked: {}",
                next_sub_lesson.id
            );
        } else {
            tracing::debug!(
                "[ProgressionEngine] Next sub-lesson skipped: {} already {}",
                next_sub_lesson.id,
                self.status_of(&next_sub_lesson.id)
            );
        }

        self.save_completion_status();
    }

    // ============================================================================
    // Points
    // ============================================================================

    pub fn collect_points_for_sub_lesson(&mut self, sub_lesson_id: &str) {
        self.collect_points(sub_lesson_id);
    }

    pub fn collect_points_for_lesson(&mut self, lesson_id: &str) {
        self.collect_points(lesson_id);
    }

    /// Publishes the node's point value and immediately resets it to 0.
    ///
    /// Subscribers see `N` then `0`; the stored map always ends at 0.
    fn collect_points(&mut self, id: &str) {
        let awarded = self
            .catalog
            .find_lesson_by_id(id)
            .map(|lesson| lesson.points)
            .unwrap_or(0);

        if awarded > 0 {
            self.points.update(|points| {
                points.insert(id.to_string(), awarded);
            });
            tracing::info!("[ProgressionEngine] Awarded {} points for {}", awarded, id);

            self.points.update(|points| {
                points.insert(id.to_string(), 0);
            });
        }

        self.save_points();
    }

    // ============================================================================
    // Seeding and summaries
    // ============================================================================

    /// Copies each node's non-locked default status into the completion
    /// map where the map has no entry yet. Returns the number of entries added.
    pub fn seed_default_statuses(&mut self) -> usize {
        let catalog = Arc::clone(&self.catalog);
        let defaults = catalog
            .courses()
            .iter()
            .flat_map(Course::lessons)
            .flat_map(|lesson| {
                std::iter::once((lesson.id.as_str(), lesson.status)).chain(
                    lesson
                        .sub_lessons
                        .iter()
                        .map(|sub| (sub.id.as_str(), sub.status)),
                )
            })
            .filter(|(_, status)| *status != LessonStatus::Locked);

        let mut seeded = 0;
        for (id, status) in defaults {
            if !self.lesson_completion_status.get().contains_key(id) {
                self.set_status(id, status);
                seeded += 1;
            }
        }

        if seeded > 0 {
            tracing::info!("[ProgressionEngine] Seeded {} default statuses", seeded);
            self.save_completion_status();
        }
        seeded
    }

    pub fn stage_progress(&self, stage_id: &str) -> Option<StageProgress> {
        self.catalog
            .find_stage(stage_id)
            .map(|stage| summary::stage_progress(stage, self.lesson_completion_status.get()))
    }

    /// Per-stage tallies for one course, in stage order.
    pub fn course_progress(&self, course_id: &str) -> Option<Vec<StageProgress>> {
        let course = self.catalog.find_course(course_id)?;
        Some(
            course
                .stages
                .iter()
                .map(|stage| summary::stage_progress(stage, self.lesson_completion_status.get()))
                .collect(),
        )
    }

    // ============================================================================
    // Internals
    // ============================================================================

    fn all_sub_lessons_completed(&self, lesson: &Lesson) -> bool {
        lesson
            .sub_lessons
            .iter()
            .all(|sub| self.status_of(&sub.id) == LessonStatus::Completed)
    }

    /// Promotes an absent or locked node to active. Returns whether it changed.
    fn unlock(&mut self, id: &str) -> bool {
        if self.status_of(id) == LessonStatus::Locked {
            self.set_status(id, LessonStatus::Active);
            true
        } else {
            false
        }
    }

    fn set_status(&mut self, id: &str, status: LessonStatus) {
        tracing::debug!("[ProgressionEngine] {} -> {}", id, status);
        self.lesson_completion_status.update(|map| {
            map.insert(id.to_string(), status);
        });
    }

    fn save_completion_status(&self) {
        if let Err(e) = self
            .repository
            .save_completion_status(self.lesson_completion_status.get())
        {
            tracing::warn!("[ProgressionEngine] Failed to save completion status: {}", e);
        }
    }

    fn save_points(&self) {
        if let Err(e) = self.repository.save_points(self.points.get()) {
            tracing::warn!("[ProgressionEngine] Failed to save points: {}", e);
        }
    }
}

fn load_or_default<T: Default>(what: &str, loaded: Result<Option<T>>) -> T {
    match loaded {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!("[ProgressionEngine] Discarding unreadable {}: {}", what, e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codemaster_core::course::SubLesson;
    use codemaster_core::error::CodemasterError;
    use codemaster_infrastructure::{
        COMPLETION_STATUS_KEY, InMemoryKeyValueStore, KeyValueProgressRepository, POINTS_KEY,
    };

    fn course() -> Course {
        Course::new("course_c", "C")
            .with_stage(
                Stage::new("beginner_stage", "Beginner")
                    .with_lesson(
                        Lesson::new("L1", "One")
                            .with_points(20)
                            .with_status(LessonStatus::Active)
                            .with_sub_lesson(
                                SubLesson::new("A", "a").with_status(LessonStatus::Active),
                            )
                            .with_sub_lesson(SubLesson::new("B", "b")),
                    )
                    .with_lesson(
                        Lesson::new("L2", "Two")
                            .with_sub_lesson(SubLesson::new("C", "c"))
                            .with_sub_lesson(SubLesson::new("D", "d")),
                    ),
            )
            .with_stage(
                Stage::new("intermediate_stage", "Intermediate")
                    .with_lesson(Lesson::new("L3", "Three").with_points(30)),
            )
    }

    fn engine_with(store: Arc<InMemoryKeyValueStore>) -> ProgressionEngine {
        ProgressionEngine::new(
            CourseCatalog::new(vec![course()]),
            Arc::new(KeyValueProgressRepository::new(store)),
        )
    }

    fn engine() -> (ProgressionEngine, Arc<InMemoryKeyValueStore>) {
        let store = Arc::new(InMemoryKeyValueStore::new());
        (engine_with(store.clone()), store)
    }

    fn stored(store: &InMemoryKeyValueStore, key: &str) -> Option<String> {
        use codemaster_infrastructure::KeyValueStore;
        store.get_string(key).unwrap()
    }

    struct FailingRepository;

    impl ProgressRepository for FailingRepository {
        fn load_completion_status(&self) -> Result<Option<CompletionStatusMap>> {
            Err(CodemasterError::io("disk gone"))
        }
        fn save_completion_status(&self, _: &CompletionStatusMap) -> Result<()> {
            Err(CodemasterError::io("disk gone"))
        }
        fn load_points(&self) -> Result<Option<PointsMap>> {
            Err(CodemasterError::io("disk gone"))
        }
        fn save_points(&self, _: &PointsMap) -> Result<()> {
            Err(CodemasterError::io("disk gone"))
        }
    }

    #[test]
    fn test_new_engine_starts_empty() {
        let (engine, _) = engine();
        assert!(engine.lesson_completion_status().get().is_empty());
        assert!(engine.points().get().is_empty());
        assert!(engine.selected_course().get().is_none());
        assert_eq!(*engine.selected_sub_lesson_index().get(), 0);
        assert_eq!(*engine.selected_lesson_index().get(), 0);
    }

    #[test]
    fn test_restores_maps_and_keeps_stale_ids() {
        let store = Arc::new(InMemoryKeyValueStore::with_entries([
            (COMPLETION_STATUS_KEY, r#"{"A":"COMPLETED","gone_lesson":"ACTIVE"}"#),
            (POINTS_KEY, r#"{"L1":0}"#),
        ]));
        let engine = engine_with(store);

        assert_eq!(engine.status_of("A"), LessonStatus::Completed);
        assert_eq!(engine.status_of("gone_lesson"), LessonStatus::Active);
        assert_eq!(engine.points().get().get("L1"), Some(&0));
    }

    #[test]
    fn test_malformed_blobs_degrade_to_empty_maps() {
        let store = Arc::new(InMemoryKeyValueStore::with_entries([
            (COMPLETION_STATUS_KEY, "{{{"),
            (POINTS_KEY, r#"{"L1":"lots"}"#),
        ]));
        let engine = engine_with(store);

        assert!(engine.lesson_completion_status().get().is_empty());
        assert!(engine.points().get().is_empty());
    }

    #[test]
    fn test_repository_failures_never_panic() {
        let mut engine = ProgressionEngine::new(
            CourseCatalog::new(vec![course()]),
            Arc::new(FailingRepository),
        );

        engine.mark_sub_lesson_as_completed("A", "L1");
        engine.mark_sub_lesson_as_completed("B", "L1");

        assert_eq!(engine.status_of("L1"), LessonStatus::Completed);
        assert_eq!(engine.status_of("L2"), LessonStatus::Active);
    }

    #[test]
    fn test_current_stage_and_lesson_require_selection() {
        let (mut engine, _) = engine();
        assert!(engine.get_current_stage().is_none());
        assert!(engine.get_current_lesson().is_none());

        let course = course();
        engine.select_stage(course.stages[0].clone());
        assert!(engine.get_current_stage().is_none(), "no course selected yet");

        engine.select_language(course.clone());
        engine.select_lesson(course.stages[0].lessons[1].clone());
        assert_eq!(engine.get_current_stage().unwrap().id, "beginner_stage");
        assert_eq!(engine.get_current_lesson().unwrap().id, "L2");
    }

    #[test]
    fn test_current_stage_is_rederived_from_selected_course() {
        let (mut engine, _) = engine();
        let course = course();
        engine.select_language(course.clone());
        // A stale copy: same id, different contents.
        engine.select_stage(Stage::new("beginner_stage", "Outdated title"));

        let stage = engine.get_current_stage().unwrap();
        assert_eq!(stage.title, "Beginner");
        assert_eq!(stage.lessons.len(), 2);

        engine.select_stage(Stage::new("no_such_stage", "?"));
        assert!(engine.get_current_stage().is_none());
    }

    #[test]
    fn test_selection_setters_publish() {
        let (mut engine, _) = engine();
        let mut indexes = engine.selected_sub_lesson_index().subscribe();
        engine.select_sub_lesson_index(2);
        engine.select_sub_lesson_index(3);
        engine.select_lesson_index(1);

        assert_eq!(indexes.drain(), vec![0, 2, 3]);
        assert_eq!(*engine.selected_lesson_index().get(), 1);
    }

    #[test]
    fn test_find_lesson_by_id_ignores_sub_lessons() {
        let (engine, _) = engine();
        assert_eq!(engine.find_lesson_by_id("L3").unwrap().points, 30);
        assert!(engine.find_lesson_by_id("A").is_none());
    }

    #[test]
    fn test_points_pulse_is_observable_and_settles_at_zero() {
        let (mut engine, store) = engine();
        let mut pulses = engine.points().subscribe();

        engine.collect_points_for_lesson("L1");

        let observed: Vec<Option<u32>> = pulses
            .drain()
            .iter()
            .map(|points| points.get("L1").copied())
            .collect();
        assert_eq!(observed, vec![None, Some(20), Some(0)]);
        assert_eq!(stored(&store, POINTS_KEY).as_deref(), Some(r#"{"L1":0}"#));
    }

    #[test]
    fn test_no_pulse_for_zero_or_unknown_points() {
        let (mut engine, store) = engine();
        let mut pulses = engine.points().subscribe();

        engine.collect_points_for_lesson("L2");
        engine.collect_points_for_lesson("nope");

        assert_eq!(pulses.drain().len(), 1, "only the initial value");
        assert_eq!(stored(&store, POINTS_KEY).as_deref(), Some("{}"));
    }

    #[test]
    fn test_sub_lesson_points_only_resolve_on_lesson_id_collision() {
        let (mut engine, _) = engine();
        let mut pulses = engine.points().subscribe();

        engine.collect_points_for_sub_lesson("A");
        assert_eq!(pulses.drain().len(), 1, "sub-lesson ids are not searched");

        // An id that also names a lesson picks up that lesson's points.
        engine.collect_points_for_sub_lesson("L3");
        let last = pulses.drain();
        assert_eq!(last.len(), 2);
        assert_eq!(last[0].get("L3"), Some(&30));
        assert_eq!(last[1].get("L3"), Some(&0));
    }

    #[test]
    fn test_unlock_next_sub_lesson_never_demotes() {
        let store = Arc::new(InMemoryKeyValueStore::with_entries([(
            COMPLETION_STATUS_KEY,
            r#"{"B":"COMPLETED","D":"ACTIVE"}"#,
        )]));
        let mut engine = engine_with(store);
        let course = course();
        let l1 = &course.stages[0].lessons[0];
        let l2 = &course.stages[0].lessons[1];

        engine.unlock_next_sub_lesson(l1, "A");
        engine.unlock_next_sub_lesson(l2, "C");

        assert_eq!(engine.status_of("B"), LessonStatus::Completed);
        assert_eq!(engine.status_of("D"), LessonStatus::Active);
    }

    #[test]
    fn test_unlock_next_sub_lesson_promotes_locked_entry() {
        let store = Arc::new(InMemoryKeyValueStore::with_entries([(
            COMPLETION_STATUS_KEY,
            r#"{"B":"LOCKED"}"#,
        )]));
        let mut engine = engine_with(store.clone());

        engine.unlock_next_sub_lesson(&course().stages[0].lessons[0], "A");

        assert_eq!(engine.status_of("B"), LessonStatus::Active);
        assert_eq!(
            stored(&store, COMPLETION_STATUS_KEY).as_deref(),
            Some(r#"{"B":"ACTIVE"}"#)
        );
    }

    #[test]
    fn test_unlock_next_sub_lesson_last_or_unknown_is_noop() {
        let (mut engine, store) = engine();
        let l1 = course().stages[0].lessons[0].clone();

        engine.unlock_next_sub_lesson(&l1, "B");
        engine.unlock_next_sub_lesson(&l1, "Z");

        assert!(engine.lesson_completion_status().get().is_empty());
        assert_eq!(stored(&store, COMPLETION_STATUS_KEY), None);
    }

    #[test]
    fn test_unlock_next_lesson_unlocks_successor_and_first_sub_lesson() {
        let (mut engine, store) = engine();

        engine.unlock_next_lesson(&course().stages[0].lessons[0]);

        assert_eq!(engine.status_of("L2"), LessonStatus::Active);
        assert_eq!(engine.status_of("C"), LessonStatus::Active);
        assert_eq!(engine.status_of("D"), LessonStatus::Locked);
        assert_eq!(
            stored(&store, COMPLETION_STATUS_KEY).as_deref(),
            Some(r#"{"C":"ACTIVE","L2":"ACTIVE"}"#)
        );
    }

    #[test]
    fn test_unlock_next_lesson_on_last_lesson_is_noop() {
        let (mut engine, store) = engine();
        let course = course();

        engine.unlock_next_lesson(&course.stages[0].lessons[1]);
        engine.unlock_next_lesson(&course.stages[1].lessons[0]);

        assert!(engine.lesson_completion_status().get().is_empty());
        assert_eq!(stored(&store, COMPLETION_STATUS_KEY), None);
    }

    #[test]
    fn test_unlock_next_lesson_keeps_completed_successor() {
        let store = Arc::new(InMemoryKeyValueStore::with_entries([(
            COMPLETION_STATUS_KEY,
            r#"{"L2":"COMPLETED","C":"COMPLETED"}"#,
        )]));
        let mut engine = engine_with(store);

        engine.unlock_next_lesson(&course().stages[0].lessons[0]);

        assert_eq!(engine.status_of("L2"), LessonStatus::Completed);
        assert_eq!(engine.status_of("C"), LessonStatus::Completed);
    }

    #[test]
    fn test_unknown_lesson_only_completes_the_sub_lesson() {
        let (mut engine, store) = engine();

        engine.mark_sub_lesson_as_completed("X", "no_such_lesson");

        assert_eq!(engine.lesson_completion_status().get().len(), 1);
        assert_eq!(engine.status_of("X"), LessonStatus::Completed);
        assert_eq!(
            stored(&store, COMPLETION_STATUS_KEY).as_deref(),
            Some(r#"{"X":"COMPLETED"}"#)
        );
    }

    #[test]
    fn test_lesson_without_sub_lessons_completes_on_first_mark() {
        let (mut engine, _) = engine();
        let mut pulses = engine.points().subscribe();

        engine.mark_sub_lesson_as_completed("anything", "L3");

        assert_eq!(engine.status_of("L3"), LessonStatus::Completed);
        let values = pulses.drain();
        assert!(values.iter().any(|p| p.get("L3") == Some(&30)));
    }

    #[test]
    fn test_update_lesson_completion_status_requires_selection() {
        let store = Arc::new(InMemoryKeyValueStore::with_entries([(
            COMPLETION_STATUS_KEY,
            r#"{"A":"COMPLETED","B":"COMPLETED"}"#,
        )]));
        let mut engine = engine_with(store);

        engine.update_lesson_completion_status();
        assert_eq!(engine.status_of("L1"), LessonStatus::Locked);

        let course = course();
        engine.select_language(course.clone());
        engine.select_stage(course.stages[0].clone());
        engine.select_lesson(course.stages[0].lessons[0].clone());
        engine.update_lesson_completion_status();

        assert_eq!(engine.status_of("L1"), LessonStatus::Completed);
        // No unlock cascade from the re-check.
        assert_eq!(engine.status_of("L2"), LessonStatus::Locked);
        assert_eq!(engine.points().get().get("L1"), Some(&0));
    }

    #[test]
    fn test_update_lesson_completion_status_waits_for_all_sub_lessons() {
        let store = Arc::new(InMemoryKeyValueStore::with_entries([(
            COMPLETION_STATUS_KEY,
            r#"{"A":"COMPLETED","B":"ACTIVE"}"#,
        )]));
        let mut engine = engine_with(store);
        let course = course();
        engine.select_language(course.clone());
        engine.select_stage(course.stages[0].clone());
        engine.select_lesson(course.stages[0].lessons[0].clone());

        engine.update_lesson_completion_status();

        assert_eq!(engine.status_of("L1"), LessonStatus::Locked);
    }

    #[test]
    fn test_seed_default_statuses_only_fills_gaps() {
        let store = Arc::new(InMemoryKeyValueStore::with_entries([(
            COMPLETION_STATUS_KEY,
            r#"{"A":"COMPLETED"}"#,
        )]));
        let mut engine = engine_with(store.clone());

        assert_eq!(engine.seed_default_statuses(), 1);
        assert_eq!(engine.status_of("L1"), LessonStatus::Active);
        assert_eq!(engine.status_of("A"), LessonStatus::Completed);
        assert_eq!(engine.status_of("B"), LessonStatus::Locked);
        assert_eq!(
            stored(&store, COMPLETION_STATUS_KEY).as_deref(),
            Some(r#"{"A":"COMPLETED","L1":"ACTIVE"}"#)
        );

        assert_eq!(engine.seed_default_statuses(), 0);
    }

    #[test]
    fn test_stage_and_course_progress() {
        let store = Arc::new(InMemoryKeyValueStore::with_entries([(
            COMPLETION_STATUS_KEY,
            r#"{"L1":"COMPLETED","L2":"ACTIVE"}"#,
        )]));
        let engine = engine_with(store);

        let beginner = engine.stage_progress("beginner_stage").unwrap();
        assert_eq!(beginner.total_lessons, 2);
        assert_eq!(beginner.completed_lessons, 1);
        assert!(engine.stage_progress("missing").is_none());

        let course = engine.course_progress("course_c").unwrap();
        assert_eq!(course.len(), 2);
        assert_eq!(course[1].completed_lessons, 0);
        assert!(engine.course_progress("missing").is_none());
    }
}
