//! Chapter and quiz mapping
//!
//! Maps a playback position onto the lesson's chapters and quizzes.
//! Chapters never overlap, so at most one is active; a position in a gap
//! has no active chapter. Where two chapters share a boundary the earlier
//! one wins.

use std::collections::HashSet;

use super::ProgressData;
use crate::course::{Chapter, Lesson, Quiz};

/// Half-width of the window around a quiz's trigger time, in seconds
pub const QUIZ_WINDOW_SECONDS: f64 = 1.0;

/// The chapter containing `t`, if any
pub fn active_chapter(t: f64, chapters: &[Chapter]) -> Option<&Chapter> {
    chapters.iter().find(|c| c.contains(t))
}

/// Progress through `chapter` at time `t`, clamped to `[0, 100]`
pub fn chapter_progress(t: f64, chapter: &Chapter) -> f64 {
    if t < chapter.start_time {
        return 0.0;
    }
    if t >= chapter.end_time || chapter.length() <= 0.0 {
        return 100.0;
    }
    ((t - chapter.start_time) / chapter.length() * 100.0).clamp(0.0, 100.0)
}

/// Whether `t` falls inside the quiz's trigger window
pub fn in_quiz_window(t: f64, quiz: &Quiz) -> bool {
    (t - quiz.trigger_time).abs() < QUIZ_WINDOW_SECONDS
}

/// Outcome of mapping one position
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapperUpdate {
    /// Chapter containing the position
    pub active_chapter: Option<String>,
    /// Chapter appended to the visited list by this update
    pub newly_visited: Option<String>,
    /// Quiz that became due with this update
    pub triggered_quiz: Option<String>,
}

/// Tracks visited chapters and fired quizzes for one viewing session
#[derive(Debug, Clone, Default)]
pub struct ChapterQuizMapper {
    fired_quizzes: HashSet<String>,
}

impl ChapterQuizMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map position `t`, appending to `progress.completed_chapters` as needed.
    ///
    /// A quiz fires at most once per session, however many updates land
    /// inside its window. While `accept_quiz` is false no quiz fires, and
    /// one whose window is passed over stays eligible for a later update.
    pub fn update(
        &mut self,
        t: f64,
        lesson: &Lesson,
        progress: &mut ProgressData,
        accept_quiz: bool,
    ) -> MapperUpdate {
        let mut update = MapperUpdate::default();

        if let Some(chapter) = active_chapter(t, &lesson.chapters) {
            update.active_chapter = Some(chapter.id.clone());
            if progress.add_chapter(&chapter.id) {
                tracing::debug!("Entered chapter {} ({})", chapter.id, chapter.title);
                update.newly_visited = Some(chapter.id.clone());
            }
        }

        if !accept_quiz {
            return update;
        }

        let due = lesson.quizzes.iter().find(|quiz| {
            in_quiz_window(t, quiz)
                && !progress.has_score(&quiz.id)
                && !self.fired_quizzes.contains(&quiz.id)
        });
        if let Some(quiz) = due {
            tracing::debug!("Quiz triggered: {}", quiz.id);
            self.fired_quizzes.insert(quiz.id.clone());
            update.triggered_quiz = Some(quiz.id.clone());
        }

        update
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::course::Course;

    fn lesson_with_quiz(trigger_time: f64) -> Lesson {
        let mut lesson = Course::builtin().lesson(1).unwrap().clone();
        lesson.quizzes = vec![Quiz {
            id: "q".into(),
            question: "?".into(),
            options: vec!["a".into(), "b".into()],
            correct_answer: 0,
            trigger_time,
            explanation: None,
        }];
        lesson
    }

    #[test]
    fn chapter_progress_midpoint() {
        let chapter = Chapter::new("ch1-1", "Intro", 0.0, 90.0);
        assert_eq!(chapter_progress(45.0, &chapter), 50.0);
    }

    #[test]
    fn chapter_progress_clamps_outside_range() {
        let chapter = Chapter::new("c", "C", 10.0, 20.0);
        assert_eq!(chapter_progress(5.0, &chapter), 0.0);
        assert_eq!(chapter_progress(25.0, &chapter), 100.0);
    }

    #[test]
    fn gap_has_no_active_chapter() {
        let chapters =
            vec![Chapter::new("a", "A", 0.0, 10.0), Chapter::new("b", "B", 20.0, 30.0)];
        assert!(active_chapter(15.0, &chapters).is_none());
        assert_eq!(active_chapter(25.0, &chapters).unwrap().id, "b");
    }

    #[test]
    fn shared_boundary_belongs_to_earlier_chapter() {
        let chapters =
            vec![Chapter::new("a", "A", 0.0, 90.0), Chapter::new("b", "B", 90.0, 180.0)];
        assert_eq!(active_chapter(90.0, &chapters).unwrap().id, "a");
    }

    #[test]
    fn visited_chapters_accumulate_without_duplicates() {
        let lesson = Course::builtin().lesson(1).unwrap().clone();
        let mut mapper = ChapterQuizMapper::new();
        let mut progress = ProgressData::default();

        let expected: [&[&str]; 4] = [
            &["ch1-1"],
            &["ch1-1", "ch1-2"],
            &["ch1-1", "ch1-2", "ch1-3"],
            &["ch1-1", "ch1-2", "ch1-3"],
        ];
        for (t, want) in [10.0, 95.0, 185.0, 290.0].into_iter().zip(expected) {
            mapper.update(t, &lesson, &mut progress, true);
            assert_eq!(progress.completed_chapters, want);
        }
    }

    #[test]
    fn update_reports_new_visits_once() {
        let lesson = Course::builtin().lesson(1).unwrap().clone();
        let mut mapper = ChapterQuizMapper::new();
        let mut progress = ProgressData::default();

        let first = mapper.update(5.0, &lesson, &mut progress, true);
        let second = mapper.update(6.0, &lesson, &mut progress, true);

        assert_eq!(first.newly_visited.as_deref(), Some("ch1-1"));
        assert_eq!(second.newly_visited, None);
        assert_eq!(second.active_chapter.as_deref(), Some("ch1-1"));
    }

    #[test]
    fn quiz_triggers_once_inside_window() {
        let lesson = lesson_with_quiz(60.0);
        let mut mapper = ChapterQuizMapper::new();
        let mut progress = ProgressData::default();

        let triggers = [59.6, 60.0, 60.4]
            .into_iter()
            .filter(|t| mapper.update(*t, &lesson, &mut progress, true).triggered_quiz.is_some())
            .count();

        assert_eq!(triggers, 1);
    }

    #[test]
    fn quiz_held_back_while_another_is_open() {
        let lesson = lesson_with_quiz(60.0);
        let mut mapper = ChapterQuizMapper::new();
        let mut progress = ProgressData::default();

        let held = mapper.update(60.0, &lesson, &mut progress, false);
        assert_eq!(held.triggered_quiz, None);
        assert_eq!(held.active_chapter.as_deref(), Some("ch1-1"));

        let due = mapper.update(60.2, &lesson, &mut progress, true);
        assert_eq!(due.triggered_quiz.as_deref(), Some("q"));
    }

    #[test]
    fn quiz_window_is_exclusive() {
        let lesson = lesson_with_quiz(60.0);
        let mut mapper = ChapterQuizMapper::new();
        let mut progress = ProgressData::default();

        assert!(mapper.update(59.0, &lesson, &mut progress, true).triggered_quiz.is_none());
        assert!(mapper.update(61.0, &lesson, &mut progress, true).triggered_quiz.is_none());
    }

    #[test]
    fn scored_quiz_does_not_trigger() {
        let lesson = lesson_with_quiz(60.0);
        let mut mapper = ChapterQuizMapper::new();
        let mut progress = ProgressData::default();
        progress.record_score("q", 0);

        assert!(mapper.update(60.0, &lesson, &mut progress, true).triggered_quiz.is_none());
    }

    #[test]
    fn seeking_back_into_window_does_not_retrigger() {
        let lesson = lesson_with_quiz(60.0);
        let mut mapper = ChapterQuizMapper::new();
        let mut progress = ProgressData::default();

        assert!(mapper.update(60.0, &lesson, &mut progress, true).triggered_quiz.is_some());
        mapper.update(120.0, &lesson, &mut progress, true);
        assert!(mapper.update(60.2, &lesson, &mut progress, true).triggered_quiz.is_none());
    }

    proptest! {
        #[test]
        fn chapter_progress_stays_in_bounds(
            start in 0.0f64..1000.0,
            len in 0.1f64..1000.0,
            t in -100.0f64..3000.0,
        ) {
            let chapter = Chapter::new("c", "C", start, start + len);
            let pct = chapter_progress(t, &chapter);
            prop_assert!((0.0..=100.0).contains(&pct));
        }

        #[test]
        fn visited_chapters_never_shrink(times in prop::collection::vec(0.0f64..400.0, 1..40)) {
            let lesson = Course::builtin().lesson(1).unwrap().clone();
            let mut mapper = ChapterQuizMapper::new();
            let mut progress = ProgressData::default();
            let mut previous = 0;
            for t in times {
                mapper.update(t, &lesson, &mut progress, true);
                prop_assert!(progress.completed_chapters.len() >= previous);
                previous = progress.completed_chapters.len();
            }
        }
    }
}
