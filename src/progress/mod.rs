//! Per-lesson viewing progress
//!
//! Only the current lesson's [`ProgressData`] lives in memory. It is
//! rebuilt from scratch whenever a lesson is entered or restarted; the
//! durable record of completion is
//! [`LessonCompletionMap`](crate::config::progress::LessonCompletionMap).

pub mod chapters;
pub mod completion;

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

pub use chapters::{ChapterQuizMapper, MapperUpdate, active_chapter, chapter_progress};
pub use completion::{
    CompletionEvaluator, CompletionPolicy, CompletionSignals, LESSON_COMPLETION, NAVIGATION_UNLOCK,
    percentage,
};

use crate::playback::PlaybackSnapshot;

/// Viewing progress for the current lesson
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressData {
    /// Last observed position in seconds
    pub current_time: f64,
    /// Last observed media length in seconds
    pub total_time: f64,
    /// Chapters visited this session, in visit order
    pub completed_chapters: Vec<String>,
    /// Quiz id -> score (1 correct, 0 incorrect)
    pub quiz_scores: HashMap<String, u8>,
    /// Unix timestamp of the last snapshot
    pub last_watched: Option<i64>,
    /// Latches to true once; only a restart clears it
    pub completed: bool,
}

impl ProgressData {
    /// Record position and length from a snapshot
    pub fn record_snapshot(&mut self, snapshot: &PlaybackSnapshot) {
        self.current_time = snapshot.current_time;
        self.total_time = snapshot.duration;
        self.last_watched = Some(unix_now());
    }

    /// Whether a chapter has been visited
    pub fn has_chapter(&self, chapter_id: &str) -> bool {
        self.completed_chapters.iter().any(|id| id == chapter_id)
    }

    /// Append a visited chapter. Returns true if it wasn't already recorded.
    pub fn add_chapter(&mut self, chapter_id: &str) -> bool {
        if self.has_chapter(chapter_id) {
            return false;
        }
        self.completed_chapters.push(chapter_id.to_string());
        true
    }

    /// Whether a score exists for the quiz
    pub fn has_score(&self, quiz_id: &str) -> bool {
        self.quiz_scores.contains_key(quiz_id)
    }

    pub fn record_score(&mut self, quiz_id: &str, score: u8) {
        self.quiz_scores.insert(quiz_id.to_string(), score);
    }

    /// Latch the completed flag. Returns true on the first call only.
    pub fn mark_completed(&mut self) -> bool {
        !std::mem::replace(&mut self.completed, true)
    }

    /// Percentage of the media watched
    pub fn percentage(&self) -> f64 {
        percentage(self.current_time, self.total_time)
    }
}

fn unix_now() -> i64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| d.as_secs() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_snapshot_copies_position() {
        let mut progress = ProgressData::default();
        let snapshot =
            PlaybackSnapshot { current_time: 42.0, duration: 300.0, ..Default::default() };

        progress.record_snapshot(&snapshot);

        assert_eq!(progress.current_time, 42.0);
        assert_eq!(progress.total_time, 300.0);
        assert!(progress.last_watched.is_some());
        assert!((progress.percentage() - 14.0).abs() < 1e-9);
    }

    #[test]
    fn chapters_are_not_duplicated() {
        let mut progress = ProgressData::default();
        assert!(progress.add_chapter("ch1-1"));
        assert!(!progress.add_chapter("ch1-1"));
        assert_eq!(progress.completed_chapters, vec!["ch1-1"]);
    }

    #[test]
    fn completed_latches() {
        let mut progress = ProgressData::default();
        assert!(progress.mark_completed());
        assert!(!progress.mark_completed());
        assert!(progress.completed);
    }

    #[test]
    fn zero_score_still_counts_as_recorded() {
        let mut progress = ProgressData::default();
        progress.record_score("q1", 0);
        assert!(progress.has_score("q1"));
    }
}
