//! Persisted course progress

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::preferences::UserPreferences;
use crate::course::LessonId;
use crate::store::{self, CURRENT_LESSON_KEY, KeyValueStore, LESSON_PROGRESS_KEY, PREFERENCES_KEY};

/// Which lessons have been completed (lesson id -> completed)
///
/// This is the only record navigation gating reads from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LessonCompletionMap(BTreeMap<LessonId, bool>);

impl LessonCompletionMap {
    /// Whether a lesson is recorded as completed (absent means no)
    pub fn is_completed(&self, id: LessonId) -> bool {
        self.0.get(&id).copied().unwrap_or(false)
    }

    /// Record a lesson as completed. Returns true if this changed anything.
    pub fn mark_completed(&mut self, id: LessonId) -> bool {
        !self.0.insert(id, true).unwrap_or(false)
    }

    /// Number of lessons marked completed
    pub fn completed_count(&self) -> usize {
        self.0.values().filter(|done| **done).count()
    }
}

/// Everything read from the store at startup
#[derive(Debug, Clone, PartialEq)]
pub struct SavedState {
    pub preferences: UserPreferences,
    pub completion: LessonCompletionMap,
    pub current_lesson_id: LessonId,
}

impl SavedState {
    /// Load all records, substituting defaults for anything missing or corrupt.
    ///
    /// A current lesson id outside `1..=lesson_count` falls back to 1.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S, lesson_count: usize) -> Self {
        let preferences = store::load_or_default::<UserPreferences, _>(store, PREFERENCES_KEY)
            .sanitized();
        let completion = store::load_or_default(store, LESSON_PROGRESS_KEY);

        let stored_id: Option<LessonId> = store::load_or_default(store, CURRENT_LESSON_KEY);
        let current_lesson_id = match stored_id {
            Some(id) if id >= 1 && (id as usize) <= lesson_count => id,
            Some(id) => {
                tracing::warn!("Saved lesson {} is not in this course, starting at lesson 1", id);
                1
            }
            None => 1,
        };

        Self { preferences, completion, current_lesson_id }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::preferences::{ColorScheme, FontSize};
    use crate::store::MemoryStore;

    #[test]
    fn absent_lessons_are_not_completed() {
        let map = LessonCompletionMap::default();
        assert!(!map.is_completed(1));
    }

    #[test]
    fn mark_completed_reports_first_change_only() {
        let mut map = LessonCompletionMap::default();
        assert!(map.mark_completed(2));
        assert!(!map.mark_completed(2));
        assert!(map.is_completed(2));
        assert_eq!(map.completed_count(), 1);
    }

    #[test]
    fn completion_map_uses_string_keys_on_the_wire() {
        let mut map = LessonCompletionMap::default();
        map.mark_completed(1);
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"1":true}"#);

        let parsed: LessonCompletionMap = serde_json::from_str(r#"{"1":true,"2":false}"#).unwrap();
        assert!(parsed.is_completed(1));
        assert!(!parsed.is_completed(2));
    }

    #[test]
    fn load_empty_store_gives_defaults() {
        let state = SavedState::load(&MemoryStore::default(), 3);
        assert_eq!(state.preferences, UserPreferences::default());
        assert_eq!(state.completion, LessonCompletionMap::default());
        assert_eq!(state.current_lesson_id, 1);
    }

    #[test]
    fn load_reads_saved_records() {
        let mut store = MemoryStore::default();
        let saved = r#"{"fontSize":"small","theme":"high-contrast","playbackSpeed":1.5,
            "captionsEnabled":false,"autoPlay":true}"#;
        store.set(PREFERENCES_KEY, saved).unwrap();
        store.set(LESSON_PROGRESS_KEY, r#"{"1":true}"#).unwrap();
        store.set(CURRENT_LESSON_KEY, "2").unwrap();

        let state = SavedState::load(&store, 3);

        assert_eq!(state.preferences.font_size, FontSize::Small);
        assert_eq!(state.preferences.theme, ColorScheme::HighContrast);
        assert!(state.preferences.auto_play);
        assert!(state.completion.is_completed(1));
        assert_eq!(state.current_lesson_id, 2);
    }

    #[test]
    fn load_falls_back_on_corrupt_records() {
        let mut store = MemoryStore::default();
        store.set(PREFERENCES_KEY, "{broken").unwrap();
        store.set(LESSON_PROGRESS_KEY, "[1,2,3]").unwrap();
        store.set(CURRENT_LESSON_KEY, "\"two\"").unwrap();

        let state = SavedState::load(&store, 3);

        assert_eq!(state.preferences, UserPreferences::default());
        assert_eq!(state.completion, LessonCompletionMap::default());
        assert_eq!(state.current_lesson_id, 1);
    }

    #[test]
    fn load_clamps_out_of_range_lesson() {
        let mut store = MemoryStore::default();
        store.set(CURRENT_LESSON_KEY, "9").unwrap();
        assert_eq!(SavedState::load(&store, 3).current_lesson_id, 1);
    }
}
