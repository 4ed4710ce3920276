//! Lesson sequencing
//!
//! The sequencer tracks which lesson is current and decides whether the
//! learner may move forward or back. Every transition must be confirmed
//! through a [`ConfirmationPort`]; a declined prompt leaves state untouched.

use async_trait::async_trait;

use super::model::LessonId;
use crate::config::progress::LessonCompletionMap;

/// A question put to the learner before a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// Move on to lesson `to`
    Advance { to: LessonId },
    /// Go back to lesson `to`
    Retreat { to: LessonId },
    /// Start the current lesson over
    Restart { lesson: LessonId },
}

impl Prompt {
    /// Text shown to the learner
    pub fn message(&self) -> &'static str {
        match self {
            Prompt::Advance { .. } => {
                "Are you ready to move to the next lesson? Your progress has been saved."
            }
            Prompt::Retreat { .. } => {
                "Go back to the previous lesson? Your current progress will be saved."
            }
            Prompt::Restart { .. } => {
                "Are you sure you want to restart this lesson? \
                 Your progress in this lesson will be lost."
            }
        }
    }
}

/// Asks the learner a yes/no question
#[async_trait]
pub trait ConfirmationPort: Send {
    /// Resolve to true if the learner accepts
    async fn confirm(&mut self, prompt: &Prompt) -> bool;
}

/// A transition that was carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Advanced { from: LessonId, to: LessonId },
    Retreated { from: LessonId, to: LessonId },
    Restarted { lesson: LessonId },
}

impl Transition {
    /// Lesson that is current after the transition
    pub fn lesson(&self) -> LessonId {
        match *self {
            Transition::Advanced { to, .. } | Transition::Retreated { to, .. } => to,
            Transition::Restarted { lesson } => lesson,
        }
    }
}

/// State machine over the current lesson id
#[derive(Debug, Clone)]
pub struct Sequencer {
    current: LessonId,
    last: LessonId,
    /// Whether the current lesson's video counts as watched this session
    is_video_completed: bool,
}

impl Sequencer {
    /// Start at `current` in a course of `lesson_count` lessons.
    ///
    /// `current` is clamped into the course.
    pub fn new(current: LessonId, lesson_count: usize, completion: &LessonCompletionMap) -> Self {
        let last = (lesson_count as LessonId).max(1);
        let current = current.clamp(1, last);
        Self { current, last, is_video_completed: completion.is_completed(current) }
    }

    pub fn current(&self) -> LessonId {
        self.current
    }

    pub fn lesson_count(&self) -> LessonId {
        self.last
    }

    pub fn is_video_completed(&self) -> bool {
        self.is_video_completed
    }

    /// Note that the current lesson has been watched far enough to move on
    pub fn mark_video_completed(&mut self) {
        self.is_video_completed = true;
    }

    /// Whether a next lesson exists
    pub fn has_next(&self) -> bool {
        self.current < self.last
    }

    /// Whether a previous lesson exists
    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    /// Forward navigation is allowed
    pub fn can_advance(&self) -> bool {
        self.has_next() && self.is_video_completed
    }

    /// Backward navigation is allowed
    pub fn can_retreat(&self) -> bool {
        self.has_previous()
    }

    /// Move to the next lesson if allowed and confirmed
    pub async fn advance<C>(
        &mut self,
        completion: &LessonCompletionMap,
        confirm: &mut C,
    ) -> Option<Transition>
    where
        C: ConfirmationPort + ?Sized,
    {
        if !self.can_advance() {
            return None;
        }
        let from = self.current;
        let to = from + 1;
        if !confirm.confirm(&Prompt::Advance { to }).await {
            return None;
        }

        self.enter(to, completion);
        Some(Transition::Advanced { from, to })
    }

    /// Move to the previous lesson if allowed and confirmed
    pub async fn retreat<C>(
        &mut self,
        completion: &LessonCompletionMap,
        confirm: &mut C,
    ) -> Option<Transition>
    where
        C: ConfirmationPort + ?Sized,
    {
        if !self.can_retreat() {
            return None;
        }
        let from = self.current;
        let to = from - 1;
        if !confirm.confirm(&Prompt::Retreat { to }).await {
            return None;
        }

        self.enter(to, completion);
        Some(Transition::Retreated { from, to })
    }

    /// Start the current lesson over if confirmed.
    ///
    /// Only transient state is reset; the completion map is left alone.
    pub async fn restart<C>(
        &mut self,
        completion: &LessonCompletionMap,
        confirm: &mut C,
    ) -> Option<Transition>
    where
        C: ConfirmationPort + ?Sized,
    {
        let lesson = self.current;
        if !confirm.confirm(&Prompt::Restart { lesson }).await {
            return None;
        }

        self.enter(lesson, completion);
        Some(Transition::Restarted { lesson })
    }

    fn enter(&mut self, lesson: LessonId, completion: &LessonCompletionMap) {
        self.current = lesson;
        self.is_video_completed = completion.is_completed(lesson);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Answers every prompt the same way and records what was asked
    struct Scripted {
        answer: bool,
        asked: Vec<Prompt>,
    }

    impl Scripted {
        fn new(answer: bool) -> Self {
            Self { answer, asked: Vec::new() }
        }
    }

    #[async_trait]
    impl ConfirmationPort for Scripted {
        async fn confirm(&mut self, prompt: &Prompt) -> bool {
            self.asked.push(*prompt);
            self.answer
        }
    }

    #[tokio::test]
    async fn retreat_denied_at_first_lesson() {
        let map = LessonCompletionMap::default();
        let mut sequencer = Sequencer::new(1, 3, &map);
        let mut port = Scripted::new(true);

        assert!(!sequencer.can_retreat());
        assert_eq!(sequencer.retreat(&map, &mut port).await, None);
        assert!(port.asked.is_empty());
        assert_eq!(sequencer.current(), 1);
    }

    #[tokio::test]
    async fn advance_denied_at_last_lesson() {
        let mut map = LessonCompletionMap::default();
        map.mark_completed(3);
        let mut sequencer = Sequencer::new(3, 3, &map);
        let mut port = Scripted::new(true);

        assert!(sequencer.is_video_completed());
        assert_eq!(sequencer.advance(&map, &mut port).await, None);
        assert!(port.asked.is_empty());
    }

    #[tokio::test]
    async fn advance_denied_until_video_completed() {
        let map = LessonCompletionMap::default();
        let mut sequencer = Sequencer::new(2, 3, &map);
        let mut port = Scripted::new(true);

        assert!(!sequencer.can_advance());
        assert_eq!(sequencer.advance(&map, &mut port).await, None);

        sequencer.mark_video_completed();
        assert!(sequencer.can_advance());
    }

    #[tokio::test]
    async fn advance_seeds_completion_from_map() {
        let mut map = LessonCompletionMap::default();
        map.mark_completed(2);
        map.mark_completed(3);
        let mut sequencer = Sequencer::new(2, 3, &map);
        let mut port = Scripted::new(true);

        let transition = sequencer.advance(&map, &mut port).await;

        assert_eq!(transition, Some(Transition::Advanced { from: 2, to: 3 }));
        assert_eq!(port.asked, vec![Prompt::Advance { to: 3 }]);
        assert_eq!(sequencer.current(), 3);
        assert!(sequencer.is_video_completed());
    }

    #[tokio::test]
    async fn advance_into_unwatched_lesson_resets_flag() {
        let map = LessonCompletionMap::default();
        let mut sequencer = Sequencer::new(1, 3, &map);
        sequencer.mark_video_completed();
        let mut port = Scripted::new(true);

        sequencer.advance(&map, &mut port).await;

        assert_eq!(sequencer.current(), 2);
        assert!(!sequencer.is_video_completed());
    }

    #[tokio::test]
    async fn declined_prompt_changes_nothing() {
        let map = LessonCompletionMap::default();
        let mut sequencer = Sequencer::new(2, 3, &map);
        sequencer.mark_video_completed();
        let mut port = Scripted::new(false);

        assert_eq!(sequencer.advance(&map, &mut port).await, None);
        assert_eq!(sequencer.retreat(&map, &mut port).await, None);
        assert_eq!(sequencer.current(), 2);
        assert!(sequencer.is_video_completed());
        assert_eq!(port.asked.len(), 2);
    }

    #[tokio::test]
    async fn retreat_seeds_completion_from_map() {
        let mut map = LessonCompletionMap::default();
        map.mark_completed(1);
        let mut sequencer = Sequencer::new(2, 3, &map);
        let mut port = Scripted::new(true);

        let transition = sequencer.retreat(&map, &mut port).await;

        assert_eq!(transition, Some(Transition::Retreated { from: 2, to: 1 }));
        assert!(sequencer.is_video_completed());
    }

    #[tokio::test]
    async fn restart_keeps_lesson_and_reseeds_flag() {
        let map = LessonCompletionMap::default();
        let mut sequencer = Sequencer::new(2, 3, &map);
        sequencer.mark_video_completed();
        let mut port = Scripted::new(true);

        let transition = sequencer.restart(&map, &mut port).await;

        assert_eq!(transition.map(|t| t.lesson()), Some(2));
        assert!(!sequencer.is_video_completed());
    }

    #[test]
    fn new_clamps_out_of_range_lesson() {
        let map = LessonCompletionMap::default();
        assert_eq!(Sequencer::new(0, 3, &map).current(), 1);
        assert_eq!(Sequencer::new(7, 3, &map).current(), 3);
    }

    #[test]
    fn prompts_have_messages() {
        assert!(Prompt::Advance { to: 2 }.message().contains("next lesson"));
        assert!(Prompt::Restart { lesson: 1 }.message().contains("restart"));
    }
}
