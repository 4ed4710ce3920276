//! Root controller
//!
//! Owns all application state: the course, saved preferences and
//! completion, the lesson sequencer, and the session for the lesson on
//! screen. Transport events flow in through [`LessonController::tick`];
//! every change to persisted state is written to the store on the spot.

use std::time::Duration;

use serde::Serialize;

use crate::config::preferences::{PreferencesPatch, UserPreferences, next_speed};
use crate::config::progress::{LessonCompletionMap, SavedState};
use crate::course::{ConfirmationPort, Course, Lesson, LessonId, Quiz, Sequencer, Transition};
use crate::playback::{
    MediaTransport, Observation, PlaybackObserver, PlaybackSnapshot, ReadyState,
    SimulatedTransport, TransportEvent,
};
use crate::progress::{ChapterQuizMapper, CompletionEvaluator, ProgressData};
use crate::store::{
    self, CURRENT_LESSON_KEY, KeyValueStore, LESSON_PROGRESS_KEY, PREFERENCES_KEY,
};

/// Builds the transport for a lesson
pub type TransportFactory = fn(&Lesson) -> Box<dyn MediaTransport + Send>;

/// Default factory: a simulated transport sized to the lesson
pub fn simulated_transport(lesson: &Lesson) -> Box<dyn MediaTransport + Send> {
    Box::new(SimulatedTransport::new(lesson.video_url.clone(), lesson.expected_duration()))
}

/// Upper bound on event rounds per tick, in case a transport keeps
/// raising events in response to our own commands
const MAX_EVENT_ROUNDS: usize = 8;

/// Something the UI should react to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    /// The media finished loading
    Ready,
    /// The learner entered a chapter for the first time this session
    ChapterEntered(String),
    /// A quiz is due; playback has been paused
    QuizDue(String),
    /// The current lesson was just completed
    LessonCompleted(LessonId),
}

/// Result of answering a quiz
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub correct: bool,
    pub explanation: Option<String>,
}

/// Transient state for the lesson on screen
pub struct LessonSession {
    lesson_id: LessonId,
    transport: Box<dyn MediaTransport + Send>,
    observer: PlaybackObserver,
    mapper: ChapterQuizMapper,
    evaluator: CompletionEvaluator,
    progress: ProgressData,
    active_chapter: Option<String>,
    pending_quiz: Option<String>,
}

impl LessonSession {
    fn new(lesson: &Lesson, factory: TransportFactory, stall_timeout: Duration) -> Self {
        Self {
            lesson_id: lesson.id,
            transport: factory(lesson),
            observer: PlaybackObserver::new(stall_timeout),
            mapper: ChapterQuizMapper::new(),
            evaluator: CompletionEvaluator::new(),
            progress: ProgressData::default(),
            active_chapter: None,
            pending_quiz: None,
        }
    }

    pub fn lesson_id(&self) -> LessonId {
        self.lesson_id
    }

    pub fn snapshot(&self) -> &PlaybackSnapshot {
        self.observer.latest()
    }

    pub fn ready_state(&self) -> ReadyState {
        self.observer.ready_state()
    }

    pub fn controls_enabled(&self) -> bool {
        self.observer.controls_enabled()
    }

    pub fn progress(&self) -> &ProgressData {
        &self.progress
    }

    pub fn active_chapter(&self) -> Option<&str> {
        self.active_chapter.as_deref()
    }

    pub fn pending_quiz(&self) -> Option<&str> {
        self.pending_quiz.as_deref()
    }
}

/// Owns and coordinates all player state
pub struct LessonController<S: KeyValueStore> {
    course: Course,
    store: S,
    preferences: UserPreferences,
    completion: LessonCompletionMap,
    sequencer: Sequencer,
    session: LessonSession,
    factory: TransportFactory,
    stall_timeout: Duration,
}

impl<S: KeyValueStore> LessonController<S> {
    /// Restore saved state from `store` and open the current lesson
    pub fn new(
        course: Course,
        store: S,
        factory: TransportFactory,
        stall_timeout: Duration,
    ) -> Self {
        let saved = SavedState::load(&store, course.len());
        let sequencer = Sequencer::new(saved.current_lesson_id, course.len(), &saved.completion);
        let lesson = Self::lesson_in(&course, sequencer.current());
        let session = LessonSession::new(lesson, factory, stall_timeout);

        let mut controller = Self {
            course,
            store,
            preferences: saved.preferences,
            completion: saved.completion,
            sequencer,
            session,
            factory,
            stall_timeout,
        };

        // Write back what was loaded so defaults and corrections are on disk
        controller.persist_preferences();
        controller.persist_completion();
        controller.persist_current_lesson();

        tracing::info!(
            "Opened lesson {} of {}",
            controller.sequencer.current(),
            controller.course.len()
        );
        controller
    }

    fn lesson_in(course: &Course, id: LessonId) -> &Lesson {
        // The sequencer keeps ids inside 1..=len, and a validated course is never empty
        course.lesson(id).unwrap_or_else(|| &course.lessons()[0])
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn current_lesson(&self) -> &Lesson {
        Self::lesson_in(&self.course, self.sequencer.current())
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    pub fn completion(&self) -> &LessonCompletionMap {
        &self.completion
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn session(&self) -> &LessonSession {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The quiz waiting for an answer, if any
    pub fn pending_quiz(&self) -> Option<&Quiz> {
        let id = self.session.pending_quiz.as_deref()?;
        self.current_lesson().quiz(id)
    }

    /// Advance the transport clock and process every event it raised
    pub fn tick(&mut self, elapsed: Duration) -> Vec<ControllerEvent> {
        self.session.transport.tick(elapsed);
        self.session.observer.note_elapsed(elapsed);
        self.process_events()
    }

    /// Process pending transport events without advancing the clock
    pub fn process_events(&mut self) -> Vec<ControllerEvent> {
        let mut out = Vec::new();

        for _ in 0..MAX_EVENT_ROUNDS {
            let events = self.session.transport.drain_events();
            if events.is_empty() {
                break;
            }
            for event in events {
                let observation =
                    self.session.observer.observe(event, self.session.transport.as_ref());
                self.handle_observation(observation, &mut out);
            }
        }

        out
    }

    fn handle_observation(&mut self, observation: Observation, out: &mut Vec<ControllerEvent>) {
        let snapshot = &observation.snapshot;
        tracing::trace!("{:?} at {:.1}s", observation.event, snapshot.current_time);

        if observation.became_ready {
            self.session.transport.set_rate(self.preferences.playback_speed);
            if self.preferences.auto_play {
                self.session.transport.play();
            }
            out.push(ControllerEvent::Ready);
        }

        self.session.progress.record_snapshot(snapshot);

        if observation.event == TransportEvent::TimeUpdate {
            self.map_position(snapshot.current_time, out);
        }

        self.evaluate_completion(snapshot, out);
    }

    fn map_position(&mut self, t: f64, out: &mut Vec<ControllerEvent>) {
        let lesson = Self::lesson_in(&self.course, self.sequencer.current());
        // A quiz that is already waiting holds back the next one
        let accept_quiz = self.session.pending_quiz.is_none();
        let update =
            self.session.mapper.update(t, lesson, &mut self.session.progress, accept_quiz);

        self.session.active_chapter = update.active_chapter;
        if let Some(chapter) = update.newly_visited {
            out.push(ControllerEvent::ChapterEntered(chapter));
        }
        if let Some(quiz) = update.triggered_quiz {
            self.session.transport.pause();
            self.session.pending_quiz = Some(quiz.clone());
            out.push(ControllerEvent::QuizDue(quiz));
        }
    }

    fn evaluate_completion(&mut self, snapshot: &PlaybackSnapshot, out: &mut Vec<ControllerEvent>) {
        let signals = self.session.evaluator.evaluate(snapshot.current_time, snapshot.duration);

        if signals.navigation_unlocked {
            tracing::debug!("Lesson {} unlocked the next lesson", self.sequencer.current());
            self.sequencer.mark_video_completed();
        }

        if signals.lesson_completed && self.session.progress.mark_completed() {
            let lesson = self.sequencer.current();
            tracing::info!("Lesson {} completed", lesson);
            self.sequencer.mark_video_completed();
            if self.completion.mark_completed(lesson) {
                self.persist_completion();
            }
            out.push(ControllerEvent::LessonCompleted(lesson));
        }
    }

    /// Answer the pending quiz with option `answer`
    pub fn answer_quiz(&mut self, answer: usize) -> Option<QuizOutcome> {
        let quiz = self.pending_quiz()?.clone();
        let correct = quiz.is_correct(answer);
        self.session.progress.record_score(&quiz.id, u8::from(correct));
        self.session.pending_quiz = None;
        let verdict = if correct { "correct" } else { "incorrect" };
        tracing::info!("Quiz {} answered ({})", quiz.id, verdict);
        Some(QuizOutcome { correct, explanation: quiz.explanation })
    }

    /// Close the pending quiz without answering
    pub fn dismiss_quiz(&mut self) {
        if let Some(quiz) = self.session.pending_quiz.take() {
            tracing::debug!("Quiz {} dismissed", quiz);
        }
    }

    // Transport controls. All of them are ignored until the media is ready.

    pub fn toggle_play(&mut self) {
        if self.session.controls_enabled() {
            self.session.transport.toggle_play();
        }
    }

    /// Seek relative to the current position
    pub fn seek_by(&mut self, delta: f64) {
        if self.session.controls_enabled() {
            let target = self.session.transport.snapshot().current_time + delta;
            self.session.transport.seek(target);
        }
    }

    /// Seek to the start of the chapter at `index` (0-based)
    pub fn seek_to_chapter(&mut self, index: usize) {
        if !self.session.controls_enabled() {
            return;
        }
        if let Some(start) = self.current_lesson().chapters.get(index).map(|c| c.start_time) {
            self.session.transport.seek(start);
        }
    }

    /// Change volume by `delta`, clamped to `[0, 1]`
    pub fn adjust_volume(&mut self, delta: f64) {
        if self.session.controls_enabled() {
            let volume = self.session.transport.snapshot().volume + delta;
            self.session.transport.set_volume(volume.clamp(0.0, 1.0));
        }
    }

    pub fn toggle_mute(&mut self) {
        if self.session.controls_enabled() {
            let muted = self.session.transport.snapshot().is_muted;
            self.session.transport.set_muted(!muted);
        }
    }

    pub fn toggle_fullscreen(&mut self) {
        if self.session.controls_enabled() {
            let fullscreen = self.session.transport.snapshot().is_fullscreen;
            self.session.transport.set_fullscreen(!fullscreen);
        }
    }

    /// Step to the next offered playback speed and remember it
    pub fn cycle_speed(&mut self) {
        let speed = next_speed(self.preferences.playback_speed);
        self.update_preferences(PreferencesPatch {
            playback_speed: Some(speed),
            ..Default::default()
        });
    }

    /// Merge a partial preferences update and persist it
    pub fn update_preferences(&mut self, patch: PreferencesPatch) {
        if patch.is_empty() {
            return;
        }
        let previous_speed = self.preferences.playback_speed;
        self.preferences.merge(patch);
        self.persist_preferences();

        if self.preferences.playback_speed != previous_speed && self.session.controls_enabled() {
            self.session.transport.set_rate(self.preferences.playback_speed);
        }
    }

    // Navigation

    /// Move to the next lesson, if allowed and confirmed
    pub async fn next_lesson<C>(&mut self, confirm: &mut C) -> Option<Transition>
    where
        C: ConfirmationPort + ?Sized,
    {
        let transition = self.sequencer.advance(&self.completion, confirm).await?;
        self.enter_lesson(transition);
        Some(transition)
    }

    /// Move to the previous lesson, if allowed and confirmed
    pub async fn previous_lesson<C>(&mut self, confirm: &mut C) -> Option<Transition>
    where
        C: ConfirmationPort + ?Sized,
    {
        let transition = self.sequencer.retreat(&self.completion, confirm).await?;
        self.enter_lesson(transition);
        Some(transition)
    }

    /// Start the current lesson over, if confirmed
    pub async fn restart_lesson<C>(&mut self, confirm: &mut C) -> Option<Transition>
    where
        C: ConfirmationPort + ?Sized,
    {
        let transition = self.sequencer.restart(&self.completion, confirm).await?;
        self.enter_lesson(transition);
        Some(transition)
    }

    fn enter_lesson(&mut self, transition: Transition) {
        tracing::info!("{:?}", transition);
        self.persist_current_lesson();

        // Replacing the session tears down the previous transport
        let lesson = Self::lesson_in(&self.course, self.sequencer.current());
        self.session = LessonSession::new(lesson, self.factory, self.stall_timeout);
    }

    // Persistence. Failures are logged and never interrupt playback.

    fn persist_preferences(&mut self) {
        persist(&mut self.store, PREFERENCES_KEY, &self.preferences);
    }

    fn persist_completion(&mut self) {
        persist(&mut self.store, LESSON_PROGRESS_KEY, &self.completion);
    }

    fn persist_current_lesson(&mut self) {
        persist(&mut self.store, CURRENT_LESSON_KEY, &self.sequencer.current());
    }
}

fn persist<S, T>(store: &mut S, key: &str, value: &T)
where
    S: KeyValueStore,
    T: Serialize,
{
    if let Err(e) = store::save_json(store, key, value) {
        tracing::warn!("Failed to save {}: {}", key, e);
    }
}
