//! Application event loop

pub mod controller;
pub mod input;
pub mod prompt;
pub mod state;

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::config::Config;
use crate::store::FileStore;
use crate::theme::Theme;
use crate::ui;
use controller::{ControllerEvent, LessonController};
use input::{Action, lesson_key_to_action, overlay_key_to_action};
use prompt::TerminalPrompt;
use state::{AppState, Notice, Overlay};

/// Measures wall time between playback ticks
#[derive(Debug, Clone, Copy)]
struct TickClock {
    last: Instant,
}

impl TickClock {
    fn new(now: Instant) -> Self {
        Self { last: now }
    }

    /// Time since the previous tick or restart
    fn advance(&mut self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;
        elapsed
    }

    /// Forget time spent blocked in a modal prompt
    fn restart(&mut self, now: Instant) {
        self.last = now;
    }
}

/// The main application
pub struct App {
    /// Application configuration
    config: Config,

    /// Player state and persistence
    controller: LessonController<FileStore>,

    /// Current UI state
    state: AppState,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,

    /// Playback clock
    clock: TickClock,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config, controller: LessonController<FileStore>) -> Result<Self> {
        let terminal = Self::setup_terminal()?;

        Ok(Self {
            config,
            controller,
            state: AppState::default(),
            terminal,
            clock: TickClock::new(Instant::now()),
        })
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    fn theme(&self) -> Theme {
        Theme::for_scheme(self.controller.preferences().theme)
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        let tick_rate = self.config.tick_rate();
        self.clock.restart(Instant::now());

        loop {
            // Draw UI
            self.terminal.draw(|frame| {
                ui::draw(frame, &self.controller, &self.state);
            })?;

            // Handle events
            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        match self.handle_key(key.code).await {
                            Ok(true) => break, // Exit requested
                            Ok(false) => {}    // Continue
                            Err(e) => {
                                tracing::error!("Error handling key: {}", e);
                            }
                        }
                    }
                }
            }

            // Advance playback
            let elapsed = self.clock.advance(Instant::now());
            let events = self.controller.tick(elapsed);
            self.handle_controller_events(events);
        }

        self.restore_terminal()?;
        Ok(())
    }

    fn handle_controller_events(&mut self, events: Vec<ControllerEvent>) {
        for event in events {
            match event {
                ControllerEvent::Ready => self.state.status = None,
                ControllerEvent::ChapterEntered(id) => {
                    if let Some(chapter) = self.controller.current_lesson().chapter(&id) {
                        self.state.set_status(format!("Now playing: {}", chapter.title));
                    }
                }
                ControllerEvent::QuizDue(_) => self.state.open_quiz(),
                ControllerEvent::LessonCompleted(_) => {
                    self.state.show_notice(Notice::lesson_completed());
                }
            }
        }
    }

    /// Handle a key press, returns true if should exit
    async fn handle_key(&mut self, key: KeyCode) -> Result<bool> {
        if matches!(self.state.overlay, Overlay::None) {
            return match lesson_key_to_action(key) {
                Some(action) => self.handle_lesson_action(action).await,
                None => Ok(false),
            };
        }

        // Any key acknowledges a notice
        if let Overlay::Notice(_) = self.state.overlay {
            self.state.close_overlay();
            return Ok(false);
        }

        if let Some(action) = overlay_key_to_action(key) {
            self.handle_overlay_action(action).await;
        }
        Ok(false)
    }

    async fn handle_lesson_action(&mut self, action: Action) -> Result<bool> {
        let seek_step = self.config.seek_step_seconds;
        let volume_step = self.config.volume_step;

        match action {
            Action::Quit => return Ok(true),
            Action::TogglePlay => self.controller.toggle_play(),
            Action::SeekBack => self.controller.seek_by(-seek_step),
            Action::SeekForward => self.controller.seek_by(seek_step),
            Action::VolumeUp => self.controller.adjust_volume(volume_step),
            Action::VolumeDown => self.controller.adjust_volume(-volume_step),
            Action::ToggleMute => self.controller.toggle_mute(),
            Action::ToggleFullscreen => self.controller.toggle_fullscreen(),
            Action::CycleSpeed => self.controller.cycle_speed(),
            Action::Chapter(index) => self.controller.seek_to_chapter(index),
            Action::NextLesson => self.next_lesson().await,
            Action::PreviousLesson => self.previous_lesson().await,
            Action::RestartLesson => self.restart_lesson().await,
            Action::Settings => self.state.toggle_overlay(Overlay::Settings),
            Action::Help => self.state.toggle_overlay(Overlay::Help),
            Action::Stuck => self.state.toggle_overlay(Overlay::Stuck),
            Action::Back => {
                if self.controller.session().snapshot().is_fullscreen {
                    self.controller.toggle_fullscreen();
                }
            }
            Action::Up | Action::Down | Action::Select => {}
        }
        Ok(false)
    }

    async fn handle_overlay_action(&mut self, action: Action) {
        match &mut self.state.overlay {
            Overlay::Settings => match action {
                Action::Up => self.state.settings.up(),
                Action::Down => self.state.settings.down(),
                Action::Select => {
                    let patch = self.state.settings.row().next_value(self.controller.preferences());
                    self.controller.update_preferences(patch);
                }
                Action::Back => self.state.close_overlay(),
                _ => {}
            },
            Overlay::Quiz(quiz) => {
                let option_count = self.controller.pending_quiz().map_or(0, |q| q.options.len());
                match action {
                    // After answering, any selection closes the panel
                    _ if quiz.outcome.is_some() => {
                        if matches!(action, Action::Select | Action::Back) {
                            self.state.close_overlay();
                        }
                    }
                    Action::Up => quiz.up(),
                    Action::Down => quiz.down(option_count),
                    Action::Select => {
                        quiz.answer = Some(quiz.selected);
                        quiz.outcome = self.controller.answer_quiz(quiz.selected);
                        if quiz.outcome.is_none() {
                            self.state.close_overlay();
                        }
                    }
                    Action::Back => {
                        self.controller.dismiss_quiz();
                        self.state.close_overlay();
                    }
                    _ => {}
                }
            }
            Overlay::Help => {
                if action == Action::Back {
                    self.state.close_overlay();
                }
            }
            Overlay::Stuck => match action {
                Action::RestartLesson => {
                    self.state.close_overlay();
                    self.restart_lesson().await;
                }
                Action::PreviousLesson => {
                    self.state.close_overlay();
                    self.previous_lesson().await;
                }
                Action::Back => self.state.close_overlay(),
                _ => {}
            },
            Overlay::Notice(_) | Overlay::None => {}
        }
    }

    async fn next_lesson(&mut self) {
        if !self.controller.sequencer().can_advance() {
            if self.controller.sequencer().has_next() {
                self.state.set_status("Please complete this lesson to proceed to the next one.");
            }
            return;
        }
        let theme = self.theme();
        let mut prompt = TerminalPrompt::new(&mut self.terminal, theme);
        let transition = self.controller.next_lesson(&mut prompt).await;
        self.clock.restart(Instant::now());
        if transition.is_some() {
            self.state.status = None;
        }
    }

    async fn previous_lesson(&mut self) {
        if !self.controller.sequencer().can_retreat() {
            return;
        }
        let theme = self.theme();
        let mut prompt = TerminalPrompt::new(&mut self.terminal, theme);
        let transition = self.controller.previous_lesson(&mut prompt).await;
        self.clock.restart(Instant::now());
        if transition.is_some() {
            self.state.status = None;
        }
    }

    async fn restart_lesson(&mut self) {
        let theme = self.theme();
        let mut prompt = TerminalPrompt::new(&mut self.terminal, theme);
        let transition = self.controller.restart_lesson(&mut prompt).await;
        self.clock.restart(Instant::now());
        if transition.is_some() {
            self.state.set_status("Lesson restarted");
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_reports_full_wall_time() {
        let start = Instant::now();
        let mut clock = TickClock::new(start);

        assert_eq!(clock.advance(start + Duration::from_millis(1000)), Duration::from_millis(1000));
        assert_eq!(clock.advance(start + Duration::from_millis(1100)), Duration::from_millis(100));
    }

    #[test]
    fn restart_discards_time_spent_in_a_prompt() {
        let start = Instant::now();
        let mut clock = TickClock::new(start);

        clock.restart(start + Duration::from_secs(30));

        assert_eq!(clock.advance(start + Duration::from_millis(30_050)), Duration::from_millis(50));
    }
}
