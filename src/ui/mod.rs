//! UI rendering components

pub mod dialog;
pub mod help;
pub mod layout;
pub mod lesson;
pub mod quiz_panel;
pub mod settings;

use ratatui::{Frame, style::Style, widgets::Block};

use crate::app::controller::LessonController;
use crate::app::state::{AppState, Overlay};
use crate::store::KeyValueStore;
use crate::theme::Theme;

/// Main draw function
pub fn draw<S: KeyValueStore>(
    frame: &mut Frame,
    controller: &LessonController<S>,
    state: &AppState,
) {
    let theme = Theme::for_scheme(controller.preferences().theme);
    let area = frame.area();

    frame.render_widget(Block::default().style(Style::default().bg(theme.bg_primary)), area);
    lesson::draw(frame, area, controller, state, &theme);

    match &state.overlay {
        Overlay::None => {}
        Overlay::Settings => {
            settings::draw(frame, area, controller.preferences(), &state.settings, &theme);
        }
        Overlay::Help => help::draw_help(frame, area, &theme),
        Overlay::Stuck => help::draw_stuck(frame, area, &theme),
        Overlay::Quiz(quiz) => {
            quiz_panel::draw(frame, area, controller.pending_quiz(), quiz, &theme);
        }
        Overlay::Notice(notice) => dialog::draw_notice(frame, area, notice, &theme),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::app::controller::simulated_transport;
    use crate::course::Course;
    use crate::store::MemoryStore;

    fn render(controller: &LessonController<MemoryStore>, state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| draw(frame, controller, state)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    fn controller() -> LessonController<MemoryStore> {
        LessonController::new(
            Course::builtin(),
            MemoryStore::default(),
            simulated_transport,
            Duration::from_secs(5),
        )
    }

    #[test]
    fn lesson_screen_shows_breadcrumb_and_reminder() {
        let controller = controller();
        let screen = render(&controller, &AppState::default());

        assert!(screen.contains("Lesson 1 of 3"));
        assert!(screen.contains("Progress: 0 of 3 lessons completed"));
        assert!(screen.contains("Loading video..."));
        assert!(screen.contains("Please complete this lesson"));
    }

    #[test]
    fn ready_video_shows_clock() {
        let mut controller = controller();
        controller.tick(Duration::ZERO);
        let screen = render(&controller, &AppState::default());

        assert!(screen.contains("0:00 / 5:00"));
        assert!(screen.contains("Paused"));
    }

    #[test]
    fn settings_overlay_lists_rows() {
        let controller = controller();
        let mut state = AppState::default();
        state.overlay = Overlay::Settings;
        let screen = render(&controller, &state);

        assert!(screen.contains("Accessibility Settings"));
        assert!(screen.contains("Large (20px)"));
    }
}
