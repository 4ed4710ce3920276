//! Key bindings

use crossterm::event::KeyCode;

/// Actions that can be taken in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Transport
    TogglePlay,
    SeekBack,
    SeekForward,
    VolumeUp,
    VolumeDown,
    ToggleMute,
    ToggleFullscreen,
    CycleSpeed,
    /// Jump to chapter (0-based)
    Chapter(usize),

    // Lessons
    NextLesson,
    PreviousLesson,
    RestartLesson,

    // Panels
    Settings,
    Help,
    Stuck,

    // Overlay navigation
    Up,
    Down,
    Select,
    Back,

    Quit,
}

/// Key mapping on the lesson screen
pub fn lesson_key_to_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char(' ') | KeyCode::Char('k') => Some(Action::TogglePlay),
        KeyCode::Char('h') | KeyCode::Left => Some(Action::SeekBack),
        KeyCode::Char('l') | KeyCode::Right => Some(Action::SeekForward),
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => Some(Action::VolumeUp),
        KeyCode::Char('-') | KeyCode::Down => Some(Action::VolumeDown),
        KeyCode::Char('m') => Some(Action::ToggleMute),
        KeyCode::Char('f') => Some(Action::ToggleFullscreen),
        KeyCode::Char('>') => Some(Action::CycleSpeed),
        KeyCode::Char(c @ '1'..='9') => Some(Action::Chapter(c as usize - '1' as usize)),
        KeyCode::Char('n') => Some(Action::NextLesson),
        KeyCode::Char('p') => Some(Action::PreviousLesson),
        KeyCode::Char('r') => Some(Action::RestartLesson),
        KeyCode::Char('s') => Some(Action::Settings),
        KeyCode::Char('?') => Some(Action::Help),
        KeyCode::Char('x') => Some(Action::Stuck),
        KeyCode::Esc => Some(Action::Back),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

/// Key mapping while an overlay is open
pub fn overlay_key_to_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('k') | KeyCode::Up => Some(Action::Up),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::Down),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Select),
        KeyCode::Esc | KeyCode::Char('q') => Some(Action::Back),
        // Shortcuts that work from the help panels
        KeyCode::Char('r') => Some(Action::RestartLesson),
        KeyCode::Char('p') => Some(Action::PreviousLesson),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_toggles_playback() {
        assert_eq!(lesson_key_to_action(KeyCode::Char(' ')), Some(Action::TogglePlay));
    }

    #[test]
    fn digits_jump_to_chapters() {
        assert_eq!(lesson_key_to_action(KeyCode::Char('1')), Some(Action::Chapter(0)));
        assert_eq!(lesson_key_to_action(KeyCode::Char('3')), Some(Action::Chapter(2)));
        assert_eq!(lesson_key_to_action(KeyCode::Char('0')), None);
    }

    #[test]
    fn arrows_mean_different_things_in_overlays() {
        assert_eq!(lesson_key_to_action(KeyCode::Up), Some(Action::VolumeUp));
        assert_eq!(overlay_key_to_action(KeyCode::Up), Some(Action::Up));
    }

    #[test]
    fn escape_backs_out_everywhere() {
        assert_eq!(lesson_key_to_action(KeyCode::Esc), Some(Action::Back));
        assert_eq!(overlay_key_to_action(KeyCode::Esc), Some(Action::Back));
    }
}
