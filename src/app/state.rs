//! UI state definitions
//!
//! Only presentation state lives here. Everything that is persisted or
//! drives playback is owned by the controller.

use crate::config::preferences::{PreferencesPatch, UserPreferences, next_speed, speed_label};

use super::controller::QuizOutcome;

/// Which overlay is shown on top of the lesson screen
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Overlay {
    #[default]
    None,
    Settings,
    Help,
    /// "I'm stuck" options
    Stuck,
    Quiz(QuizState),
    Notice(Notice),
}

/// One row of the settings panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingRow {
    TextSize,
    Theme,
    Speed,
    Captions,
    AutoPlay,
}

impl SettingRow {
    pub const ALL: [SettingRow; 5] = [
        SettingRow::TextSize,
        SettingRow::Theme,
        SettingRow::Speed,
        SettingRow::Captions,
        SettingRow::AutoPlay,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SettingRow::TextSize => "Text Size",
            SettingRow::Theme => "Display Theme",
            SettingRow::Speed => "Video Speed",
            SettingRow::Captions => "Show Captions",
            SettingRow::AutoPlay => "Auto-play Videos",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            SettingRow::TextSize => "Choose a comfortable text size for reading",
            SettingRow::Theme => "Select a theme that's easy on your eyes",
            SettingRow::Speed => "Adjust how fast the video plays",
            SettingRow::Captions => "Display text captions for spoken content",
            SettingRow::AutoPlay => "Start videos automatically when a lesson opens",
        }
    }

    /// Current value as display text
    pub fn value(self, prefs: &UserPreferences) -> String {
        match self {
            SettingRow::TextSize => prefs.font_size.label().to_string(),
            SettingRow::Theme => prefs.theme.label().to_string(),
            SettingRow::Speed => speed_label(prefs.playback_speed),
            SettingRow::Captions => on_off(prefs.captions_enabled).to_string(),
            SettingRow::AutoPlay => on_off(prefs.auto_play).to_string(),
        }
    }

    /// Patch that moves this row to its next value
    pub fn next_value(self, prefs: &UserPreferences) -> PreferencesPatch {
        let mut patch = PreferencesPatch::default();
        match self {
            SettingRow::TextSize => patch.font_size = Some(prefs.font_size.next()),
            SettingRow::Theme => patch.theme = Some(prefs.theme.next()),
            SettingRow::Speed => patch.playback_speed = Some(next_speed(prefs.playback_speed)),
            SettingRow::Captions => patch.captions_enabled = Some(!prefs.captions_enabled),
            SettingRow::AutoPlay => patch.auto_play = Some(!prefs.auto_play),
        }
        patch
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "On" } else { "Off" }
}

/// Settings panel cursor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsState {
    pub selected: usize,
}

impl SettingsState {
    pub fn row(&self) -> SettingRow {
        SettingRow::ALL[self.selected.min(SettingRow::ALL.len() - 1)]
    }

    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn down(&mut self) {
        if self.selected + 1 < SettingRow::ALL.len() {
            self.selected += 1;
        }
    }
}

/// State of the quiz overlay
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuizState {
    /// Highlighted option
    pub selected: usize,
    /// Set once the learner has answered
    pub outcome: Option<QuizOutcome>,
    /// Option the learner chose
    pub answer: Option<usize>,
}

impl QuizState {
    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn down(&mut self, option_count: usize) {
        if self.selected + 1 < option_count {
            self.selected += 1;
        }
    }
}

/// A message the learner acknowledges with any key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
}

impl Notice {
    pub fn lesson_completed() -> Self {
        Self {
            title: " Lesson Complete ".to_string(),
            body: "Congratulations! You have completed this lesson. \
                   You can now proceed to the next lesson."
                .to_string(),
        }
    }
}

/// Full UI state
#[derive(Debug, Default)]
pub struct AppState {
    pub overlay: Overlay,
    pub settings: SettingsState,
    /// One-line status shown in the footer
    pub status: Option<String>,
    /// Notice waiting for the open quiz to close
    queued_notice: Option<Notice>,
}

impl AppState {
    /// Open `overlay`, or close it if it is already showing
    pub fn toggle_overlay(&mut self, overlay: Overlay) {
        if self.overlay == overlay {
            self.overlay = Overlay::None;
        } else {
            self.overlay = overlay;
        }
    }

    /// Close the current overlay, revealing a queued notice if there is one
    pub fn close_overlay(&mut self) {
        self.overlay = match self.queued_notice.take() {
            Some(notice) => Overlay::Notice(notice),
            None => Overlay::None,
        };
    }

    /// Show the quiz panel. A notice on screen is queued behind it.
    pub fn open_quiz(&mut self) {
        if let Overlay::Notice(notice) = std::mem::take(&mut self.overlay) {
            self.queued_notice = Some(notice);
        }
        self.overlay = Overlay::Quiz(QuizState::default());
    }

    /// Show a notice, or queue it while a quiz is open
    pub fn show_notice(&mut self, notice: Notice) {
        if matches!(self.overlay, Overlay::Quiz(_)) {
            self.queued_notice = Some(notice);
        } else {
            self.overlay = Overlay::Notice(notice);
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }
}
