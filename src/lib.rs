//! Lesson Player - an accessible terminal video lesson player
//!
//! Walks a learner through a course of patient-education lessons one video
//! at a time. Chapters and quiz checkpoints follow the playhead, a lesson
//! counts as complete once most of it has been watched, and the next lesson
//! unlocks only after the current one is done. Preferences and progress are
//! kept in a small key-value store between sessions.

pub mod app;
pub mod config;
pub mod course;
pub mod playback;
pub mod progress;
pub mod store;
pub mod theme;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use theme::Theme;
