//! Course content and lesson sequencing

pub mod catalog;
pub mod model;
pub mod sequencer;

pub use catalog::{Course, CourseError};
pub use model::{Chapter, Lesson, LessonId, Quiz};
pub use sequencer::{ConfirmationPort, Prompt, Sequencer, Transition};
