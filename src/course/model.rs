//! Content model for lessons
//!
//! Lessons are static configuration data: they are loaded once at startup
//! and never mutated afterwards. Field names serialize in camelCase so a
//! course file can be written by hand alongside the web tooling that
//! produces the videos.

use serde::{Deserialize, Serialize};

/// Lesson identifier (1-indexed, sequential)
pub type LessonId = u32;

/// A single lesson: one video with its chapters and quizzes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    /// Position in the course, starting at 1
    pub id: LessonId,
    /// Display title
    pub title: String,
    /// Short summary shown under the title
    pub description: String,
    /// Location of the video source
    pub video_url: String,
    /// Chapters in playback order
    #[serde(default)]
    pub chapters: Vec<Chapter>,
    /// Quizzes in trigger order
    #[serde(default)]
    pub quizzes: Vec<Quiz>,
    /// Known video length in seconds, if the source doesn't report one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
}

impl Lesson {
    /// Expected media duration.
    ///
    /// Falls back to the end of the last chapter. `None` means the media
    /// length can't be determined before the source reports it.
    pub fn expected_duration(&self) -> Option<f64> {
        self.duration_seconds.or_else(|| self.chapters.last().map(|c| c.end_time))
    }

    /// Find a chapter by id
    pub fn chapter(&self, id: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.id == id)
    }

    /// Find a quiz by id
    pub fn quiz(&self, id: &str) -> Option<&Quiz> {
        self.quizzes.iter().find(|q| q.id == id)
    }
}

/// A named, time-bounded segment of a lesson video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: String,
    pub title: String,
    /// Start offset in seconds
    pub start_time: f64,
    /// End offset in seconds (inclusive)
    pub end_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Chapter {
    /// Create a chapter without a description
    pub fn new(id: impl Into<String>, title: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start_time: start,
            end_time: end,
            description: None,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Length of the chapter in seconds
    pub fn length(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Whether `t` falls inside the chapter (both bounds inclusive)
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start_time && t <= self.end_time
    }
}

/// A multiple-choice question shown at a point in the video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`
    pub correct_answer: usize,
    /// Playback position (seconds) at which the quiz is due
    pub trigger_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Quiz {
    /// Whether the given option index is the correct answer
    pub fn is_correct(&self, answer: usize) -> bool {
        answer == self.correct_answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(chapters: Vec<Chapter>, duration: Option<f64>) -> Lesson {
        Lesson {
            id: 1,
            title: "Test".into(),
            description: String::new(),
            video_url: "file://video.mp4".into(),
            chapters,
            quizzes: Vec::new(),
            duration_seconds: duration,
        }
    }

    #[test]
    fn expected_duration_prefers_explicit_value() {
        let lesson = lesson(vec![Chapter::new("a", "A", 0.0, 90.0)], Some(120.0));
        assert_eq!(lesson.expected_duration(), Some(120.0));
    }

    #[test]
    fn expected_duration_falls_back_to_last_chapter() {
        let lesson = lesson(
            vec![Chapter::new("a", "A", 0.0, 90.0), Chapter::new("b", "B", 90.0, 180.0)],
            None,
        );
        assert_eq!(lesson.expected_duration(), Some(180.0));
    }

    #[test]
    fn expected_duration_unknown_without_chapters() {
        assert_eq!(lesson(Vec::new(), None).expected_duration(), None);
    }

    #[test]
    fn chapter_bounds_are_inclusive() {
        let chapter = Chapter::new("a", "A", 10.0, 20.0);
        assert!(chapter.contains(10.0));
        assert!(chapter.contains(20.0));
        assert!(!chapter.contains(20.5));
    }

    #[test]
    fn lesson_deserializes_from_camel_case() {
        let json = r#"{
            "id": 1,
            "title": "Understanding Diabetes",
            "description": "Basics",
            "videoUrl": "https://example.com/a.mp4",
            "chapters": [
                {"id": "ch1-1", "title": "What is Diabetes?", "startTime": 0, "endTime": 90}
            ]
        }"#;
        let lesson: Lesson = serde_json::from_str(json).unwrap();
        assert_eq!(lesson.video_url, "https://example.com/a.mp4");
        assert_eq!(lesson.chapters[0].end_time, 90.0);
        assert!(lesson.quizzes.is_empty());
    }
}
