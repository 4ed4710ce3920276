//! Lesson catalog loading and validation

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::model::{Chapter, Lesson, LessonId, Quiz};

/// Errors raised while loading or validating a course
#[derive(Debug, Error)]
pub enum CourseError {
    /// The course has no lessons
    #[error("Course contains no lessons")]
    Empty,

    /// Lesson ids must run 1, 2, 3, ...
    #[error("Lesson ids must be sequential: expected {expected}, found {found}")]
    NonSequentialId { expected: LessonId, found: LessonId },

    /// Chapter start is not before its end
    #[error("Lesson {lesson}: chapter '{chapter}' must start before it ends")]
    InvalidChapterRange { lesson: LessonId, chapter: String },

    /// Two chapters overlap or are out of order
    #[error("Lesson {lesson}: chapter '{second}' overlaps or precedes '{first}'")]
    OverlappingChapters { lesson: LessonId, first: String, second: String },

    /// Chapter id reused within a lesson
    #[error("Lesson {lesson}: duplicate chapter id '{chapter}'")]
    DuplicateChapterId { lesson: LessonId, chapter: String },

    /// Quiz answer index is out of range
    #[error("Lesson {lesson}: quiz '{quiz}' has no option at index {index}")]
    InvalidQuizAnswer { lesson: LessonId, quiz: String, index: usize },

    /// Failed to read the course file
    #[error("Failed to read course file: {0}")]
    Io(#[from] std::io::Error),

    /// Course file is not valid JSON
    #[error("Failed to parse course file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Course JSON as written on disk, before validation
#[derive(Deserialize)]
struct CourseFile {
    title: String,
    lessons: Vec<Lesson>,
}

/// The ordered, validated list of lessons
#[derive(Debug, Clone)]
pub struct Course {
    /// Course title shown in the breadcrumb
    pub title: String,
    lessons: Vec<Lesson>,
}

impl Course {
    /// Build a course, validating lesson and chapter invariants
    pub fn new(title: impl Into<String>, lessons: Vec<Lesson>) -> Result<Self, CourseError> {
        let course = Self { title: title.into(), lessons };
        course.validate()?;
        Ok(course)
    }

    /// Load a course from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self, CourseError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse a course from JSON text
    pub fn from_json(json: &str) -> Result<Self, CourseError> {
        let file: CourseFile = serde_json::from_str(json)?;
        Self::new(file.title, file.lessons)
    }

    fn validate(&self) -> Result<(), CourseError> {
        if self.lessons.is_empty() {
            return Err(CourseError::Empty);
        }

        for (index, lesson) in self.lessons.iter().enumerate() {
            let expected = index as LessonId + 1;
            if lesson.id != expected {
                return Err(CourseError::NonSequentialId { expected, found: lesson.id });
            }
            validate_chapters(lesson)?;
            validate_quizzes(lesson)?;
        }

        Ok(())
    }

    /// All lessons in order
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    /// Number of lessons
    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    /// Whether the course has no lessons (never true for a validated course)
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    /// Get a lesson by id
    pub fn lesson(&self, id: LessonId) -> Option<&Lesson> {
        id.checked_sub(1).and_then(|i| self.lessons.get(i as usize))
    }

    /// The built-in diabetes self-management course
    pub fn builtin() -> Self {
        Self { title: "Metabolic Disease Management".to_string(), lessons: builtin_lessons() }
    }
}

fn validate_chapters(lesson: &Lesson) -> Result<(), CourseError> {
    let mut seen = HashSet::new();
    let mut previous: Option<&Chapter> = None;

    for chapter in &lesson.chapters {
        if !(chapter.start_time < chapter.end_time) {
            return Err(CourseError::InvalidChapterRange {
                lesson: lesson.id,
                chapter: chapter.id.clone(),
            });
        }
        if !seen.insert(chapter.id.as_str()) {
            return Err(CourseError::DuplicateChapterId {
                lesson: lesson.id,
                chapter: chapter.id.clone(),
            });
        }
        // Adjacent chapters may share a boundary
        if let Some(prev) = previous {
            if chapter.start_time < prev.end_time {
                return Err(CourseError::OverlappingChapters {
                    lesson: lesson.id,
                    first: prev.id.clone(),
                    second: chapter.id.clone(),
                });
            }
        }
        previous = Some(chapter);
    }

    Ok(())
}

fn validate_quizzes(lesson: &Lesson) -> Result<(), CourseError> {
    for quiz in &lesson.quizzes {
        if quiz.correct_answer >= quiz.options.len() {
            return Err(CourseError::InvalidQuizAnswer {
                lesson: lesson.id,
                quiz: quiz.id.clone(),
                index: quiz.correct_answer,
            });
        }
    }
    Ok(())
}

const SAMPLE_VIDEOS: &str = "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample";

fn builtin_lessons() -> Vec<Lesson> {
    vec![
        Lesson {
            id: 1,
            title: "Understanding Diabetes".to_string(),
            description: "Learn the fundamentals of diabetes management and how to take \
                          control of your health."
                .to_string(),
            video_url: format!("{SAMPLE_VIDEOS}/BigBuckBunny.mp4"),
            chapters: vec![
                Chapter::new("ch1-1", "What is Diabetes?", 0.0, 90.0)
                    .with_description("Understanding what diabetes means for your health"),
                Chapter::new("ch1-2", "Types of Diabetes", 90.0, 180.0)
                    .with_description("Learning about Type 1, Type 2, and gestational diabetes"),
                Chapter::new("ch1-3", "Why Management Matters", 180.0, 300.0)
                    .with_description("The importance of daily diabetes care for your wellbeing"),
            ],
            quizzes: vec![Quiz {
                id: "q1-1".to_string(),
                question: "Which hormone helps move sugar from the blood into your cells?"
                    .to_string(),
                options: vec![
                    "Insulin".to_string(),
                    "Adrenaline".to_string(),
                    "Melatonin".to_string(),
                ],
                correct_answer: 0,
                trigger_time: 175.0,
                explanation: Some(
                    "Insulin acts like a key that lets glucose into your cells.".to_string(),
                ),
            }],
            duration_seconds: None,
        },
        Lesson {
            id: 2,
            title: "Blood Sugar Monitoring".to_string(),
            description: "Master the essential skill of checking and tracking your blood \
                          glucose levels."
                .to_string(),
            video_url: format!("{SAMPLE_VIDEOS}/ElephantsDream.mp4"),
            chapters: vec![
                Chapter::new("ch2-1", "Using a Blood Glucose Meter", 0.0, 120.0)
                    .with_description("Step-by-step guide to testing your blood sugar"),
                Chapter::new("ch2-2", "When to Test", 120.0, 210.0)
                    .with_description("Understanding the best times to check your levels"),
                Chapter::new("ch2-3", "Recording Your Results", 210.0, 360.0)
                    .with_description("Keeping track of your readings for better health"),
            ],
            quizzes: vec![Quiz {
                id: "q2-1".to_string(),
                question: "Why is it helpful to write down your readings?".to_string(),
                options: vec![
                    "It shows patterns you and your care team can act on".to_string(),
                    "It makes the meter more accurate".to_string(),
                    "It is only needed once a year".to_string(),
                ],
                correct_answer: 0,
                trigger_time: 300.0,
                explanation: Some(
                    "A log of readings helps spot trends over days and weeks.".to_string(),
                ),
            }],
            duration_seconds: None,
        },
        Lesson {
            id: 3,
            title: "Healthy Eating for Diabetes".to_string(),
            description: "Discover delicious and nutritious meal planning strategies for \
                          better blood sugar control."
                .to_string(),
            video_url: format!("{SAMPLE_VIDEOS}/ForBiggerBlazes.mp4"),
            chapters: vec![
                Chapter::new("ch3-1", "The Diabetes Plate Method", 0.0, 120.0)
                    .with_description("Simple portion control using the plate method"),
                Chapter::new("ch3-2", "Smart Carbohydrate Choices", 120.0, 240.0)
                    .with_description("Choosing the right carbs for stable blood sugar"),
                Chapter::new("ch3-3", "Meal Planning Tips", 240.0, 360.0)
                    .with_description("Practical strategies for planning healthy meals"),
            ],
            quizzes: vec![Quiz {
                id: "q3-1".to_string(),
                question: "With the plate method, how much of the plate is non-starchy \
                           vegetables?"
                    .to_string(),
                options: vec!["A quarter".to_string(), "Half".to_string(), "None".to_string()],
                correct_answer: 1,
                trigger_time: 115.0,
                explanation: Some("Fill half the plate with non-starchy vegetables.".to_string()),
            }],
            duration_seconds: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(id: LessonId, chapters: Vec<Chapter>) -> Lesson {
        Lesson {
            id,
            title: format!("Lesson {id}"),
            description: String::new(),
            video_url: String::new(),
            chapters,
            quizzes: Vec::new(),
            duration_seconds: None,
        }
    }

    #[test]
    fn builtin_course_is_valid() {
        let course = Course::builtin();
        assert!(course.validate().is_ok());
        assert_eq!(course.len(), 3);
        assert_eq!(course.lesson(1).unwrap().chapters[0].id, "ch1-1");
    }

    #[test]
    fn lesson_lookup_is_one_indexed() {
        let course = Course::builtin();
        assert!(course.lesson(0).is_none());
        assert_eq!(course.lesson(3).unwrap().title, "Healthy Eating for Diabetes");
        assert!(course.lesson(4).is_none());
    }

    #[test]
    fn rejects_empty_course() {
        assert!(matches!(Course::new("Empty", Vec::new()), Err(CourseError::Empty)));
    }

    #[test]
    fn rejects_non_sequential_ids() {
        let result = Course::new("Gap", vec![lesson(1, Vec::new()), lesson(3, Vec::new())]);
        assert!(matches!(result, Err(CourseError::NonSequentialId { expected: 2, found: 3 })));
    }

    #[test]
    fn rejects_inverted_chapter() {
        let result = Course::new("Bad", vec![lesson(1, vec![Chapter::new("a", "A", 50.0, 10.0)])]);
        assert!(matches!(result, Err(CourseError::InvalidChapterRange { .. })));
    }

    #[test]
    fn rejects_overlapping_chapters() {
        let chapters =
            vec![Chapter::new("a", "A", 0.0, 100.0), Chapter::new("b", "B", 90.0, 180.0)];
        let result = Course::new("Overlap", vec![lesson(1, chapters)]);
        assert!(matches!(result, Err(CourseError::OverlappingChapters { .. })));
    }

    #[test]
    fn accepts_shared_boundaries_and_gaps() {
        let chapters = vec![
            Chapter::new("a", "A", 0.0, 90.0),
            Chapter::new("b", "B", 90.0, 120.0),
            Chapter::new("c", "C", 150.0, 200.0),
        ];
        assert!(Course::new("Ok", vec![lesson(1, chapters)]).is_ok());
    }

    #[test]
    fn rejects_duplicate_chapter_ids() {
        let chapters = vec![Chapter::new("a", "A", 0.0, 10.0), Chapter::new("a", "A2", 10.0, 20.0)];
        let result = Course::new("Dup", vec![lesson(1, chapters)]);
        assert!(matches!(result, Err(CourseError::DuplicateChapterId { .. })));
    }

    #[test]
    fn rejects_quiz_with_missing_answer() {
        let mut bad = lesson(1, Vec::new());
        bad.quizzes.push(Quiz {
            id: "q".into(),
            question: "?".into(),
            options: vec!["only".into()],
            correct_answer: 2,
            trigger_time: 5.0,
            explanation: None,
        });
        let result = Course::new("Quiz", vec![bad]);
        assert!(matches!(result, Err(CourseError::InvalidQuizAnswer { index: 2, .. })));
    }

    #[test]
    fn parses_course_json() {
        let json = r#"{
            "title": "Mini",
            "lessons": [
                {"id": 1, "title": "One", "description": "", "videoUrl": "a.mp4",
                 "chapters": [{"id": "c1", "title": "C1", "startTime": 0, "endTime": 30}]}
            ]
        }"#;
        let course = Course::from_json(json).unwrap();
        assert_eq!(course.title, "Mini");
        assert_eq!(course.len(), 1);
        assert_eq!(course.lesson(1).map(|l| l.title.as_str()), Some("One"));
    }

    #[test]
    fn from_json_validates_lessons() {
        let empty = r#"{"title": "Empty", "lessons": []}"#;
        assert!(matches!(Course::from_json(empty), Err(CourseError::Empty)));

        let gap = r#"{
            "title": "Gap",
            "lessons": [
                {"id": 2, "title": "Two", "description": "", "videoUrl": "b.mp4", "chapters": []}
            ]
        }"#;
        assert!(matches!(
            Course::from_json(gap),
            Err(CourseError::NonSequentialId { expected: 1, found: 2 })
        ));
    }

    #[test]
    fn from_json_surfaces_parse_errors() {
        assert!(matches!(Course::from_json("not json"), Err(CourseError::Json(_))));
    }
}
