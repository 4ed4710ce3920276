use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lesson_player::app::controller::{LessonController, simulated_transport};
use lesson_player::config::preferences::{ColorScheme, FontSize, PreferencesPatch, speed_label};
use lesson_player::course::Course;
use lesson_player::store::FileStore;
use lesson_player::{App, Config};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lesson-player")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Course file to load instead of the built-in course
    #[arg(long, global = true)]
    course: Option<PathBuf>,

    /// Directory for saved progress and logs
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the lessons in the course
    List,
    /// Show the current lesson and preferences
    Status,
    /// Change preferences without opening the player
    Prefs {
        /// small, medium, large or extra-large
        #[arg(long, value_parser = parse_kebab::<FontSize>)]
        font_size: Option<FontSize>,
        /// light, dark or high-contrast
        #[arg(long, value_parser = parse_kebab::<ColorScheme>)]
        theme: Option<ColorScheme>,
        /// Playback speed multiplier
        #[arg(long)]
        speed: Option<f64>,
        #[arg(long)]
        captions: Option<bool>,
        #[arg(long)]
        autoplay: Option<bool>,
    },
}

/// Parse a value by its serialized name
fn parse_kebab<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(s.to_string())).map_err(|e| e.to_string())
}

/// Log to a file in the data directory, since the TUI owns the terminal
fn init_logging(data_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory {:?}", data_dir))?;
    let file_appender = tracing_appender::rolling::never(data_dir, "lesson-player.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("LESSON_PLAYER_LOG")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| "lesson_player=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .init();

    Ok(guard)
}

fn load_course(path: Option<&Path>) -> Result<Course> {
    match path {
        Some(path) => Course::from_json_file(path)
            .with_context(|| format!("Failed to load course from {:?}", path)),
        None => Ok(Course::builtin()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => Config::data_dir()?,
    };
    let _guard = init_logging(&data_dir)?;

    let course = load_course(cli.course.as_deref().or(config.course_path.as_deref()))?;
    tracing::info!("Loaded course '{}' with {} lessons", course.title, course.len());

    let store = FileStore::new(&data_dir);
    let mut controller =
        LessonController::new(course, store, simulated_transport, config.stall_timeout());

    match cli.command {
        Some(Commands::List) => {
            println!("{}", controller.course().title);
            for lesson in controller.course().lessons() {
                let marker = if controller.completion().is_completed(lesson.id) {
                    "\u{2713}"
                } else if lesson.id == controller.sequencer().current() {
                    "\u{25B8}"
                } else {
                    " "
                };
                println!("  {} {}. {}", marker, lesson.id, lesson.title);
            }
        }
        Some(Commands::Status) => {
            let sequencer = controller.sequencer();
            let prefs = controller.preferences();
            println!(
                "Lesson {} of {}: {}",
                sequencer.current(),
                sequencer.lesson_count(),
                controller.current_lesson().title
            );
            println!(
                "Completed: {} of {} lessons",
                controller.completion().completed_count(),
                controller.course().len()
            );
            println!("Text size: {}", prefs.font_size.label());
            println!("Theme: {}", prefs.theme.label());
            println!("Speed: {}", speed_label(prefs.playback_speed));
            println!("Captions: {}", if prefs.captions_enabled { "on" } else { "off" });
            println!("Auto-play: {}", if prefs.auto_play { "on" } else { "off" });
        }
        Some(Commands::Prefs { font_size, theme, speed, captions, autoplay }) => {
            let patch = PreferencesPatch {
                font_size,
                theme,
                playback_speed: speed,
                captions_enabled: captions,
                auto_play: autoplay,
            };
            if patch.is_empty() {
                println!("Nothing to change");
            } else {
                controller.update_preferences(patch);
                println!("Preferences saved");
            }
        }
        None => {
            // Launch TUI
            let mut app = App::new(config, controller)?;
            app.run().await?;
        }
    }

    Ok(())
}
