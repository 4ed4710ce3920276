//! Lesson screen: course breadcrumb, video panel, chapters and navigation

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Wrap},
};

use crate::app::controller::LessonController;
use crate::app::state::AppState;
use crate::course::Lesson;
use crate::playback::{ReadyState, format_time};
use crate::progress::{active_chapter, chapter_progress, percentage};
use crate::store::KeyValueStore;
use crate::theme::Theme;

use super::layout::panel;

/// Height of the navigation footer in lines
pub const FOOTER_HEIGHT: u16 = 3;

const COMPLETE_TO_PROCEED: &str = "Please complete this lesson to proceed to the next one.";

/// Draw the full lesson screen
pub fn draw<S: KeyValueStore>(
    frame: &mut Frame,
    area: Rect,
    controller: &LessonController<S>,
    state: &AppState,
    theme: &Theme,
) {
    let fullscreen = controller.session().snapshot().is_fullscreen;

    if fullscreen {
        let [video, gauge, footer] =
            Layout::vertical([Constraint::Min(5), Constraint::Length(1), Constraint::Length(1)])
                .areas(area);
        draw_video(frame, video, controller, theme);
        draw_gauge(frame, gauge, controller, theme);
        draw_hint(frame, footer, "[f] exit fullscreen  [space] play/pause  [q] quit", theme);
        return;
    }

    let [header, title, body, gauge, footer] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Min(8),
        Constraint::Length(1),
        Constraint::Length(FOOTER_HEIGHT),
    ])
    .areas(area);

    draw_breadcrumb(frame, header, controller, theme);
    draw_title(frame, title, controller.current_lesson(), theme);

    let [video, chapters] =
        Layout::horizontal([Constraint::Percentage(62), Constraint::Percentage(38)]).areas(body);
    draw_video(frame, video, controller, theme);
    draw_chapters(frame, chapters, controller, theme);

    draw_gauge(frame, gauge, controller, theme);
    draw_footer(frame, footer, controller, state, theme);
}

/// "Lesson k of N" with one dot per lesson
fn draw_breadcrumb<S: KeyValueStore>(
    frame: &mut Frame,
    area: Rect,
    controller: &LessonController<S>,
    theme: &Theme,
) {
    let sequencer = controller.sequencer();
    let current = sequencer.current();
    let total = sequencer.lesson_count();

    let mut spans = vec![
        Span::styled(
            format!(" {} ", controller.course().title),
            Style::default().fg(theme.fg_muted),
        ),
        Span::styled("\u{203A} ", Style::default().fg(theme.fg_muted)), // ›
        Span::styled(
            format!("Lesson {} of {}  ", current, total),
            Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
        ),
    ];

    for id in 1..=total {
        let (glyph, color) = if id == current {
            ("\u{25CF}", theme.accent_primary) // ●
        } else if controller.completion().is_completed(id) {
            ("\u{25CF}", theme.success)
        } else {
            ("\u{25CB}", theme.fg_muted) // ○
        };
        spans.push(Span::styled(format!("{} ", glyph), Style::default().fg(color)));
    }

    let summary = Line::from(Span::styled(
        format!(" Progress: {} of {} lessons completed", current - 1, total),
        Style::default().fg(theme.fg_secondary),
    ));

    let para = Paragraph::new(vec![Line::from(spans), summary])
        .style(Style::default().bg(theme.bg_primary));
    frame.render_widget(para, area);
}

fn draw_title(frame: &mut Frame, area: Rect, lesson: &Lesson, theme: &Theme) {
    let lines = vec![
        Line::from(Span::styled(
            format!(" {}", lesson.title),
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(" {}", lesson.description),
            Style::default().fg(theme.fg_secondary),
        )),
    ];

    let para = Paragraph::new(lines)
        .style(Style::default().bg(theme.bg_primary))
        .wrap(Wrap { trim: false });
    frame.render_widget(para, area);
}

fn draw_video<S: KeyValueStore>(
    frame: &mut Frame,
    area: Rect,
    controller: &LessonController<S>,
    theme: &Theme,
) {
    let session = controller.session();
    let block = panel(" Video ", true, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::from("")];

    match session.ready_state() {
        ReadyState::Loading => {
            lines.push(Line::from(Span::styled(
                "Loading video...",
                Style::default().fg(theme.fg_muted),
            )));
        }
        ReadyState::Stalled => {
            lines.push(Line::from(Span::styled(
                "The video is taking a long time to load.",
                Style::default().fg(theme.warning).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Press [x] for help, or [r] to restart the lesson.",
                Style::default().fg(theme.fg_secondary),
            )));
        }
        ReadyState::Ready => {
            let snapshot = session.snapshot();

            let (glyph, label) = if snapshot.is_playing {
                ("\u{25B6}", "Playing") // ▶
            } else {
                ("\u{275A}\u{275A}", "Paused") // ❚❚
            };
            lines.push(Line::from(Span::styled(
                format!("{}  {}", glyph, label),
                Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!(
                    "{} / {}",
                    format_time(snapshot.current_time),
                    format_time(snapshot.duration)
                ),
                Style::default().fg(theme.fg_primary),
            )));

            let volume = if snapshot.is_muted {
                "Muted".to_string()
            } else {
                format!("Volume {:.0}%", snapshot.volume * 100.0)
            };
            lines.push(Line::from(vec![
                Span::styled(volume, Style::default().fg(theme.fg_secondary)),
                Span::styled("   ", Style::default()),
                Span::styled(
                    format!("Speed {}x", snapshot.playback_rate),
                    Style::default().fg(theme.fg_secondary),
                ),
                Span::styled("   ", Style::default()),
                Span::styled(
                    format!("Buffered {}", format_time(snapshot.buffered_end())),
                    Style::default().fg(theme.fg_muted),
                ),
            ]));

            if let Some(caption) = caption(controller) {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("[CC] {}", caption),
                    Style::default().fg(theme.fg_primary).bg(theme.bg_tertiary),
                )));
            }
        }
    }

    let para = Paragraph::new(lines).alignment(Alignment::Center).wrap(Wrap { trim: true });
    frame.render_widget(para, inner);
}

/// Caption text for the current position, when captions are on
fn caption<S: KeyValueStore>(controller: &LessonController<S>) -> Option<&str> {
    if !controller.preferences().captions_enabled {
        return None;
    }
    let t = controller.session().snapshot().current_time;
    active_chapter(t, &controller.current_lesson().chapters)
        .and_then(|chapter| chapter.description.as_deref())
        .filter(|text| !text.is_empty())
}

fn draw_chapters<S: KeyValueStore>(
    frame: &mut Frame,
    area: Rect,
    controller: &LessonController<S>,
    theme: &Theme,
) {
    let block = panel(" Chapters ", false, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let session = controller.session();
    let t = session.snapshot().current_time;
    let spacing = controller.preferences().font_size.row_spacing();

    let mut lines = Vec::new();
    for (i, chapter) in controller.current_lesson().chapters.iter().enumerate() {
        let is_active = session.active_chapter() == Some(chapter.id.as_str());
        let visited = session.progress().has_chapter(&chapter.id);

        let marker = if visited {
            Span::styled("\u{2713} ", Style::default().fg(theme.success)) // ✓
        } else {
            Span::styled("  ", Style::default())
        };
        let title_style = if is_active {
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg_primary)
        };

        lines.push(Line::from(vec![
            marker,
            Span::styled(format!("{}. {}", i + 1, chapter.title), title_style),
        ]));

        let mut detail = format!(
            "   {} - {}",
            format_time(chapter.start_time),
            format_time(chapter.end_time)
        );
        if is_active {
            detail.push_str(&format!("  {:.0}%", chapter_progress(t, chapter)));
        }
        lines.push(Line::from(Span::styled(detail, Style::default().fg(theme.fg_muted))));

        for _ in 0..spacing {
            lines.push(Line::from(""));
        }
    }

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}

fn draw_gauge<S: KeyValueStore>(
    frame: &mut Frame,
    area: Rect,
    controller: &LessonController<S>,
    theme: &Theme,
) {
    let snapshot = controller.session().snapshot();
    let watched = percentage(snapshot.current_time, snapshot.duration);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(theme.accent_primary).bg(theme.bg_tertiary))
        .ratio(watched / 100.0)
        .label(format!("{:.0}% watched", watched));
    frame.render_widget(gauge, area);
}

/// Previous / Next buttons with the status line between them
fn draw_footer<S: KeyValueStore>(
    frame: &mut Frame,
    area: Rect,
    controller: &LessonController<S>,
    state: &AppState,
    theme: &Theme,
) {
    if area.height < FOOTER_HEIGHT {
        return;
    }
    let sequencer = controller.sequencer();

    // Draw separator line above buttons
    let separator = Line::from(Span::styled(
        "\u{2500}".repeat(area.width as usize), // ─
        Style::default().fg(theme.border),
    ));
    frame.render_widget(Paragraph::new(separator), Rect::new(area.x, area.y, area.width, 1));

    let row = Rect::new(area.x, area.y + 1, area.width, 1);
    let [left, middle, right] = Layout::horizontal([
        Constraint::Length(18),
        Constraint::Min(10),
        Constraint::Length(22),
    ])
    .areas(row);

    let previous = create_button(" \u{2190} Previous [p] ", sequencer.can_retreat(), theme); // ←
    frame.render_widget(Paragraph::new(previous), left);

    let next = if sequencer.has_next() {
        create_button(" Next Lesson [n] \u{2192} ", sequencer.can_advance(), theme) // →
    } else {
        Line::from(Span::styled(
            " Course Complete ",
            Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
        ))
    };
    frame.render_widget(Paragraph::new(next).alignment(Alignment::Right), right);

    let status = match &state.status {
        Some(message) => Span::styled(message.as_str(), Style::default().fg(theme.info)),
        None if sequencer.has_next() && !sequencer.is_video_completed() => {
            Span::styled(COMPLETE_TO_PROCEED, Style::default().fg(theme.warning))
        }
        None => Span::raw(""),
    };
    frame.render_widget(Paragraph::new(Line::from(status)).alignment(Alignment::Center), middle);

    draw_hint(
        frame,
        Rect::new(area.x, area.y + 2, area.width, 1),
        "[space] play  [h/l] seek  [1-9] chapter  [s] settings  [?] help  [x] stuck  [q] quit",
        theme,
    );
}

fn draw_hint(frame: &mut Frame, area: Rect, hint: &str, theme: &Theme) {
    let para = Paragraph::new(Span::styled(hint, Style::default().fg(theme.fg_muted)))
        .alignment(Alignment::Center);
    frame.render_widget(para, area);
}

/// Create a styled button, dimmed when disabled
fn create_button<'a>(text: &'a str, enabled: bool, theme: &Theme) -> Line<'a> {
    let style = if enabled {
        Style::default().fg(theme.bg_primary).bg(theme.accent_primary).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.fg_muted).bg(theme.bg_tertiary)
    };

    Line::from(vec![Span::styled(text, style)])
}
