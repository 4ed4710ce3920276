//! Help and "I'm stuck" panels

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

use super::layout::{centered_rect, panel};

const KEYS: &[(&str, &str)] = &[
    ("space / k", "Play or pause"),
    ("h / l", "Skip back / forward"),
    ("+ / -", "Volume up / down"),
    ("m", "Mute"),
    ("f", "Fullscreen"),
    (">", "Change speed"),
    ("1-9", "Jump to chapter"),
    ("n / p", "Next / previous lesson"),
    ("r", "Restart lesson"),
    ("s", "Accessibility settings"),
    ("x", "I'm stuck"),
    ("q", "Quit"),
];

/// Keyboard reference
pub fn draw_help(frame: &mut Frame, area: Rect, theme: &Theme) {
    let overlay_area = centered_rect(60, 80, area);
    frame.render_widget(Clear, overlay_area);

    let block = panel(" Help ", true, theme);
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let mut lines = vec![
        Line::from(Span::styled(
            "Watch each lesson to the end to unlock the next one.",
            Style::default().fg(theme.fg_primary),
        )),
        Line::from(""),
    ];
    for (key, description) in KEYS {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:<12}", key),
                Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
            ),
            Span::styled(*description, Style::default().fg(theme.fg_secondary)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("[Esc] Close", Style::default().fg(theme.fg_muted))));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

/// Options offered when the learner is stuck
pub fn draw_stuck(frame: &mut Frame, area: Rect, theme: &Theme) {
    let overlay_area = centered_rect(60, 50, area);
    frame.render_widget(Clear, overlay_area);

    let block = panel(" Need Help? ", true, theme);
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let option = |key: &'static str, text: &'static str| {
        Line::from(vec![
            Span::styled(
                format!("  [{}] ", key),
                Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
            ),
            Span::styled(text, Style::default().fg(theme.fg_primary)),
        ])
    };

    let lines = vec![
        Line::from(Span::styled(
            "Having trouble with this lesson? You can:",
            Style::default().fg(theme.fg_primary),
        )),
        Line::from(""),
        option("r", "Restart this lesson from the beginning"),
        option("p", "Go back to the previous lesson"),
        Line::from(""),
        Line::from(Span::styled(
            "If the video won't load, check your connection and restart the lesson.",
            Style::default().fg(theme.fg_secondary),
        )),
        Line::from(""),
        Line::from(Span::styled("[Esc] Close", Style::default().fg(theme.fg_muted))),
    ];

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}
