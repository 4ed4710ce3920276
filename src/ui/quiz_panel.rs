//! Quiz panel overlay component

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
};

use crate::app::state::QuizState;
use crate::course::Quiz;
use crate::theme::Theme;

use super::layout::{centered_rect, panel};

/// Draw the quiz panel as a centered overlay
pub fn draw(frame: &mut Frame, area: Rect, quiz: Option<&Quiz>, state: &QuizState, theme: &Theme) {
    // Calculate centered overlay area (70% width, 70% height)
    let overlay_area = centered_rect(70, 70, area);

    // Clear the background area
    frame.render_widget(Clear, overlay_area);

    let title = if state.outcome.is_some() { " Quiz Result " } else { " Quick Check " };
    let block = panel(title, true, theme);
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    match (quiz, &state.outcome) {
        (_, Some(outcome)) => {
            draw_result(frame, inner, outcome.correct, outcome.explanation.as_deref(), theme)
        }
        (Some(quiz), None) => draw_question(frame, inner, quiz, state, theme),
        (None, None) => {}
    }
}

/// Draw the answer feedback
fn draw_result(
    frame: &mut Frame,
    area: Rect,
    correct: bool,
    explanation: Option<&str>,
    theme: &Theme,
) {
    let mut lines = vec![Line::from(""), Line::from("")];

    if correct {
        lines.push(Line::from(Span::styled(
            "\u{2713} Correct!", // ✓
            Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "\u{2717} Not quite", // ✗
            Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
        )));
    }

    if let Some(explanation) = explanation {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(explanation, Style::default().fg(theme.fg_secondary))));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Enter] Continue watching",
        Style::default().fg(theme.fg_muted),
    )));

    let para = Paragraph::new(lines).alignment(Alignment::Center).wrap(Wrap { trim: true });
    frame.render_widget(para, area);
}

/// Draw the question and its options
fn draw_question(frame: &mut Frame, area: Rect, quiz: &Quiz, state: &QuizState, theme: &Theme) {
    let mut lines = vec![];

    lines.push(Line::from(Span::styled(
        &quiz.question,
        Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(""));

    // Options
    for (i, option) in quiz.options.iter().enumerate() {
        let is_selected = i == state.selected;
        let prefix = if is_selected { "\u{25CF}" } else { "\u{25CB}" }; // ● or ○
        let letter = (b'A' + i as u8) as char;

        let style = if is_selected {
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg_secondary)
        };

        lines.push(Line::from(Span::styled(format!("  {} {}) {}", prefix, letter, option), style)));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(""));

    // Hint
    lines.push(Line::from(Span::styled(
        "[j/k] Select    [Enter] Answer    [Esc] Skip",
        Style::default().fg(theme.fg_muted),
    )));

    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(para, area);
}
