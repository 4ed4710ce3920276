//! Modal dialogs

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
};

use crate::app::state::Notice;
use crate::course::Prompt;
use crate::theme::Theme;

use super::layout::{centered_rect, panel};

/// Yes/No confirmation for a lesson transition
pub fn draw_confirm(frame: &mut Frame, prompt: &Prompt, yes_selected: bool, theme: &Theme) {
    let area = frame.area();
    frame.render_widget(Paragraph::new("").style(Style::default().bg(theme.bg_primary)), area);

    let overlay_area = centered_rect(50, 30, area);
    frame.render_widget(Clear, overlay_area);

    let title = match prompt {
        Prompt::Advance { .. } => " Next Lesson ",
        Prompt::Retreat { .. } => " Previous Lesson ",
        Prompt::Restart { .. } => " Restart Lesson ",
    };
    let block = panel(title, true, theme);
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let button = |text: &'static str, selected: bool| {
        let style = if selected {
            Style::default()
                .fg(theme.bg_primary)
                .bg(theme.accent_primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg_secondary).bg(theme.bg_tertiary)
        };
        Span::styled(text, style)
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(prompt.message(), Style::default().fg(theme.fg_primary))),
        Line::from(""),
        Line::from(vec![
            button(" Yes ", yes_selected),
            Span::raw("    "),
            button(" No ", !yes_selected),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "[y/n] Answer    [Tab] Switch    [Enter] Choose",
            Style::default().fg(theme.fg_muted),
        )),
    ];

    let para = Paragraph::new(lines).alignment(Alignment::Center).wrap(Wrap { trim: true });
    frame.render_widget(para, inner);
}

/// Message acknowledged with any key
pub fn draw_notice(frame: &mut Frame, area: Rect, notice: &Notice, theme: &Theme) {
    let overlay_area = centered_rect(50, 30, area);
    frame.render_widget(Clear, overlay_area);

    let block = panel(&notice.title, true, theme);
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            notice.body.as_str(),
            Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Press any key to continue", Style::default().fg(theme.fg_muted))),
    ];

    let para = Paragraph::new(lines).alignment(Alignment::Center).wrap(Wrap { trim: true });
    frame.render_widget(para, inner);
}
