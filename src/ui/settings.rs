//! Accessibility settings panel

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
};

use crate::app::state::{SettingRow, SettingsState};
use crate::config::preferences::UserPreferences;
use crate::theme::Theme;

use super::layout::{centered_rect, panel};

pub fn draw(
    frame: &mut Frame,
    area: Rect,
    prefs: &UserPreferences,
    settings: &SettingsState,
    theme: &Theme,
) {
    let overlay_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, overlay_area);

    let block = panel(" Accessibility Settings ", true, theme);
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let selected = settings.row();
    let mut lines = vec![Line::from("")];

    for row in SettingRow::ALL {
        let is_selected = row == selected;
        let label_style = if is_selected {
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg_primary)
        };
        let cursor = if is_selected { "\u{25B8} " } else { "  " }; // ▸

        lines.push(Line::from(vec![
            Span::styled(cursor, label_style),
            Span::styled(format!("{:<18}", row.label()), label_style),
            Span::styled(row.value(prefs), Style::default().fg(theme.info)),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    {}", row.help()),
            Style::default().fg(theme.fg_muted),
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "[j/k] Move    [Enter] Change    [Esc] Close",
        Style::default().fg(theme.fg_muted),
    )));

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}
