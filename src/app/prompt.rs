//! Terminal confirmation dialog
//!
//! Blocks the event loop until the learner answers, the same way a
//! browser `confirm()` would.

use std::io::Stdout;

use async_trait::async_trait;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::course::{ConfirmationPort, Prompt};
use crate::theme::Theme;
use crate::ui;

/// Asks yes/no questions in a modal dialog
pub struct TerminalPrompt<'a> {
    terminal: &'a mut Terminal<CrosstermBackend<Stdout>>,
    theme: Theme,
}

impl<'a> TerminalPrompt<'a> {
    pub fn new(terminal: &'a mut Terminal<CrosstermBackend<Stdout>>, theme: Theme) -> Self {
        Self { terminal, theme }
    }
}

/// Answer implied by a key press, if any
fn answer_for(key: KeyCode, yes_selected: bool) -> Option<bool> {
    match key {
        KeyCode::Char('y') | KeyCode::Char('Y') => Some(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(false),
        KeyCode::Enter => Some(yes_selected),
        _ => None,
    }
}

#[async_trait]
impl ConfirmationPort for TerminalPrompt<'_> {
    async fn confirm(&mut self, prompt: &Prompt) -> bool {
        let mut yes_selected = true;

        loop {
            let theme = &self.theme;
            let drawn = self
                .terminal
                .draw(|frame| ui::dialog::draw_confirm(frame, prompt, yes_selected, theme));
            if let Err(e) = drawn {
                tracing::error!("Failed to draw confirmation dialog: {}", e);
                return false;
            }

            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if let Some(answer) = answer_for(key.code, yes_selected) {
                        tracing::debug!("{:?} answered {}", prompt, answer);
                        return answer;
                    }
                    if matches!(key.code, KeyCode::Left | KeyCode::Right | KeyCode::Tab) {
                        yes_selected = !yes_selected;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::error!("Failed to read key: {}", e);
                    return false;
                }
            }
        }
    }
}
