use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::{
    ui::{
        state::ConfirmAction,
        traits::{Action, View},
        view_model::ViewModel,
    },
    util::colors,
};

pub struct ConfirmView {
    action: ConfirmAction,
    prompt: String,
}

impl ConfirmView {
    pub fn new(action: ConfirmAction, prompt: String) -> Self {
        Self { action, prompt }
    }
}

impl View for ConfirmView {
    fn render(&mut self, f: &mut Frame, area: Rect, vm: &ViewModel) {
        let palette = colors::palette(vm.theme);
        let [row] = Layout::vertical([Constraint::Length(5)])
            .flex(Flex::Center)
            .areas(area);
        let [dialog] = Layout::horizontal([Constraint::Max(48)])
            .flex(Flex::Center)
            .areas(row);

        f.render_widget(Clear, dialog);
        f.render_widget(
            Paragraph::new(vec![
                Line::from(self.prompt.as_str()).centered(),
                Line::default(),
                Line::from("y confirm · n cancel").centered(),
            ])
            .style(Style::default().fg(palette.text).bg(palette.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_set(border::ROUNDED)
                    .border_style(
                        Style::default()
                            .fg(palette.danger)
                            .add_modifier(Modifier::BOLD),
                    ),
            ),
            dialog,
        );
    }

    fn handle_input(&mut self, key: KeyEvent, _vm: &ViewModel) -> Option<Action> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => Some(Action::Confirmed(self.action)),
            KeyCode::Char('n') | KeyCode::Esc => Some(Action::Close),
            _ => Some(Action::None),
        }
    }
}
