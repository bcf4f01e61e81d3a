use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::{
    store::Platform,
    ui::{
        components::field::TextField,
        state::ConfirmAction,
        traits::{Action, View},
        view_model::{NO_LINKS, ViewModel},
    },
    util::colors,
};

pub struct SocialView {
    list_state: ListState,
    platform: Platform,
    url: TextField,
    editing: bool,
}

impl Default for SocialView {
    fn default() -> Self {
        Self {
            list_state: ListState::default(),
            platform: Platform::Instagram,
            url: TextField::new("URL"),
            editing: false,
        }
    }
}

impl SocialView {
    fn selected(&self, len: usize) -> Option<usize> {
        self.list_state.selected().filter(|i| *i < len)
    }
}

impl View for SocialView {
    fn render(&mut self, f: &mut Frame, area: Rect, vm: &ViewModel) {
        let palette = colors::palette(vm.theme);
        let block = Block::default()
            .title(" Social links ")
            .title_bottom(" enter open · d delete · a add · ←/→ platform · esc close ")
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(palette.primary))
            .style(Style::default().bg(palette.background));
        let inner = block.inner(area);
        f.render_widget(Clear, area);
        f.render_widget(block, area);

        let [list_area, platform_area, url_area] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let accent = self
            .platform
            .brand_color()
            .map(Color::from_u32)
            .unwrap_or(palette.primary);
        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(format!("{:<8}", "Platform"), Style::default().fg(palette.muted)),
                Span::raw(" ‹ "),
                Span::styled(
                    format!("{} {}", self.platform.icon(), self.platform.label()),
                    Style::default().fg(accent).add_modifier(Modifier::BOLD),
                ),
                Span::raw(" ›"),
            ])),
            platform_area,
        );
        f.render_widget(
            Paragraph::new(self.url.line(
                self.editing,
                self.editing,
                "https://…",
                palette,
            )),
            url_area,
        );

        if vm.profile.links.is_empty() {
            f.render_widget(
                Paragraph::new(NO_LINKS)
                    .style(Style::default().fg(palette.muted))
                    .centered(),
                list_area,
            );
            return;
        }

        let items: Vec<ListItem> = vm
            .profile
            .links
            .iter()
            .map(|link| {
                let color = link.color.map(Color::from_u32).unwrap_or(palette.primary);
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} {:<10}", link.icon, link.name), Style::default().fg(color)),
                    Span::styled(link.url.as_str(), Style::default().fg(palette.text)),
                ]))
            })
            .collect();

        if self.selected(items.len()).is_none() {
            self.list_state.select(Some(0));
        }
        let list = List::new(items)
            .highlight_style(Style::default().bg(palette.secondary))
            .highlight_symbol("> ");
        f.render_stateful_widget(list, list_area, &mut self.list_state);
    }

    fn handle_input(&mut self, key: KeyEvent, vm: &ViewModel) -> Option<Action> {
        if self.editing {
            match key.code {
                KeyCode::Esc => self.editing = false,
                KeyCode::Enter => {
                    return Some(Action::AddSocialLink {
                        platform: self.platform,
                        url: self.url.value().to_string(),
                    });
                }
                _ => {
                    self.url.handle_key(key);
                }
            }
            return Some(Action::None);
        }

        let len = vm.profile.links.len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') if len > 0 => {
                let i = self.list_state.selected().map_or(0, |i| (i + 1).min(len - 1));
                self.list_state.select(Some(i));
                Some(Action::None)
            }
            KeyCode::Up | KeyCode::Char('k') if len > 0 => {
                let i = self.list_state.selected().map_or(0, |i| i.saturating_sub(1));
                self.list_state.select(Some(i));
                Some(Action::None)
            }
            KeyCode::Left | KeyCode::Right => {
                self.platform = self.platform.cycle(key.code == KeyCode::Right);
                Some(Action::None)
            }
            KeyCode::Enter => self.selected(len).map(Action::OpenSocialLink),
            KeyCode::Char('d') => self
                .selected(len)
                .map(|i| Action::Confirm(ConfirmAction::DeleteSocialLink(i))),
            KeyCode::Char('a') => {
                self.editing = true;
                Some(Action::None)
            }
            KeyCode::Esc => Some(Action::Close),
            _ => None,
        }
    }

    fn handle_paste(&mut self, text: &str) -> bool {
        if self.editing {
            self.url.insert_str(text);
        }
        self.editing
    }

    fn is_editing(&self) -> bool {
        self.editing
    }

    fn reset(&mut self) {
        self.url.clear();
        self.editing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        store::AppState,
        ui::view_model::{LiveStatus, project},
    };
    use ratatui::crossterm::event::KeyModifiers;

    fn press(view: &mut SocialView, vm: &ViewModel, code: KeyCode) -> Option<Action> {
        view.handle_input(KeyEvent::new(code, KeyModifiers::NONE), vm)
    }

    #[test]
    fn builds_add_request_from_form() {
        let vm = project(&AppState::default(), &LiveStatus::default());
        let mut view = SocialView::default();

        press(&mut view, &vm, KeyCode::Right);
        press(&mut view, &vm, KeyCode::Char('a'));
        view.handle_paste("https://example.com");
        let action = press(&mut view, &vm, KeyCode::Enter);

        assert_eq!(
            action,
            Some(Action::AddSocialLink {
                platform: Platform::Twitter,
                url: "https://example.com".to_string(),
            })
        );
        assert!(view.is_editing());
        view.reset();
        assert!(!view.is_editing());
    }

    #[test]
    fn delete_needs_a_link() {
        let vm = project(&AppState::default(), &LiveStatus::default());
        let mut view = SocialView::default();
        assert_eq!(press(&mut view, &vm, KeyCode::Char('d')), None);
        assert_eq!(press(&mut view, &vm, KeyCode::Esc), Some(Action::Close));
    }
}
