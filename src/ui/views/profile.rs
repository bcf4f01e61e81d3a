use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::{
    ui::{
        components::preview::FramePreview,
        traits::{Action, View},
        view_model::{NO_LINKS, ViewModel},
    },
    util::colors,
};

const AVATAR_WIDTH: u16 = 14;

#[derive(Default)]
pub struct ProfileView {
    list_state: ListState,
}

impl View for ProfileView {
    fn render(&mut self, f: &mut Frame, area: Rect, vm: &ViewModel) {
        let palette = colors::palette(vm.theme);
        let profile = &vm.profile;
        let [card_area, links_area] =
            Layout::vertical([Constraint::Length(8), Constraint::Min(3)]).areas(area);
        let card_area = match &profile.avatar_image {
            Some(avatar) => {
                let [image_area, text_area] =
                    Layout::horizontal([Constraint::Length(AVATAR_WIDTH), Constraint::Min(1)])
                        .spacing(1)
                        .areas(card_area);
                let image_area = Rect {
                    height: image_area.height.saturating_sub(1),
                    ..image_area
                };
                f.render_widget(FramePreview::new(avatar, palette), image_area);
                text_area
            }
            None => card_area,
        };

        let mut card = vec![
            Line::from(Span::styled(
                profile.name.as_str(),
                Style::default()
                    .fg(palette.primary)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                profile.bio.as_str(),
                Style::default().fg(palette.text),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled("👁 ", Style::default().fg(palette.secondary)),
                Span::styled(
                    format!("{} views", profile.views),
                    Style::default().fg(palette.text),
                ),
            ]),
        ];
        if profile.avatar_image.is_none() {
            card.push(Line::from(vec![
                Span::styled("◉ ", Style::default().fg(palette.muted)),
                Span::styled(profile.avatar.as_str(), Style::default().fg(palette.muted)),
            ]));
        }
        f.render_widget(
            Paragraph::new(card).wrap(Wrap { trim: true }).block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(Style::default().fg(palette.neutral)),
            ),
            card_area,
        );

        let links_block = Block::default()
            .title(" Links ")
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(palette.neutral));

        if profile.links.is_empty() {
            f.render_widget(
                Paragraph::new(NO_LINKS)
                    .style(Style::default().fg(palette.muted))
                    .centered()
                    .block(links_block),
                links_area,
            );
            return;
        }

        let items: Vec<ListItem> = profile
            .links
            .iter()
            .map(|link| {
                let accent = link.color.map(Color::from_u32).unwrap_or(palette.primary);
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", link.icon), Style::default().fg(accent)),
                    Span::styled(
                        format!("{:<10}", link.name),
                        Style::default().fg(accent).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(link.url.as_str(), Style::default().fg(palette.muted)),
                ]))
            })
            .collect();

        if self.list_state.selected().is_none_or(|i| i >= items.len()) {
            self.list_state.select(Some(0));
        }

        let list = List::new(items)
            .block(links_block)
            .highlight_style(Style::default().bg(palette.secondary))
            .highlight_symbol("> ");
        f.render_stateful_widget(list, links_area, &mut self.list_state);
    }

    fn handle_input(&mut self, key: KeyEvent, vm: &ViewModel) -> Option<Action> {
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
            KeyCode::Enter => self
                .list_state
                .selected()
                .filter(|i| *i < len)
                .map(Action::OpenSocialLink),
            KeyCode::Char('l') => Some(Action::OpenSocialLinks),
            _ => None,
        }
    }
}
