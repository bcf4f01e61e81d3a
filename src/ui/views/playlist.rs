use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::{
    ui::{
        components::field::TextField,
        state::ConfirmAction,
        traits::{Action, View},
        util::get_active_track_icon,
        view_model::{NO_TRACKS, ViewModel},
    },
    util::colors,
};

pub struct PlaylistView {
    list_state: ListState,
    upload: TextField,
    editing: bool,
}

impl Default for PlaylistView {
    fn default() -> Self {
        Self {
            list_state: ListState::default(),
            upload: TextField::new("Upload"),
            editing: false,
        }
    }
}

impl PlaylistView {
    fn selected(&self, len: usize) -> Option<usize> {
        self.list_state.selected().filter(|i| *i < len)
    }
}

impl View for PlaylistView {
    fn render(&mut self, f: &mut Frame, area: Rect, vm: &ViewModel) {
        let palette = colors::palette(vm.theme);
        let block = Block::default()
            .title(" Playlist ")
            .title_bottom(" enter play · d delete · a add file · esc close ")
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(palette.primary))
            .style(Style::default().bg(palette.background));
        let inner = block.inner(area);
        f.render_widget(Clear, area);
        f.render_widget(block, area);

        let [list_area, upload_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

        f.render_widget(
            Paragraph::new(self.upload.line(
                self.editing,
                self.editing,
                "press a, then type a path to an audio file",
                palette,
            )),
            upload_area,
        );

        if vm.tracks.is_empty() {
            f.render_widget(
                Paragraph::new(NO_TRACKS)
                    .style(Style::default().fg(palette.muted))
                    .centered(),
                list_area,
            );
            return;
        }

        let items: Vec<ListItem> = vm
            .tracks
            .iter()
            .map(|track| {
                let marker = if track.current {
                    get_active_track_icon(vm.player.playing)
                } else {
                    " "
                };
                let mut spans = vec![
                    Span::raw(format!("{marker} ")),
                    Span::raw(track.title.as_str()),
                    Span::styled(
                        format!(" - {}", track.artist),
                        Style::default().fg(palette.muted),
                    ),
                ];
                if track.uploaded {
                    spans.push(Span::styled(" ⇪", Style::default().fg(palette.secondary)));
                }
                let mut item = ListItem::new(Line::from(spans));
                if track.current {
                    item = item.style(
                        Style::default()
                            .fg(palette.primary)
                            .add_modifier(Modifier::BOLD),
                    );
                }
                item
            })
            .collect();

        if self.selected(items.len()).is_none() {
            let current = vm.tracks.iter().position(|t| t.current).unwrap_or(0);
            self.list_state.select(Some(current));
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
                    let path = self.upload.value().trim().to_string();
                    if !path.is_empty() {
                        return Some(Action::AddTrack(path));
                    }
                }
                _ => {
                    self.upload.handle_key(key);
                }
            }
            return Some(Action::None);
        }

        let len = vm.tracks.len();
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
            KeyCode::Enter => self.selected(len).map(Action::SelectTrack),
            KeyCode::Char('d') => self
                .selected(len)
                .map(|i| Action::Confirm(ConfirmAction::DeleteTrack(i))),
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
            self.upload.insert_str(text);
        }
        self.editing
    }

    fn is_editing(&self) -> bool {
        self.editing
    }

    fn reset(&mut self) {
        self.upload.clear();
        self.editing = false;
    }
}
