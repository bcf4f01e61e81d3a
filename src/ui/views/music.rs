use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    ui::{
        components::preview::FramePreview,
        traits::{Action, View},
        util::get_active_track_icon,
        view_model::ViewModel,
    },
    util::colors,
};

const SEEK_STEP: f64 = 0.05;
const COVER_WIDTH: u16 = 12;

#[derive(Default)]
pub struct MusicView;

impl View for MusicView {
    fn render(&mut self, f: &mut Frame, area: Rect, vm: &ViewModel) {
        let palette = colors::palette(vm.theme);
        let player = &vm.player;
        let [info_area, queue_area, hint_area] = Layout::vertical([
            Constraint::Length(6),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let info_area = match &player.cover_image {
            Some(cover) => {
                let [cover_area, text_area] =
                    Layout::horizontal([Constraint::Length(COVER_WIDTH), Constraint::Min(1)])
                        .areas(info_area);
                f.render_widget(FramePreview::new(cover, palette), cover_area);
                text_area
            }
            None => info_area,
        };

        let mut info = vec![
            Line::default(),
            Line::from(Span::styled(
                player.title.as_str(),
                Style::default()
                    .fg(palette.primary)
                    .add_modifier(Modifier::BOLD),
            ))
            .centered(),
            Line::from(Span::styled(
                player.artist.as_str(),
                Style::default().fg(palette.text),
            ))
            .centered(),
        ];
        if player.cover_image.is_none() && !player.cover.is_empty() {
            info.push(
                Line::from(Span::styled(
                    format!("cover: {}", player.cover),
                    Style::default().fg(palette.muted),
                ))
                .centered(),
            );
        }
        f.render_widget(Paragraph::new(info), info_area);

        let queue: Vec<Line> = vm
            .tracks
            .iter()
            .enumerate()
            .map(|(i, track)| {
                let style = if track.current {
                    Style::default()
                        .fg(palette.primary)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(palette.muted)
                };
                let marker = if track.current {
                    get_active_track_icon(player.playing)
                } else {
                    " "
                };
                Line::from(Span::styled(
                    format!("{marker} {:>2}. {} - {}", i + 1, track.title, track.artist),
                    style,
                ))
            })
            .collect();
        f.render_widget(
            Paragraph::new(queue).block(
                Block::default()
                    .title(" Up next ")
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(palette.neutral)),
            ),
            queue_area,
        );

        f.render_widget(
            Paragraph::new("enter play/pause · ←/→ seek · n/p next/prev · o playlist")
                .style(Style::default().fg(palette.muted))
                .centered(),
            hint_area,
        );
    }

    fn handle_input(&mut self, key: KeyEvent, vm: &ViewModel) -> Option<Action> {
        match key.code {
            KeyCode::Enter => Some(Action::PlayPause),
            KeyCode::Left => Some(Action::SeekTo(vm.player.ratio - SEEK_STEP)),
            KeyCode::Right => Some(Action::SeekTo(vm.player.ratio + SEEK_STEP)),
            KeyCode::Char('o') => Some(Action::OpenPlaylist),
            _ => None,
        }
    }
}
