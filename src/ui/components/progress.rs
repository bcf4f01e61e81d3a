use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Style, Stylize},
    symbols::{self, border},
    text::ToSpan,
    widgets::{Block, Borders, Widget},
};

use crate::{
    ui::{
        components::{gauge::SeekBar, spinner::Spinner},
        view_model::PlayerModel,
    },
    util::colors::Palette,
};

pub struct ProgressWidget<'a> {
    player: &'a PlayerModel,
    palette: &'a Palette,
}

impl<'a> ProgressWidget<'a> {
    pub fn new(player: &'a PlayerModel, palette: &'a Palette) -> Self {
        Self { player, palette }
    }
}

impl Widget for ProgressWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let icon = if self.player.loading {
            Spinner::symbol()
        } else if self.player.playing {
            "▶"
        } else {
            "⏸"
        };

        let mut track_info = format!("{icon}  {}", self.player.title);
        if !self.player.artist.is_empty() {
            track_info = format!("{track_info} · {}", self.player.artist);
        }
        if self.player.retrying {
            track_info = format!("{track_info} (retrying)");
        }

        let time = format!("{} / {}", self.player.elapsed, self.player.total);

        SeekBar::default()
            .block(
                Block::default()
                    .title_top(track_info)
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.palette.neutral))
                    .border_set(border::Set {
                        top_right: symbols::line::ROUNDED.horizontal_down,
                        bottom_right: symbols::line::ROUNDED.horizontal_up,
                        ..symbols::border::ROUNDED
                    }),
            )
            .ratio(self.player.ratio)
            .label(time.to_span().fg(self.palette.text))
            .filled_style(Style::default().fg(self.palette.primary).bg(self.palette.secondary))
            .empty_style(Style::default().bg(self.palette.background))
            .render(area, buf);
    }
}
