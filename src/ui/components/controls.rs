use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Style, Stylize},
    symbols::{self, border},
    text::ToSpan,
    widgets::{Block, Borders, Gauge, Widget},
};

use crate::util::colors::Palette;

pub struct VolumeWidget<'a> {
    volume: f32,
    label: &'a str,
    palette: &'a Palette,
}

impl<'a> VolumeWidget<'a> {
    pub fn new(volume: f32, label: &'a str, palette: &'a Palette) -> Self {
        Self {
            volume,
            label,
            palette,
        }
    }
}

impl Widget for VolumeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.palette.neutral))
            .border_set(border::Set {
                top_left: symbols::line::ROUNDED.horizontal_down,
                bottom_left: symbols::line::ROUNDED.horizontal_up,
                ..symbols::border::ROUNDED
            })
            .title_top("vol");

        Gauge::default()
            .block(block)
            .gauge_style(
                Style::new()
                    .fg(self.palette.primary)
                    .bg(self.palette.neutral),
            )
            .ratio(f64::from(self.volume).clamp(0.0, 1.0))
            .label(self.label.to_span().fg(self.palette.text))
            .render(area, buf);
    }
}
