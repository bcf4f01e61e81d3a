use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{List, ListItem, Widget},
};

use crate::{ui::state::Section, util::colors::Palette};

pub struct Sidebar<'a> {
    selected: Section,
    palette: &'a Palette,
}

impl<'a> Sidebar<'a> {
    pub fn new(selected: Section, palette: &'a Palette) -> Self {
        Self { selected, palette }
    }
}

impl Widget for Sidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = Section::ALL
            .iter()
            .enumerate()
            .map(|(i, section)| {
                let style = if *section == self.selected {
                    Style::default()
                        .fg(self.palette.primary)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(self.palette.muted)
                };
                ListItem::new(format!(" {} {}  {}", i + 1, section.icon(), section.title()))
                    .style(style)
            })
            .collect();

        List::new(items).render(area, buf);
    }
}
