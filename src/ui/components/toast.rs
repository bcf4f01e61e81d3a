use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    symbols::border,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::{
    ui::notification::{Notification, NotificationKind},
    util::colors::Palette,
};

pub struct Toast<'a> {
    notification: &'a Notification,
    palette: &'a Palette,
}

impl<'a> Toast<'a> {
    pub fn new(notification: &'a Notification, palette: &'a Palette) -> Self {
        Self {
            notification,
            palette,
        }
    }

    pub fn area(&self, area: Rect) -> Rect {
        let width = (self.notification.message.chars().count() as u16 + 6)
            .min(area.width)
            .max(area.width.min(20));
        let height = 3.min(area.height);
        Rect::new(area.right().saturating_sub(width), area.y, width, height)
    }
}

impl Widget for Toast<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let accent = match self.notification.kind {
            NotificationKind::Info => self.palette.primary,
            NotificationKind::Success => self.palette.success,
            NotificationKind::Warning => self.palette.warning,
            NotificationKind::Error => self.palette.danger,
        };

        Clear.render(area, buf);
        let text = Line::from(format!(
            "{} {}",
            self.notification.kind.icon(),
            self.notification.message
        ));
        Paragraph::new(text)
            .style(
                Style::default()
                    .fg(accent)
                    .bg(self.palette.background)
                    .add_modifier(Modifier::BOLD),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_set(border::ROUNDED)
                    .border_style(Style::default().fg(accent)),
            )
            .render(area, buf);
    }
}
