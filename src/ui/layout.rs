use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    symbols::{self, border},
    widgets::{Block, Borders},
};

use crate::{
    ui::{
        app::App,
        components::{
            controls::VolumeWidget, progress::ProgressWidget, sidebar::Sidebar, toast::Toast,
        },
        view_model::ViewModel,
    },
    util::colors,
};

const SIDEBAR_WIDTH: u16 = 22;
const VOLUME_WIDTH: u16 = 14;

pub struct AppLayout<'a> {
    pub app: &'a mut App,
}

impl<'a> AppLayout<'a> {
    pub fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    pub fn render(self, f: &mut Frame, area: Rect, vm: &ViewModel) {
        let palette = colors::palette(vm.theme);
        f.buffer_mut()
            .set_style(area, Style::new().bg(palette.background).fg(palette.text));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(area);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
            .split(chunks[0]);

        let sidebar_block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(palette.neutral))
            .title(format!(" {} ", vm.profile.name))
            .title_alignment(Alignment::Center);

        let content_block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::Set {
                ..symbols::border::ROUNDED
            })
            .border_style(Style::default().fg(palette.neutral))
            .title(format!(" {} ", self.app.ui.section.title()));

        let sidebar_inner = sidebar_block.inner(main_chunks[0]);
        let content_inner = content_block.inner(main_chunks[1]);

        f.render_widget(sidebar_block, main_chunks[0]);
        f.render_widget(content_block, main_chunks[1]);
        f.render_widget(Sidebar::new(self.app.ui.section, palette), sidebar_inner);

        self.app
            .router
            .render(f, content_inner, self.app.ui.section, vm);

        let player_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(VOLUME_WIDTH)])
            .split(chunks[1]);
        f.render_widget(ProgressWidget::new(&vm.player, palette), player_chunks[0]);
        f.render_widget(
            VolumeWidget::new(vm.player.volume, &vm.player.volume_label, palette),
            player_chunks[1],
        );

        if let Some(notification) = &vm.notification {
            let toast = Toast::new(notification, palette);
            let toast_area = toast.area(area);
            f.render_widget(toast, toast_area);
        }
    }
}
