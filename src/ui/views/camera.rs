use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
    ui::{
        components::{preview::FramePreview, spinner::Spinner},
        state::ConfirmAction,
        traits::{Action, View},
        view_model::{NO_PHOTOS, ViewModel},
    },
    util::colors,
};

#[derive(Default)]
pub struct CameraView {
    gallery: ListState,
}

impl CameraView {
    fn selected(&self, len: usize) -> Option<usize> {
        self.gallery.selected().filter(|i| *i < len)
    }
}

impl View for CameraView {
    fn render(&mut self, f: &mut Frame, area: Rect, vm: &ViewModel) {
        let palette = colors::palette(vm.theme);
        let camera = &vm.camera;
        let [preview_area, gallery_area] =
            Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)])
                .areas(area);

        let preview_block = Block::default()
            .title(format!(" {} ", camera.status))
            .title_bottom(" c capture · f switch · r reopen ")
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(if camera.open {
                palette.primary
            } else {
                palette.neutral
            }));
        let inner = preview_block.inner(preview_area);
        f.render_widget(preview_block, preview_area);

        match (&camera.preview, camera.open) {
            (Some(frame), true) => f.render_widget(FramePreview::new(frame, palette), inner),
            (None, true) => f.render_widget(
                Spinner::new()
                    .with_label("waiting for frames")
                    .with_style(Style::default().fg(palette.muted)),
                inner,
            ),
            (_, false) => f.render_widget(
                Paragraph::new(format!("{} camera is off · press r to open", camera.facing))
                    .style(Style::default().fg(palette.muted))
                    .centered(),
                inner,
            ),
        }

        let gallery_block = Block::default()
            .title(format!(" Gallery ({}) ", camera.photos.len()))
            .title_bottom(" e export · d delete ")
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(palette.neutral));

        if camera.photos.is_empty() {
            f.render_widget(
                Paragraph::new(NO_PHOTOS)
                    .style(Style::default().fg(palette.muted))
                    .centered()
                    .block(gallery_block),
                gallery_area,
            );
            return;
        }

        let items: Vec<ListItem> = camera
            .photos
            .iter()
            .enumerate()
            .map(|(i, photo)| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        format!("#{} {}", i + 1, photo.timestamp),
                        Style::default().fg(palette.text),
                    )),
                    Line::from(Span::styled(
                        format!("   {}", photo.size),
                        Style::default().fg(palette.muted),
                    )),
                ])
            })
            .collect();

        if self.selected(items.len()).is_none() {
            self.gallery.select(Some(items.len() - 1));
        }
        let list = List::new(items)
            .block(gallery_block)
            .highlight_style(Style::default().bg(palette.secondary));
        f.render_stateful_widget(list, gallery_area, &mut self.gallery);
    }

    fn handle_input(&mut self, key: KeyEvent, vm: &ViewModel) -> Option<Action> {
        let len = vm.camera.photos.len();
        match key.code {
            KeyCode::Char('c') | KeyCode::Enter => Some(Action::CapturePhoto),
            KeyCode::Char('f') => Some(Action::SwitchCamera),
            KeyCode::Char('r') => Some(Action::OpenCamera),
            KeyCode::Down | KeyCode::Char('j') if len > 0 => {
                let i = self.gallery.selected().map_or(0, |i| (i + 1).min(len - 1));
                self.gallery.select(Some(i));
                Some(Action::None)
            }
            KeyCode::Up | KeyCode::Char('k') if len > 0 => {
                let i = self.gallery.selected().map_or(0, |i| i.saturating_sub(1));
                self.gallery.select(Some(i));
                Some(Action::None)
            }
            KeyCode::Char('e') => self.selected(len).map(Action::ExportPhoto),
            KeyCode::Char('d') => self
                .selected(len)
                .map(|i| Action::Confirm(ConfirmAction::DeletePhoto(i))),
            _ => None,
        }
    }
}
