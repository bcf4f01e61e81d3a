use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    ui::{
        components::field::TextField,
        traits::{Action, View},
        view_model::ViewModel,
    },
    util::colors::{self, Palette},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Name,
    Bio,
    Avatar,
    Cover,
    Theme,
    Autoplay,
    SavePhotos,
    Save,
}

const ROWS: [Row; 8] = [
    Row::Name,
    Row::Bio,
    Row::Avatar,
    Row::Cover,
    Row::Theme,
    Row::Autoplay,
    Row::SavePhotos,
    Row::Save,
];

pub struct SettingsView {
    name: TextField,
    bio: TextField,
    avatar: TextField,
    cover: TextField,
    cursor: usize,
    editing: bool,
}

impl Default for SettingsView {
    fn default() -> Self {
        Self {
            name: TextField::new("Name"),
            bio: TextField::new("Bio"),
            avatar: TextField::new("Avatar"),
            cover: TextField::new("Cover"),
            cursor: 0,
            editing: false,
        }
    }
}

impl SettingsView {
    fn row(&self) -> Row {
        ROWS[self.cursor]
    }

    fn field_mut(&mut self, row: Row) -> Option<&mut TextField> {
        match row {
            Row::Name => Some(&mut self.name),
            Row::Bio => Some(&mut self.bio),
            Row::Avatar => Some(&mut self.avatar),
            Row::Cover => Some(&mut self.cover),
            _ => None,
        }
    }

    fn toggle_line<'a>(label: &'a str, value: &'a str, focused: bool, palette: &Palette) -> Line<'a> {
        let label_style = if focused {
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.muted)
        };
        Line::from(vec![
            Span::styled(format!("{label:<8}"), label_style),
            Span::raw(" "),
            Span::styled(format!("[{value}]"), Style::default().fg(palette.text)),
        ])
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

impl View for SettingsView {
    fn render(&mut self, f: &mut Frame, area: Rect, vm: &ViewModel) {
        let palette = colors::palette(vm.theme);
        let settings = &vm.settings;
        let focused = self.row();
        let editing = self.editing;

        let mut lines = vec![
            self.name
                .line(focused == Row::Name, editing && focused == Row::Name, &vm.profile.name, palette),
            self.bio
                .line(focused == Row::Bio, editing && focused == Row::Bio, &vm.profile.bio, palette),
            self.avatar.line(
                focused == Row::Avatar,
                editing && focused == Row::Avatar,
                "path to an image",
                palette,
            ),
            self.cover.line(
                focused == Row::Cover,
                editing && focused == Row::Cover,
                "path to a cover for the current track",
                palette,
            ),
            Line::default(),
            Self::toggle_line("Theme", settings.theme.label(), focused == Row::Theme, palette),
            Self::toggle_line("Autoplay", on_off(settings.autoplay), focused == Row::Autoplay, palette),
            Self::toggle_line(
                "Photos",
                if settings.save_photos { "save to disk" } else { "keep in app" },
                focused == Row::SavePhotos,
                palette,
            ),
            Line::default(),
        ];

        let save_style = if focused == Row::Save {
            Style::default()
                .fg(palette.background)
                .bg(palette.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.primary)
        };
        lines.push(Line::from(Span::styled("  Save profile  ", save_style)));

        let hint = if editing {
            " enter/esc done "
        } else {
            " ↑/↓ move · enter edit/toggle "
        };
        f.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .title(" Settings ")
                    .title_bottom(hint)
                    .borders(Borders::ALL)
                    .border_set(border::ROUNDED)
                    .border_style(Style::default().fg(palette.neutral)),
            ),
            area,
        );
    }

    fn handle_input(&mut self, key: KeyEvent, vm: &ViewModel) -> Option<Action> {
        if self.editing {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => self.editing = false,
                _ => {
                    let row = self.row();
                    if let Some(field) = self.field_mut(row) {
                        field.handle_key(key);
                    }
                }
            }
            return Some(Action::None);
        }

        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor = (self.cursor + 1).min(ROWS.len() - 1);
                Some(Action::None)
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
                Some(Action::None)
            }
            KeyCode::Enter => match self.row() {
                Row::Name | Row::Bio | Row::Avatar | Row::Cover => {
                    self.editing = true;
                    Some(Action::None)
                }
                Row::Theme => Some(Action::SetTheme(vm.settings.theme.toggled())),
                Row::Autoplay => Some(Action::ToggleAutoplay),
                Row::SavePhotos => Some(Action::ToggleSavePhotos),
                Row::Save => Some(Action::SaveProfile {
                    name: self.name.value().to_string(),
                    bio: self.bio.value().to_string(),
                    avatar: self.avatar.value().trim().to_string(),
                    cover: self.cover.value().trim().to_string(),
                }),
            },
            _ => None,
        }
    }

    fn handle_paste(&mut self, text: &str) -> bool {
        if !self.editing {
            return false;
        }
        let row = self.row();
        match self.field_mut(row) {
            Some(field) => {
                field.insert_str(text);
                true
            }
            None => false,
        }
    }

    fn is_editing(&self) -> bool {
        self.editing
    }

    fn reset(&mut self) {
        self.name.clear();
        self.bio.clear();
        self.avatar.clear();
        self.cover.clear();
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

    fn press(view: &mut SettingsView, vm: &ViewModel, code: KeyCode) -> Option<Action> {
        view.handle_input(KeyEvent::new(code, KeyModifiers::NONE), vm)
    }

    #[test]
    fn typed_values_reach_the_save_action() {
        let vm = project(&AppState::default(), &LiveStatus::default());
        let mut view = SettingsView::default();

        press(&mut view, &vm, KeyCode::Enter);
        assert!(view.is_editing());
        for c in "Wren".chars() {
            press(&mut view, &vm, KeyCode::Char(c));
        }
        press(&mut view, &vm, KeyCode::Enter);
        assert!(!view.is_editing());

        for _ in 0..ROWS.len() {
            press(&mut view, &vm, KeyCode::Down);
        }
        let action = press(&mut view, &vm, KeyCode::Enter);
        assert_eq!(
            action,
            Some(Action::SaveProfile {
                name: "Wren".to_string(),
                bio: String::new(),
                avatar: String::new(),
                cover: String::new(),
            })
        );
    }

    #[test]
    fn global_keys_are_swallowed_while_editing() {
        let vm = project(&AppState::default(), &LiveStatus::default());
        let mut view = SettingsView::default();
        press(&mut view, &vm, KeyCode::Enter);

        assert_eq!(press(&mut view, &vm, KeyCode::Char('q')), Some(Action::None));
        assert_eq!(view.name.value(), "q");
    }

    #[test]
    fn theme_row_requests_the_other_theme() {
        let vm = project(&AppState::default(), &LiveStatus::default());
        let mut view = SettingsView::default();
        for _ in 0..4 {
            press(&mut view, &vm, KeyCode::Down);
        }
        assert_eq!(
            press(&mut view, &vm, KeyCode::Enter),
            Some(Action::SetTheme(vm.settings.theme.toggled()))
        );
    }
}
