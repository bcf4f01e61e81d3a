use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::util::colors::Palette;

/// Single-line text input. The cursor is a char index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextField {
    label: &'static str,
    value: String,
    cursor: usize,
}

impl TextField {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            cursor: 0,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.value
            .char_indices()
            .nth(cursor)
            .map_or(self.value.len(), |(i, _)| i)
    }

    pub fn insert_str(&mut self, text: &str) {
        let text: String = text.chars().filter(|c| !c.is_control()).collect();
        let at = self.byte_index(self.cursor);
        self.value.insert_str(at, &text);
        self.cursor += text.chars().count();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let at = self.byte_index(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
            }
            KeyCode::Char('u') => self.clear(),
            KeyCode::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
            }
            KeyCode::Delete if self.cursor < self.value.chars().count() => {
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.value.chars().count()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.value.chars().count(),
            KeyCode::Backspace | KeyCode::Delete => {}
            _ => return false,
        }
        true
    }

    /// `hint` is shown muted while the field is empty and idle.
    pub fn line<'a>(
        &'a self,
        focused: bool,
        editing: bool,
        hint: &'a str,
        palette: &Palette,
    ) -> Line<'a> {
        let label_style = if focused {
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.muted)
        };
        let mut spans = vec![
            Span::styled(format!("{:<8}", self.label), label_style),
            Span::raw(" "),
        ];

        if editing {
            let at = self.byte_index(self.cursor);
            let (before, rest) = self.value.split_at(at);
            let mut chars = rest.chars();
            let under = chars.next().map_or(" ".to_string(), String::from);
            spans.push(Span::styled(before, Style::default().fg(palette.text)));
            spans.push(Span::styled(
                under,
                Style::default().fg(palette.background).bg(palette.text),
            ));
            spans.push(Span::styled(chars.as_str(), Style::default().fg(palette.text)));
        } else if self.value.is_empty() {
            spans.push(Span::styled(hint, Style::default().fg(palette.muted)));
        } else {
            spans.push(Span::styled(
                self.value.as_str(),
                Style::default().fg(palette.text),
            ));
        }
        Line::from(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(field: &mut TextField, code: KeyCode) {
        field.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn edits_at_cursor() {
        let mut field = TextField::new("URL");
        field.set_value("htps");
        press(&mut field, KeyCode::Home);
        press(&mut field, KeyCode::Right);
        press(&mut field, KeyCode::Char('t'));
        assert_eq!(field.value(), "https");

        press(&mut field, KeyCode::End);
        press(&mut field, KeyCode::Backspace);
        assert_eq!(field.value(), "http");
    }

    #[test]
    fn handles_multibyte_text() {
        let mut field = TextField::new("Name");
        field.set_value("Wé");
        press(&mut field, KeyCode::Backspace);
        press(&mut field, KeyCode::Char('ü'));
        assert_eq!(field.value(), "Wü");
    }

    #[test]
    fn paste_drops_control_characters() {
        let mut field = TextField::new("Bio");
        field.insert_str("line one\nline two");
        assert_eq!(field.value(), "line oneline two");
    }

    #[test]
    fn navigation_keys_are_claimed() {
        let mut field = TextField::new("Bio");
        assert!(field.handle_key(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE)));
        assert!(!field.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
    }
}
