use crate::ui::{message::AppMessage, state::Section};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keys that work from every section when no view claimed the press.
pub struct InputHandler;

impl InputHandler {
    pub fn handle_key(key: KeyEvent) -> Option<AppMessage> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(AppMessage::Quit),
            (KeyCode::Char('q'), _) => Some(AppMessage::Quit),
            (KeyCode::Char(' '), _) => Some(AppMessage::TogglePlayPause),
            (KeyCode::Char('n'), _) => Some(AppMessage::NextTrack),
            (KeyCode::Char('p'), _) => Some(AppMessage::PreviousTrack),
            (KeyCode::Char('+'), _) => Some(AppMessage::VolumeUp),
            (KeyCode::Char('='), _) => Some(AppMessage::VolumeUp),
            (KeyCode::Char('-'), _) => Some(AppMessage::VolumeDown),
            (KeyCode::Char('H'), _) => Some(AppMessage::SeekBackward),
            (KeyCode::Char('L'), _) => Some(AppMessage::SeekForward),
            (KeyCode::Char('t'), _) => Some(AppMessage::ToggleTheme),
            (KeyCode::Char('P'), _) => Some(AppMessage::OpenPlaylist),
            (KeyCode::Char('S'), _) => Some(AppMessage::OpenSocialLinks),
            (KeyCode::Esc, _) => Some(AppMessage::GoBack),
            (KeyCode::Tab, _) => Some(AppMessage::NextSection),
            (KeyCode::BackTab, _) => Some(AppMessage::PreviousSection),
            (KeyCode::Char(digit @ '1'..='9'), _) => {
                let index = digit.to_digit(10)? as usize - 1;
                Section::from_index(index).map(AppMessage::SetSection)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn digits_jump_to_sections() {
        assert_eq!(
            InputHandler::handle_key(key(KeyCode::Char('3'))),
            Some(AppMessage::SetSection(Section::Camera))
        );
        assert_eq!(InputHandler::handle_key(key(KeyCode::Char('9'))), None);
    }

    #[test]
    fn ctrl_c_quits() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(InputHandler::handle_key(event), Some(AppMessage::Quit));
    }
}
