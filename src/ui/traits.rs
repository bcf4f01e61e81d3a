use ratatui::crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

use crate::{
    store::{Platform, Theme},
    ui::{state::ConfirmAction, view_model::ViewModel},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The key was consumed and nothing else should happen.
    None,
    PlayPause,
    NextTrack,
    PreviousTrack,
    SelectTrack(usize),
    SeekTo(f64),
    AddTrack(String),
    OpenPlaylist,
    OpenSocialLinks,
    OpenSocialLink(usize),
    AddSocialLink { platform: Platform, url: String },
    CapturePhoto,
    SwitchCamera,
    OpenCamera,
    ExportPhoto(usize),
    SaveProfile {
        name: String,
        bio: String,
        avatar: String,
        cover: String,
    },
    SetTheme(Theme),
    ToggleAutoplay,
    ToggleSavePhotos,
    Confirm(ConfirmAction),
    Confirmed(ConfirmAction),
    Close,
}

pub trait View: Send {
    fn render(&mut self, f: &mut Frame, area: Rect, vm: &ViewModel);
    fn handle_input(&mut self, key: KeyEvent, vm: &ViewModel) -> Option<Action>;
    fn handle_paste(&mut self, _text: &str) -> bool {
        false
    }
    /// A text field has focus, so global shortcuts must not fire.
    fn is_editing(&self) -> bool {
        false
    }
    /// Clears form input after the app applied it successfully.
    fn reset(&mut self) {}
}
