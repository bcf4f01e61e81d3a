use crate::ui::state::Section;

#[derive(Debug, Clone, PartialEq)]
pub enum AppMessage {
    // User Input
    Quit,
    TogglePlayPause,
    NextTrack,
    PreviousTrack,
    VolumeUp,
    VolumeDown,
    SeekForward,
    SeekBackward,
    ToggleTheme,

    // Navigation
    NextSection,
    PreviousSection,
    SetSection(Section),
    OpenPlaylist,
    OpenSocialLinks,
    GoBack,
}
