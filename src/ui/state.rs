use crate::store::AppState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    Profile,
    Music,
    Camera,
    Settings,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Profile,
        Section::Music,
        Section::Camera,
        Section::Settings,
    ];

    pub fn index(self) -> usize {
        match self {
            Section::Profile => 0,
            Section::Music => 1,
            Section::Camera => 2,
            Section::Settings => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Profile => "Profile",
            Section::Music => "Music",
            Section::Camera => "Camera",
            Section::Settings => "Settings",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Section::Profile => "☺",
            Section::Music => "♫",
            Section::Camera => "◉",
            Section::Settings => "⚙",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteTrack(usize),
    DeleteSocialLink(usize),
    DeletePhoto(usize),
}

impl ConfirmAction {
    pub fn prompt(self, state: &AppState) -> String {
        match self {
            ConfirmAction::DeleteTrack(i) => match state.tracks.get(i) {
                Some(track) => format!("Delete \"{}\"?", track.title),
                None => "Delete this track?".to_string(),
            },
            ConfirmAction::DeleteSocialLink(_) => "Delete this link?".to_string(),
            ConfirmAction::DeletePhoto(_) => "Delete this photo?".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub section: Section,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_cycle_both_ways() {
        for section in Section::ALL {
            assert_eq!(section.next().previous(), section);
            assert_eq!(Section::from_index(section.index()), Some(section));
        }
        assert_eq!(Section::Settings.next(), Section::Profile);
        assert_eq!(Section::from_index(4), None);
    }

    #[test]
    fn track_prompt_names_the_track() {
        let state = AppState::default();
        assert_eq!(
            ConfirmAction::DeleteTrack(1).prompt(&state),
            "Delete \"Digital Waves\"?"
        );
        assert_eq!(
            ConfirmAction::DeleteTrack(9).prompt(&state),
            "Delete this track?"
        );
    }
}
