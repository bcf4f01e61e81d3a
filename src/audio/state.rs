#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Loading(usize),
    Playing(usize),
    Paused(usize),
}

impl PlaybackState {
    pub fn index(&self) -> Option<usize> {
        match self {
            PlaybackState::Stopped => None,
            PlaybackState::Loading(i) | PlaybackState::Playing(i) | PlaybackState::Paused(i) => {
                Some(*i)
            }
        }
    }
}
