use std::time::Duration;

/// Events produced by background work and delivered to the UI task, where
/// they are applied to the application state.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    // Playback
    TrackStarted {
        index: usize,
        generation: u64,
        duration: Option<Duration>,
    },
    TrackEnded {
        generation: u64,
    },
    PlaybackFailed {
        index: usize,
        generation: u64,
        reason: String,
    },
    RetryPlayback,

    // Timers
    ViewJitter,
}
