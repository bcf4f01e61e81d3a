use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Position and duration of the loaded track, shared with the monitor task.
/// A zero duration means "unknown".
#[derive(Default, Debug)]
pub struct TrackProgress {
    current_position_millis: AtomicU64,
    total_duration_millis: AtomicU64,
    generation: AtomicU64,
}

impl TrackProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_current_position(&self, position: Duration) {
        self.current_position_millis
            .store(position.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn set_total_duration(&self, duration: Duration) {
        self.total_duration_millis
            .store(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn get_progress(&self) -> (u64, u64) {
        (
            self.current_position_millis.load(Ordering::Relaxed),
            self.total_duration_millis.load(Ordering::Relaxed),
        )
    }

    pub fn position(&self) -> Duration {
        Duration::from_millis(self.current_position_millis.load(Ordering::Relaxed))
    }

    pub fn duration(&self) -> Option<Duration> {
        match self.total_duration_millis.load(Ordering::Relaxed) {
            0 => None,
            millis => Some(Duration::from_millis(millis)),
        }
    }

    pub fn ratio(&self) -> f64 {
        let (current, total) = self.get_progress();
        if total == 0 {
            0.0
        } else {
            (current as f64 / total as f64).min(1.0)
        }
    }

    /// Bumped on every reset; lets async completions detect that the track
    /// they belong to has been replaced.
    pub fn get_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.set_current_position(Duration::ZERO);
        self.set_total_duration(Duration::ZERO);
    }
}
