pub mod handler;

use std::time::{SystemTime, UNIX_EPOCH};

const FRAME_STEP_MS: u128 = 120;
const PULSE: [&str; 6] = ["·", "•", "●", "●", "•", "·"];

/// Marker for the loaded track; pulses while it plays.
pub fn get_active_track_icon(is_playing: bool) -> &'static str {
    if !is_playing {
        return "•";
    }
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    PULSE[(now / FRAME_STEP_MS) as usize % PULSE.len()]
}
