pub mod commands;
pub mod controller;
pub mod error;
pub mod playback;
pub mod player;
pub mod progress;
pub mod source;
pub mod state;
pub mod system;
pub mod traits;
pub mod util;

pub use error::{AudioError, PlayerError};
pub use player::DeleteOutcome;
pub use state::PlaybackState;
pub use system::{AudioSystem, FailureOutcome, RetryState, Toggle};
