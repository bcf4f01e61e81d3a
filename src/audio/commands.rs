use std::time::Duration;

use crate::store::MediaRef;

#[derive(Debug, Clone)]
pub enum AudioCommand {
    Play { index: usize, media: MediaRef },
    Pause,
    Resume,
    Stop,
    Seek(Duration),
    SetVolume(f32),
}
