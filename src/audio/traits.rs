use crate::{audio::error::AudioError, store::MediaRef};
use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait AudioSource: Send + Sync {
    async fn fetch(&self, media: &MediaRef) -> Result<Vec<u8>, AudioError>;
}

/// The output side of the player. `start` is blocking (it decodes) and is
/// always called from a blocking task.
pub trait PlaybackControl: Send + Sync {
    fn start(&self, data: Vec<u8>, hint: Option<&str>) -> Result<Option<Duration>, AudioError>;
    fn play(&self);
    fn pause(&self);
    fn stop(&self);
    fn seek(&self, position: Duration) -> Result<(), AudioError>;
    fn set_volume(&self, volume: f32);
    fn position(&self) -> Duration;
    fn is_finished(&self) -> bool;
}
