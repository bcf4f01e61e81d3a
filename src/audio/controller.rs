use flume::Sender;
use std::{
    sync::{Arc, RwLock},
    time::Duration,
};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::audio::{
    commands::AudioCommand,
    error::AudioError,
    progress::TrackProgress,
    state::PlaybackState,
    traits::{AudioSource, PlaybackControl},
};
use crate::event::Event;
use crate::store::MediaRef;

const MONITOR_INTERVAL: Duration = Duration::from_millis(100);

/// Drives the output device. Playback start is asynchronous: its outcome
/// comes back as [`Event::TrackStarted`] or [`Event::PlaybackFailed`].
pub struct AudioController {
    output: Option<Arc<dyn PlaybackControl>>,
    source: Arc<dyn AudioSource>,
    state: Arc<RwLock<PlaybackState>>,
    event_tx: Sender<Event>,
    track_progress: Arc<TrackProgress>,
    current_playback_task: Option<JoinHandle<()>>,
    monitor_task: Option<JoinHandle<()>>,
    volume: f32,
}

impl AudioController {
    /// `output` is `None` when no audio device could be opened; every play
    /// request then fails with a device error.
    pub fn new(
        output: Option<Arc<dyn PlaybackControl>>,
        source: Arc<dyn AudioSource>,
        event_tx: Sender<Event>,
    ) -> Self {
        let mut controller = Self {
            output,
            source,
            state: Arc::new(RwLock::new(PlaybackState::Stopped)),
            event_tx,
            track_progress: Arc::new(TrackProgress::new()),
            current_playback_task: None,
            monitor_task: None,
            volume: 1.0,
        };

        controller.start_monitor();
        controller
    }

    fn start_monitor(&mut self) {
        let Some(output) = self.output.clone() else {
            return;
        };
        let progress = self.track_progress.clone();
        let state = self.state.clone();
        let event_tx = self.event_tx.clone();

        self.monitor_task = Some(tokio::spawn(async move {
            loop {
                tokio::time::sleep(MONITOR_INTERVAL).await;

                let is_playing = state
                    .read()
                    .map(|s| matches!(*s, PlaybackState::Playing(_)))
                    .unwrap_or(false);
                if !is_playing {
                    continue;
                }

                progress.set_current_position(output.position());

                if output.is_finished() {
                    if let Ok(mut guard) = state.write() {
                        *guard = PlaybackState::Stopped;
                    }
                    let generation = progress.get_generation();
                    let _ = event_tx.send(Event::TrackEnded { generation });
                }
            }
        }));
    }

    pub fn handle_command(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::Play { index, media } => self.play_track(index, media),
            AudioCommand::Pause => self.pause(),
            AudioCommand::Resume => self.resume(),
            AudioCommand::Stop => self.stop(),
            AudioCommand::Seek(pos) => self.seek(pos),
            AudioCommand::SetVolume(volume) => self.set_volume(volume),
        }
    }

    fn play_track(&mut self, index: usize, media: MediaRef) {
        self.stop();
        self.set_state(PlaybackState::Loading(index));

        let generation = self.track_progress.get_generation();
        let progress = self.track_progress.clone();
        let state = self.state.clone();
        let event_tx = self.event_tx.clone();
        let source = self.source.clone();
        let output = self.output.clone();
        let volume = self.volume;

        let task = tokio::spawn(async move {
            let result = match output {
                Some(output) => {
                    output.set_volume(volume);
                    start_output(output, source, media, progress.clone(), generation).await
                }
                None => Err(AudioError::DeviceError("no audio output device".to_string())),
            };

            if progress.get_generation() != generation {
                debug!(index, "stale_playback_result_dropped");
                return;
            }

            match result {
                Ok(duration) => {
                    if let Some(total) = duration {
                        progress.set_total_duration(total);
                    }
                    if let Ok(mut guard) = state.write() {
                        *guard = PlaybackState::Playing(index);
                    }
                    let _ = event_tx.send(Event::TrackStarted {
                        index,
                        generation,
                        duration,
                    });
                }
                Err(e) => {
                    warn!(index, error = %e, "playback_failed");
                    if let Ok(mut guard) = state.write() {
                        *guard = PlaybackState::Stopped;
                    }
                    let _ = event_tx.send(Event::PlaybackFailed {
                        index,
                        generation,
                        reason: e.to_string(),
                    });
                }
            }
        });

        self.current_playback_task = Some(task);
    }

    fn stop(&mut self) {
        if let Some(task) = self.current_playback_task.take() {
            task.abort();
        }
        if let Some(output) = &self.output {
            output.stop();
        }
        self.track_progress.reset();
        self.set_state(PlaybackState::Stopped);
    }

    fn pause(&mut self) {
        if let PlaybackState::Playing(index) = self.playback_state() {
            if let Some(output) = &self.output {
                output.pause();
            }
            self.set_state(PlaybackState::Paused(index));
        }
    }

    fn resume(&mut self) {
        if let PlaybackState::Paused(index) = self.playback_state() {
            if let Some(output) = &self.output {
                output.play();
            }
            self.set_state(PlaybackState::Playing(index));
        }
    }

    fn seek(&mut self, pos: Duration) {
        let Some(output) = &self.output else {
            return;
        };
        match output.seek(pos) {
            Ok(()) => self.track_progress.set_current_position(pos),
            Err(e) => warn!(error = %e, "seek_failed"),
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(output) = &self.output {
            output.set_volume(volume);
        }
    }

    fn set_state(&self, new_state: PlaybackState) {
        if let Ok(mut guard) = self.state.write() {
            *guard = new_state;
        }
    }

    /// Moves the current state to another index without touching the
    /// output, used when the track list shifts under the loaded track.
    pub fn retag(&mut self, new_state: PlaybackState) {
        self.set_state(new_state);
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.state
            .read()
            .map(|s| *s)
            .unwrap_or(PlaybackState::Stopped)
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.playback_state(), PlaybackState::Playing(_))
    }

    pub fn has_output(&self) -> bool {
        self.output.is_some()
    }

    pub fn track_progress(&self) -> &Arc<TrackProgress> {
        &self.track_progress
    }
}

impl Drop for AudioController {
    fn drop(&mut self) {
        if let Some(task) = self.current_playback_task.take() {
            task.abort();
        }
        if let Some(task) = self.monitor_task.take() {
            task.abort();
        }
    }
}

async fn start_output(
    output: Arc<dyn PlaybackControl>,
    source: Arc<dyn AudioSource>,
    media: MediaRef,
    progress: Arc<TrackProgress>,
    generation: u64,
) -> Result<Option<Duration>, AudioError> {
    let bytes = source.fetch(&media).await?;
    let hint = media.format_hint();

    tokio::task::spawn_blocking(move || {
        if progress.get_generation() != generation {
            return Ok(None);
        }
        output.start(bytes, hint.as_deref())
    })
    .await
    .map_err(|e| AudioError::Unknown(e.to_string()))?
}
