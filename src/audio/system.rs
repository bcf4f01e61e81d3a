use crate::{
    audio::{
        commands::AudioCommand,
        controller::AudioController,
        player::{self, DeleteOutcome},
        playback::PlaybackEngine,
        progress::TrackProgress,
        source::MediaLoader,
        state::PlaybackState,
        traits::{AudioSource, PlaybackControl},
    },
    event::Event,
    profile,
    store::AppState,
    util::task::{TaskKey, TaskManager},
};
use flume::Sender;
use std::{sync::Arc, time::Duration};
use tracing::{info, warn};

/// Fallback policy after a failed start: advance once, retry once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    Idle,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureOutcome {
    Retrying { next_index: usize },
    GaveUp,
    /// The failure belongs to a track that has since been replaced.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Paused,
    Resumed,
    Started,
    NothingToPlay,
}

/// Music player module: pure transitions from [`player`] paired with the
/// output commands they imply. Operates on the caller's [`AppState`].
pub struct AudioSystem {
    controller: AudioController,
    event_tx: Sender<Event>,
    retry: RetryState,
    retry_delay: Duration,
    tasks: TaskManager,
}

impl AudioSystem {
    pub fn new(
        output: Option<Arc<dyn PlaybackControl>>,
        source: Arc<dyn AudioSource>,
        event_tx: Sender<Event>,
        retry_delay: Duration,
    ) -> Self {
        let controller = AudioController::new(output, source, event_tx.clone());

        Self {
            controller,
            event_tx,
            retry: RetryState::Idle,
            retry_delay,
            tasks: TaskManager::new(),
        }
    }

    /// Opens the default output device; without one the player still works
    /// but every start fails and is reported.
    pub fn with_default_device(event_tx: Sender<Event>, retry_delay: Duration) -> Self {
        let output: Option<Arc<dyn PlaybackControl>> = match PlaybackEngine::new() {
            Ok(engine) => Some(Arc::new(engine)),
            Err(e) => {
                warn!(error = %e, "audio_output_unavailable");
                None
            }
        };
        Self::new(output, Arc::new(MediaLoader), event_tx, retry_delay)
    }

    /// Applies the persisted volume and resumes playback when autoplay is on
    /// and music was playing when the app last closed.
    pub fn startup(&mut self, state: &mut AppState) {
        self.controller
            .handle_command(AudioCommand::SetVolume(state.volume));
        let resume = state.playing && state.settings.autoplay;
        state.playing = false;
        if resume {
            info!(index = state.current_track, "autoplay_resume");
            self.play(state);
        }
    }

    pub fn play(&mut self, state: &AppState) -> bool {
        let Some(track) = state.current() else {
            return false;
        };
        self.controller.handle_command(AudioCommand::Play {
            index: state.current_track,
            media: track.source.clone(),
        });
        true
    }

    pub fn pause(&mut self, state: &mut AppState) {
        self.controller.handle_command(AudioCommand::Pause);
        state.playing = false;
    }

    pub fn toggle(&mut self, state: &mut AppState) -> Toggle {
        match self.controller.playback_state() {
            PlaybackState::Loading(_) => {
                self.controller.handle_command(AudioCommand::Stop);
                state.playing = false;
                Toggle::Paused
            }
            PlaybackState::Playing(_) => {
                self.pause(state);
                Toggle::Paused
            }
            PlaybackState::Paused(index) if index == state.current_track => {
                self.controller.handle_command(AudioCommand::Resume);
                state.playing = true;
                profile::increment_views(state, 1);
                Toggle::Resumed
            }
            _ => {
                if self.play(state) {
                    Toggle::Started
                } else {
                    Toggle::NothingToPlay
                }
            }
        }
    }

    pub fn next(&mut self, state: &mut AppState) {
        if player::next(state).is_some() {
            self.reload(state);
        }
    }

    pub fn previous(&mut self, state: &mut AppState) {
        if player::previous(state).is_some() {
            self.reload(state);
        }
    }

    pub fn select(&mut self, state: &mut AppState, index: usize) -> bool {
        if player::load_track(state, index).is_none() {
            return false;
        }
        self.play(state)
    }

    /// Called after the current index changed: keeps playing if the player
    /// was playing (or about to), otherwise unloads the old track.
    fn reload(&mut self, state: &mut AppState) {
        let was_active = state.playing
            || matches!(self.controller.playback_state(), PlaybackState::Loading(_));
        if was_active {
            self.play(state);
        } else {
            self.controller.handle_command(AudioCommand::Stop);
        }
    }

    pub fn on_started(&mut self, state: &mut AppState, generation: u64) -> bool {
        if self.is_stale(generation) {
            return false;
        }
        state.playing = true;
        self.retry = RetryState::Idle;
        profile::increment_views(state, 1);
        true
    }

    pub fn on_failed(&mut self, state: &mut AppState, generation: u64) -> FailureOutcome {
        if self.is_stale(generation) {
            return FailureOutcome::Stale;
        }
        state.playing = false;

        match self.retry {
            RetryState::Pending => {
                self.retry = RetryState::Idle;
                FailureOutcome::GaveUp
            }
            RetryState::Idle => {
                let Some(next_index) = player::next(state) else {
                    return FailureOutcome::GaveUp;
                };
                self.retry = RetryState::Pending;
                let tx = self.event_tx.clone();
                let delay = self.retry_delay;
                self.tasks.spawn(
                    TaskKey::PlaybackRetry,
                    tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        let _ = tx.send(Event::RetryPlayback);
                    }),
                );
                FailureOutcome::Retrying { next_index }
            }
        }
    }

    pub fn on_retry(&mut self, state: &AppState) -> bool {
        if self.retry != RetryState::Pending {
            return false;
        }
        self.play(state)
    }

    pub fn on_track_ended(&mut self, state: &mut AppState, generation: u64) {
        if self.is_stale(generation) {
            return;
        }
        if player::next(state).is_some() {
            self.play(state);
        }
    }

    /// Seeks to `fraction` of the track. No-op while the duration is unknown.
    pub fn seek(&mut self, fraction: f64) -> bool {
        let duration = self.controller.track_progress().duration();
        match player::seek_position(fraction, duration) {
            Some(position) => {
                self.controller.handle_command(AudioCommand::Seek(position));
                true
            }
            None => false,
        }
    }

    pub fn seek_by(&mut self, delta: f64) -> bool {
        let ratio = self.controller.track_progress().ratio();
        self.seek(ratio + delta)
    }

    pub fn set_volume(&mut self, state: &mut AppState, volume: f32) -> f32 {
        let volume = player::set_volume(state, volume);
        self.controller
            .handle_command(AudioCommand::SetVolume(volume));
        volume
    }

    pub fn delete_track(
        &mut self,
        state: &mut AppState,
        index: usize,
    ) -> Result<DeleteOutcome, crate::audio::error::PlayerError> {
        let outcome = player::delete_track(state, index)?;
        match outcome {
            DeleteOutcome::Emptied => {
                self.controller.handle_command(AudioCommand::Stop);
                state.playing = false;
            }
            DeleteOutcome::CurrentRemoved => self.reload(state),
            DeleteOutcome::Shifted => {
                // The loaded track keeps playing under its new index.
                if let PlaybackState::Playing(_) | PlaybackState::Paused(_) =
                    self.controller.playback_state()
                {
                    self.retag(state.current_track);
                }
            }
            DeleteOutcome::Other => {}
        }
        Ok(outcome)
    }

    fn retag(&mut self, index: usize) {
        let retagged = match self.controller.playback_state() {
            PlaybackState::Playing(_) => PlaybackState::Playing(index),
            PlaybackState::Paused(_) => PlaybackState::Paused(index),
            other => other,
        };
        self.controller.retag(retagged);
    }

    /// Teardown: silences the output but keeps `state.playing` so autoplay
    /// can pick up where the session ended.
    pub fn shutdown(&mut self) {
        self.tasks.abort_all();
        self.controller.handle_command(AudioCommand::Pause);
    }

    fn is_stale(&self, generation: u64) -> bool {
        self.controller.track_progress().get_generation() != generation
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.controller.playback_state()
    }

    pub fn is_playing(&self) -> bool {
        self.controller.is_playing()
    }

    pub fn retry_state(&self) -> RetryState {
        self.retry
    }

    pub fn has_output(&self) -> bool {
        self.controller.has_output()
    }

    pub fn track_progress(&self) -> &Arc<TrackProgress> {
        self.controller.track_progress()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        audio::error::AudioError,
        store::{MediaRef, Track},
    };
    use async_trait::async_trait;
    use flume::Receiver;
    use std::sync::Mutex;

    const BROKEN: &str = "broken";

    struct EchoSource;

    #[async_trait]
    impl AudioSource for EchoSource {
        async fn fetch(&self, media: &MediaRef) -> Result<Vec<u8>, AudioError> {
            match media {
                MediaRef::Path(p) => Ok(p.as_bytes().to_vec()),
                MediaRef::Embedded { .. } => media
                    .bytes()
                    .map_err(|e| AudioError::SourceUnavailable(e.to_string())),
            }
        }
    }

    #[derive(Default)]
    struct FakeOutput {
        started: Mutex<Vec<String>>,
        known_duration: bool,
    }

    impl PlaybackControl for FakeOutput {
        fn start(&self, data: Vec<u8>, _hint: Option<&str>) -> Result<Option<Duration>, AudioError> {
            let name = String::from_utf8_lossy(&data).to_string();
            if name == BROKEN {
                return Err(AudioError::DecodingError("unsupported format".to_string()));
            }
            self.started.lock().unwrap().push(name);
            Ok(self.known_duration.then(|| Duration::from_secs(200)))
        }
        fn play(&self) {}
        fn pause(&self) {}
        fn stop(&self) {}
        fn seek(&self, _position: Duration) -> Result<(), AudioError> {
            Ok(())
        }
        fn set_volume(&self, _volume: f32) {}
        fn position(&self) -> Duration {
            Duration::ZERO
        }
        fn is_finished(&self) -> bool {
            false
        }
    }

    fn state_with(sources: &[&str]) -> AppState {
        let mut state = AppState::default();
        state.tracks = sources
            .iter()
            .map(|s| Track {
                title: s.to_string(),
                artist: "test".to_string(),
                source: MediaRef::path(*s),
                cover: MediaRef::path("cover.png"),
            })
            .collect();
        state
    }

    fn fixture(known_duration: bool) -> (AudioSystem, Arc<FakeOutput>, Receiver<Event>) {
        let (tx, rx) = flume::unbounded();
        let output = Arc::new(FakeOutput {
            known_duration,
            ..FakeOutput::default()
        });
        let system = AudioSystem::new(
            Some(output.clone()),
            Arc::new(EchoSource),
            tx,
            Duration::from_millis(10),
        );
        (system, output, rx)
    }

    async fn recv(rx: &Receiver<Event>) -> Event {
        tokio::time::timeout(Duration::from_secs(2), rx.recv_async())
            .await
            .expect("event in time")
            .expect("channel open")
    }

    fn apply(system: &mut AudioSystem, state: &mut AppState, event: Event) {
        match event {
            Event::TrackStarted { generation, .. } => {
                system.on_started(state, generation);
            }
            Event::PlaybackFailed { generation, .. } => {
                system.on_failed(state, generation);
            }
            Event::RetryPlayback => {
                system.on_retry(state);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test]
    async fn successful_start_counts_a_view() {
        let (mut system, output, rx) = fixture(true);
        let mut state = state_with(&["a", "b"]);

        assert_eq!(system.toggle(&mut state), Toggle::Started);
        let event = recv(&rx).await;
        assert!(matches!(event, Event::TrackStarted { index: 0, .. }));
        apply(&mut system, &mut state, event);

        assert!(state.playing);
        assert_eq!(state.profile.views, 1251);
        assert_eq!(output.started.lock().unwrap().as_slice(), ["a"]);
        assert!(system.is_playing());
    }

    #[tokio::test]
    async fn failed_start_advances_and_retries_once() {
        let (mut system, output, rx) = fixture(true);
        let mut state = state_with(&[BROKEN, "good"]);

        system.play(&state);
        let failed = recv(&rx).await;
        let Event::PlaybackFailed { generation, .. } = failed else {
            panic!("expected failure, got {failed:?}");
        };
        assert_eq!(
            system.on_failed(&mut state, generation),
            FailureOutcome::Retrying { next_index: 1 }
        );
        assert_eq!(system.retry_state(), RetryState::Pending);

        assert_eq!(recv(&rx).await, Event::RetryPlayback);
        assert!(system.on_retry(&state));

        let started = recv(&rx).await;
        assert!(matches!(started, Event::TrackStarted { index: 1, .. }));
        apply(&mut system, &mut state, started);

        assert_eq!(system.retry_state(), RetryState::Idle);
        assert_eq!(output.started.lock().unwrap().as_slice(), ["good"]);
    }

    #[tokio::test]
    async fn second_failure_gives_up() {
        let (mut system, _output, rx) = fixture(true);
        let mut state = state_with(&[BROKEN, BROKEN]);

        system.play(&state);
        let event = recv(&rx).await;
        apply(&mut system, &mut state, event);
        let event = recv(&rx).await;
        assert_eq!(event, Event::RetryPlayback);
        apply(&mut system, &mut state, event);

        let Event::PlaybackFailed { generation, .. } = recv(&rx).await else {
            panic!("expected second failure");
        };
        assert_eq!(system.on_failed(&mut state, generation), FailureOutcome::GaveUp);
        assert!(!state.playing);

        let more = tokio::time::timeout(Duration::from_millis(100), rx.recv_async()).await;
        assert!(more.is_err(), "no further retry expected");
    }

    #[tokio::test]
    async fn next_while_playing_starts_next_track() {
        let (mut system, output, rx) = fixture(true);
        let mut state = state_with(&["a", "b"]);

        system.play(&state);
        let event = recv(&rx).await;
        apply(&mut system, &mut state, event);

        system.next(&mut state);
        assert_eq!(state.current_track, 1);
        let event = recv(&rx).await;
        assert!(matches!(event, Event::TrackStarted { index: 1, .. }));
        apply(&mut system, &mut state, event);

        system.next(&mut state);
        assert_eq!(state.current_track, 0);
        let event = recv(&rx).await;
        apply(&mut system, &mut state, event);
        assert_eq!(output.started.lock().unwrap().as_slice(), ["a", "b", "a"]);
    }

    #[tokio::test]
    async fn next_while_stopped_only_moves_the_index() {
        let (mut system, _output, rx) = fixture(true);
        let mut state = state_with(&["a", "b"]);

        system.next(&mut state);
        assert_eq!(state.current_track, 1);
        assert_eq!(system.playback_state(), PlaybackState::Stopped);
        assert!(rx.is_empty());
    }

    #[tokio::test]
    async fn stale_results_are_ignored() {
        let (mut system, _output, rx) = fixture(true);
        let mut state = state_with(&["a", "b"]);

        system.play(&state);
        let Event::TrackStarted { generation, .. } = recv(&rx).await else {
            panic!("expected start");
        };
        system.play(&state);

        assert!(!system.on_started(&mut state, generation));
        assert_eq!(state.profile.views, 1250);
    }

    #[tokio::test]
    async fn seek_is_a_no_op_without_duration() {
        let (mut system, _output, rx) = fixture(false);
        let mut state = state_with(&["a"]);

        system.play(&state);
        let event = recv(&rx).await;
        apply(&mut system, &mut state, event);
        assert!(!system.seek(0.5));

        let (mut system, _output, rx) = fixture(true);
        system.play(&state);
        let event = recv(&rx).await;
        apply(&mut system, &mut state, event);
        assert!(system.seek(0.5));
    }

    #[tokio::test]
    async fn deleting_the_only_playing_track_stops() {
        let (mut system, _output, rx) = fixture(true);
        let mut state = state_with(&["a"]);

        system.play(&state);
        let event = recv(&rx).await;
        apply(&mut system, &mut state, event);

        assert_eq!(system.delete_track(&mut state, 0), Ok(DeleteOutcome::Emptied));
        assert_eq!(system.playback_state(), PlaybackState::Stopped);
        assert!(!state.playing);
        assert_eq!(state.current_track, 0);
    }

    #[tokio::test]
    async fn deleting_an_earlier_track_keeps_playing_the_same_one() {
        let (mut system, _output, rx) = fixture(true);
        let mut state = state_with(&["a", "b", "c"]);
        state.current_track = 2;

        system.play(&state);
        let event = recv(&rx).await;
        apply(&mut system, &mut state, event);

        assert_eq!(system.delete_track(&mut state, 0), Ok(DeleteOutcome::Shifted));
        assert_eq!(state.current().map(|t| t.title.as_str()), Some("c"));
        assert_eq!(system.playback_state(), PlaybackState::Playing(1));
    }

    #[tokio::test]
    async fn volume_is_clamped_into_state() {
        let (mut system, _output, _rx) = fixture(true);
        let mut state = state_with(&["a"]);
        assert_eq!(system.set_volume(&mut state, 1.7), 1.0);
        assert_eq!(state.volume, 1.0);
        assert_eq!(system.set_volume(&mut state, -1.0), 0.0);
    }
}
