use std::time::Instant;

use flume::Sender;
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    audio::AudioSystem,
    camera::Camera,
    config::AppConfig,
    event::Event,
    store::{AppState, StateStore},
    ui::{
        artwork::Artwork,
        notification::{NotificationKind, Notifier},
        view_model::{CameraStatus, LiveStatus, ViewModel, project},
    },
    util::task::TaskManager,
};

pub struct AppContext {
    pub state: AppState,
    pub store: Box<dyn StateStore>,
    pub audio: AudioSystem,
    pub camera: Camera,
    pub notifier: Notifier,
    pub event_tx: Sender<Event>,
    pub config: AppConfig,
    pub tasks: TaskManager,
    pub rng: StdRng,
    pub artwork: Artwork,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        store: Box<dyn StateStore>,
        audio: AudioSystem,
        camera: Camera,
        event_tx: Sender<Event>,
    ) -> Self {
        let state = store.load();
        Self {
            state,
            store,
            audio,
            camera,
            notifier: Notifier::new(config.notification_duration),
            event_tx,
            config,
            tasks: TaskManager::new(),
            rng: StdRng::from_os_rng(),
            artwork: Artwork::default(),
        }
    }

    pub fn persist(&mut self) {
        self.store.save(&self.state);
    }

    pub fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) {
        self.notifier.show(message, kind);
    }

    pub fn live_status(&self, now: Instant) -> LiveStatus {
        let progress = self.audio.track_progress();
        LiveStatus {
            playback: self.audio.playback_state(),
            position: progress.position(),
            duration: progress.duration(),
            retrying: self.audio.retry_state() == crate::audio::RetryState::Pending,
            camera: CameraStatus {
                state: self.camera.state(),
                resolution: self.camera.resolution(),
                preview: self.camera.preview(),
            },
            notification: self.notifier.visible(now).cloned(),
            avatar: None,
            cover: None,
        }
    }

    pub fn view_model(&mut self) -> ViewModel {
        let mut live = self.live_status(Instant::now());
        live.avatar = self.artwork.avatar(&self.state.profile.avatar);
        live.cover = self.artwork.cover(self.state.current().map(|t| &t.cover));
        project(&self.state, &live)
    }
}
