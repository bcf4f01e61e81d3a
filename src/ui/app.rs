use flume::Receiver;
use ratatui::Frame;
use tracing::info;

use crate::{
    audio::{AudioSystem, Toggle},
    camera::{self, Camera, Resolution},
    config::AppConfig,
    event::Event,
    store::open_store,
    ui::{
        context::AppContext,
        layout::AppLayout,
        message::AppMessage,
        notification::NotificationKind,
        router::Router,
        state::{Section, UiState},
        traits::View,
        tui::{self, TerminalEvent},
        util::handler::EventHandler,
        views::{CameraView, MusicView, PlaylistView, ProfileView, SettingsView, SocialView},
    },
    util::task::TaskKey,
};

pub struct App {
    pub ctx: AppContext,
    pub ui: UiState,
    pub router: Router,
    pub event_rx: Receiver<Event>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> color_eyre::Result<Self> {
        let (event_tx, event_rx) = flume::unbounded();
        let store = open_store(config.data_dir().as_deref());
        let audio = AudioSystem::with_default_device(event_tx.clone(), config.retry_delay);
        let camera = Camera::new(
            camera::default_device(),
            Resolution {
                width: config.capture_width,
                height: config.capture_height,
            },
        );

        let ctx = AppContext::new(config, store, audio, camera, event_tx);
        Ok(Self::with_context(ctx, event_rx))
    }

    pub fn with_context(ctx: AppContext, event_rx: Receiver<Event>) -> Self {
        let sections: Vec<Box<dyn View>> = vec![
            Box::new(ProfileView::default()),
            Box::new(MusicView),
            Box::new(CameraView::default()),
            Box::new(SettingsView::default()),
        ];

        Self {
            ctx,
            ui: UiState::default(),
            router: Router::new(sections),
            event_rx,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = tui::Tui::new(self.ctx.config.tick_rate)?
            .mouse(true)
            .paste(true);
        tui.enter()?;

        EventHandler::handle_event(self, TerminalEvent::Init, &mut tui).await?;
        while !self.should_quit {
            tui.draw(|f| {
                self.ui(f);
            })?;

            EventHandler::handle_events(self, &mut tui).await?;
        }

        self.teardown();
        tui.exit()?;
        Ok(())
    }

    fn ui(&mut self, frame: &mut Frame) {
        let vm = self.ctx.view_model();
        let area = frame.area();
        AppLayout::new(self).render(frame, area, &vm);
    }

    pub fn startup(&mut self) {
        self.ctx.audio.startup(&mut self.ctx.state);
        self.ctx.persist();
        self.start_view_jitter();

        let greeting = format!("Welcome, {}!", self.ctx.state.profile.name);
        self.ctx.notify(greeting, NotificationKind::Success);
        info!(
            tracks = self.ctx.state.tracks.len(),
            photos = self.ctx.state.photos.len(),
            "startup_complete"
        );
    }

    fn start_view_jitter(&mut self) {
        if !self.ctx.config.view_jitter {
            return;
        }
        let event_tx = self.ctx.event_tx.clone();
        let period = self.ctx.config.jitter_interval;

        self.ctx.tasks.spawn(
            TaskKey::ViewJitter,
            tokio::spawn(async move {
                let start = tokio::time::Instant::now() + period;
                let mut interval = tokio::time::interval_at(start, period);
                loop {
                    interval.tick().await;
                    if event_tx.send(Event::ViewJitter).is_err() {
                        break;
                    }
                }
            }),
        );
    }

    pub fn teardown(&mut self) {
        self.ctx.tasks.abort_all();
        self.ctx.camera.stop();
        self.ctx.audio.shutdown();
        self.ctx.persist();
        info!("teardown_complete");
    }

    pub async fn update(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Quit => self.should_quit = true,
            AppMessage::TogglePlayPause => self.toggle_playback(),
            AppMessage::NextTrack => {
                self.ctx.audio.next(&mut self.ctx.state);
                self.ctx.persist();
            }
            AppMessage::PreviousTrack => {
                self.ctx.audio.previous(&mut self.ctx.state);
                self.ctx.persist();
            }
            AppMessage::VolumeUp => self.change_volume(self.ctx.config.volume_step),
            AppMessage::VolumeDown => self.change_volume(-self.ctx.config.volume_step),
            AppMessage::SeekForward => {
                self.ctx.audio.seek_by(self.ctx.config.seek_step);
            }
            AppMessage::SeekBackward => {
                self.ctx.audio.seek_by(-self.ctx.config.seek_step);
            }
            AppMessage::ToggleTheme => {
                let theme = self.ctx.state.settings.theme.toggled();
                self.set_theme(theme);
            }
            AppMessage::NextSection => self.set_section(self.ui.section.next()).await,
            AppMessage::PreviousSection => self.set_section(self.ui.section.previous()).await,
            AppMessage::SetSection(section) => self.set_section(section).await,
            AppMessage::OpenPlaylist => self.open_overlay(Box::new(PlaylistView::default())),
            AppMessage::OpenSocialLinks => self.open_overlay(Box::new(SocialView::default())),
            AppMessage::GoBack => self.router.pop_overlay(),
        }
    }

    pub fn toggle_playback(&mut self) {
        match self.ctx.audio.toggle(&mut self.ctx.state) {
            Toggle::NothingToPlay => {
                self.ctx.notify("No tracks to play", NotificationKind::Info);
            }
            _ => self.ctx.persist(),
        }
    }

    pub fn change_volume(&mut self, delta: f32) {
        let volume = self.ctx.state.volume + delta;
        self.ctx.audio.set_volume(&mut self.ctx.state, volume);
        self.ctx.persist();
    }

    pub fn set_theme(&mut self, theme: crate::store::Theme) {
        self.ctx.state.settings.theme = theme;
        self.ctx.persist();
        self.ctx.notify(
            format!("Switched to {} theme", theme.label()),
            NotificationKind::Success,
        );
    }

    pub fn open_overlay(&mut self, view: Box<dyn View>) {
        self.router.clear_overlays();
        self.router.push_overlay(view);
    }

    /// The camera stream lives only while its section is shown.
    pub async fn set_section(&mut self, section: Section) {
        self.router.clear_overlays();
        if section == self.ui.section {
            return;
        }
        let leaving = self.ui.section;
        self.ui.section = section;

        if leaving == Section::Camera {
            self.ctx.camera.stop();
        }
        if section == Section::Camera {
            self.open_camera().await;
        }
    }

    pub async fn open_camera(&mut self) {
        let facing = self.ctx.state.facing;
        match self.ctx.camera.open(facing).await {
            Ok(_) => self.ctx.notify("Camera ready", NotificationKind::Success),
            Err(e) => self.ctx.notify(e.to_string(), NotificationKind::Error),
        }
    }
}
