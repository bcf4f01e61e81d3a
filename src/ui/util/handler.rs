use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use crossterm::event::KeyCode;
use ratatui::crossterm::event::{KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};
use tracing::{debug, warn};

use crate::{
    audio::{FailureOutcome, player},
    camera::{self, CameraError},
    event::Event,
    profile,
    store::{MediaError, MediaRef, Upload},
    ui::{
        app::App,
        input::InputHandler,
        message::AppMessage,
        notification::NotificationKind,
        state::ConfirmAction,
        traits::Action,
        tui::{TerminalEvent, Tui},
        views::ConfirmView,
    },
};

pub struct EventHandler;

impl EventHandler {
    pub async fn handle_events(app: &mut App, tui: &mut Tui) -> color_eyre::Result<bool> {
        let mut should_render = false;
        if let Some(evt) = tui.next().await {
            if Self::handle_event(app, evt, tui).await? {
                should_render = true;
            }
        }

        while let Ok(evt) = app.event_rx.try_recv() {
            Self::handle_action(app, evt).await;
            should_render = true;
        }

        Ok(should_render)
    }

    pub async fn handle_event(
        app: &mut App,
        evt: TerminalEvent,
        tui: &mut Tui,
    ) -> color_eyre::Result<bool> {
        match evt {
            TerminalEvent::Init => app.startup(),
            TerminalEvent::FocusGained => tui.clear()?,
            TerminalEvent::Key(key) => Self::handle_key_event(app, key).await,
            TerminalEvent::Mouse(mouse) => Self::handle_mouse_event(app, mouse),
            TerminalEvent::Paste(text) => {
                app.router.handle_paste(&text, app.ui.section);
            }
            TerminalEvent::Tick => {
                let expired = app.ctx.notifier.expire(Instant::now());
                let live = app.ctx.audio.is_playing() || app.ctx.camera.is_open();
                return Ok(expired || live);
            }
            TerminalEvent::FocusLost | TerminalEvent::Resize(..) => {}
        }

        Ok(true)
    }

    /// Outcomes of background work. Stale playback results are dropped by
    /// the audio module before they touch the state.
    pub async fn handle_action(app: &mut App, evt: Event) {
        match evt {
            Event::TrackStarted {
                index,
                generation,
                duration,
            } => {
                if app.ctx.audio.on_started(&mut app.ctx.state, generation) {
                    debug!(index, ?duration, "track_started");
                    app.ctx.persist();
                }
            }
            Event::PlaybackFailed {
                index,
                generation,
                reason,
            } => match app.ctx.audio.on_failed(&mut app.ctx.state, generation) {
                FailureOutcome::Retrying { next_index } => {
                    warn!(index, next_index, %reason, "playback_failed_retrying");
                    app.ctx.notify(
                        "Could not play this track, trying the next one",
                        NotificationKind::Warning,
                    );
                    app.ctx.persist();
                }
                FailureOutcome::GaveUp => {
                    app.ctx
                        .notify(format!("Playback failed: {reason}"), NotificationKind::Error);
                    app.ctx.persist();
                }
                FailureOutcome::Stale => {}
            },
            Event::RetryPlayback => {
                app.ctx.audio.on_retry(&app.ctx.state);
            }
            Event::TrackEnded { generation } => {
                app.ctx.audio.on_track_ended(&mut app.ctx.state, generation);
                app.ctx.persist();
            }
            Event::ViewJitter => {
                if profile::jitter_tick(&mut app.ctx.state, &mut app.ctx.rng) {
                    app.ctx.persist();
                }
            }
        }
    }

    pub(crate) async fn handle_key_event(app: &mut App, evt: KeyEvent) {
        if evt.kind != KeyEventKind::Press {
            return;
        }
        if evt.code == KeyCode::Char('c') && evt.modifiers == KeyModifiers::CONTROL {
            app.update(AppMessage::Quit).await;
            return;
        }

        if app.ctx.config.view_jitter
            && profile::click_jitter(&mut app.ctx.state, &mut app.ctx.rng)
        {
            app.ctx.persist();
        }

        let section = app.ui.section;

        // A focused text field receives every key.
        if app.router.is_editing(section) {
            let vm = app.ctx.view_model();
            if let Some(action) = app.router.handle_input(evt, section, &vm) {
                Self::dispatch_action(app, action).await;
            }
            return;
        }

        if !app.router.has_overlay() {
            match evt.code {
                KeyCode::Tab => {
                    app.update(AppMessage::NextSection).await;
                    return;
                }
                KeyCode::BackTab => {
                    app.update(AppMessage::PreviousSection).await;
                    return;
                }
                _ => {}
            }
        }

        let vm = app.ctx.view_model();
        if let Some(action) = app.router.handle_input(evt, section, &vm) {
            Self::dispatch_action(app, action).await;
            return;
        }

        if let Some(msg) = InputHandler::handle_key(evt) {
            app.update(msg).await;
        }
    }

    pub(crate) async fn dispatch_action(app: &mut App, action: Action) {
        match action {
            Action::None => {}
            Action::PlayPause => app.toggle_playback(),
            Action::NextTrack => app.update(AppMessage::NextTrack).await,
            Action::PreviousTrack => app.update(AppMessage::PreviousTrack).await,
            Action::SelectTrack(index) => {
                if app.ctx.audio.select(&mut app.ctx.state, index) {
                    app.ctx.persist();
                }
            }
            Action::SeekTo(fraction) => {
                app.ctx.audio.seek(fraction.clamp(0.0, 1.0));
            }
            Action::AddTrack(path) => Self::add_track(app, PathBuf::from(path)).await,
            Action::OpenPlaylist => app.update(AppMessage::OpenPlaylist).await,
            Action::OpenSocialLinks => app.update(AppMessage::OpenSocialLinks).await,
            Action::OpenSocialLink(index) => {
                match profile::open_social_link(&app.ctx.state, index) {
                    Ok(()) => app.ctx.notify("Opening link…", NotificationKind::Info),
                    Err(e) => app.ctx.notify(e.to_string(), NotificationKind::Error),
                }
            }
            Action::AddSocialLink { platform, url } => {
                match profile::add_social_link(&mut app.ctx.state, platform, &url) {
                    Ok(_) => {
                        app.ctx.persist();
                        app.router.reset_active(app.ui.section);
                        app.ctx.notify("Link added", NotificationKind::Success);
                    }
                    Err(e) => app.ctx.notify(e.to_string(), NotificationKind::Error),
                }
            }
            Action::CapturePhoto => Self::capture_photo(app).await,
            Action::SwitchCamera => match app.ctx.camera.switch(&mut app.ctx.state).await {
                Ok(true) => {
                    app.ctx.persist();
                    let facing = app.ctx.state.facing.label();
                    app.ctx
                        .notify(format!("Switched to {facing} camera"), NotificationKind::Info);
                }
                Ok(false) => app.ctx.notify("Camera is off", NotificationKind::Info),
                Err(e) => {
                    app.ctx.persist();
                    app.ctx.notify(e.to_string(), NotificationKind::Error);
                }
            },
            Action::OpenCamera => app.open_camera().await,
            Action::ExportPhoto(index) => match Self::export(app, index).await {
                Ok(path) => app.ctx.notify(
                    format!("Saved to {}", path.display()),
                    NotificationKind::Success,
                ),
                Err(e) => app.ctx.notify(e.to_string(), NotificationKind::Error),
            },
            Action::SaveProfile {
                name,
                bio,
                avatar,
                cover,
            } => Self::save_profile(app, &name, &bio, &avatar, &cover).await,
            Action::SetTheme(theme) => app.set_theme(theme),
            Action::ToggleAutoplay => {
                let settings = &mut app.ctx.state.settings;
                settings.autoplay = !settings.autoplay;
                let label = if settings.autoplay { "on" } else { "off" };
                app.ctx.persist();
                app.ctx
                    .notify(format!("Autoplay {label}"), NotificationKind::Info);
            }
            Action::ToggleSavePhotos => {
                let settings = &mut app.ctx.state.settings;
                settings.save_photos = !settings.save_photos;
                let label = if settings.save_photos { "on" } else { "off" };
                app.ctx.persist();
                app.ctx
                    .notify(format!("Save photos {label}"), NotificationKind::Info);
            }
            Action::Confirm(confirm) => {
                let prompt = confirm.prompt(&app.ctx.state);
                app.router
                    .push_overlay(Box::new(ConfirmView::new(confirm, prompt)));
            }
            Action::Confirmed(confirm) => {
                app.router.pop_overlay();
                Self::confirmed(app, confirm);
            }
            Action::Close => app.router.pop_overlay(),
        }
    }

    fn confirmed(app: &mut App, confirm: ConfirmAction) {
        let result = match confirm {
            ConfirmAction::DeleteTrack(index) => app
                .ctx
                .audio
                .delete_track(&mut app.ctx.state, index)
                .map(|_| "Track deleted")
                .map_err(|e| e.to_string()),
            ConfirmAction::DeleteSocialLink(index) => {
                profile::delete_social_link(&mut app.ctx.state, index)
                    .map(|_| "Link deleted")
                    .ok_or_else(|| profile::ProfileError::NoSuchLink(index).to_string())
            }
            ConfirmAction::DeletePhoto(index) => camera::delete_photo(&mut app.ctx.state, index)
                .map(|_| "Photo deleted")
                .map_err(|e| e.to_string()),
        };

        match result {
            Ok(message) => {
                app.ctx.persist();
                app.ctx.notify(message, NotificationKind::Success);
            }
            Err(message) => app.ctx.notify(message, NotificationKind::Error),
        }
    }

    async fn add_track(app: &mut App, path: PathBuf) {
        let read = tokio::task::spawn_blocking(move || Upload::read(&path)).await;
        let upload = match read {
            Ok(Ok(upload)) => upload,
            Ok(Err(e)) => return app.ctx.notify(e.to_string(), NotificationKind::Error),
            Err(e) => return app.ctx.notify(e.to_string(), NotificationKind::Error),
        };

        match player::add_track(&mut app.ctx.state, &upload) {
            Ok(index) => {
                app.ctx.persist();
                app.router.reset_active(app.ui.section);
                let title = app
                    .ctx
                    .state
                    .tracks
                    .get(index)
                    .map(|t| t.title.clone())
                    .unwrap_or_default();
                app.ctx
                    .notify(format!("Added \"{title}\""), NotificationKind::Success);
            }
            Err(e) => app.ctx.notify(e.to_string(), NotificationKind::Error),
        }
    }

    async fn capture_photo(app: &mut App) {
        let index = match app.ctx.camera.capture_photo(&mut app.ctx.state) {
            Ok(Some(index)) => index,
            Ok(None) => return app.ctx.notify("Camera is off", NotificationKind::Info),
            Err(e) => return app.ctx.notify(e.to_string(), NotificationKind::Error),
        };
        app.ctx.persist();

        if !app.ctx.state.settings.save_photos {
            app.ctx.notify("Photo captured", NotificationKind::Success);
            return;
        }
        match Self::export(app, index).await {
            Ok(path) => app.ctx.notify(
                format!("Photo saved to {}", path.display()),
                NotificationKind::Success,
            ),
            Err(e) => app.ctx.notify(
                format!("Photo captured but not saved: {e}"),
                NotificationKind::Warning,
            ),
        }
    }

    async fn export(app: &App, index: usize) -> Result<PathBuf, CameraError> {
        let photo = app
            .ctx
            .state
            .photos
            .get(index)
            .cloned()
            .ok_or(CameraError::NoSuchPhoto(index))?;
        let dir = app
            .ctx
            .config
            .export_dir()
            .ok_or_else(|| CameraError::Io(std::io::Error::other("no export directory")))?;

        tokio::task::spawn_blocking(move || camera::export_photo(&photo, &dir))
            .await
            .map_err(|e| CameraError::Io(std::io::Error::other(e)))?
    }

    /// Reads both images before touching the state, so a bad path leaves
    /// the whole form unapplied.
    async fn save_profile(app: &mut App, name: &str, bio: &str, avatar: &str, cover: &str) {
        let (avatar, cover) = match (load_media(avatar).await, load_media(cover).await) {
            (Ok(avatar), Ok(cover)) => (avatar, cover),
            (Err(e), _) | (_, Err(e)) => {
                return app.ctx.notify(e.to_string(), NotificationKind::Error);
            }
        };

        if let Some(cover) = &cover {
            if !cover.mime().starts_with("image/") {
                let e = profile::ProfileError::NotAnImage(cover.mime().to_string());
                return app.ctx.notify(e.to_string(), NotificationKind::Error);
            }
            if app.ctx.state.current().is_none() {
                return app
                    .ctx
                    .notify("No track to set a cover for", NotificationKind::Error);
            }
        }
        if let Some(avatar) = avatar
            && let Err(e) = profile::set_avatar(&mut app.ctx.state, avatar)
        {
            return app.ctx.notify(e.to_string(), NotificationKind::Error);
        }

        profile::update_profile(&mut app.ctx.state, name, bio);
        if let Some(cover) = cover
            && let Err(e) = player::set_cover(&mut app.ctx.state, cover)
        {
            app.ctx.notify(e.to_string(), NotificationKind::Error);
        }

        app.ctx.persist();
        app.router.reset_active(app.ui.section);
        app.ctx.notify("Settings saved", NotificationKind::Success);
    }

    fn handle_mouse_event(app: &mut App, evt: MouseEvent) {
        let seek = app.ctx.config.seek_step;
        let volume = app.ctx.config.volume_step;
        match (evt.kind, evt.modifiers) {
            (MouseEventKind::ScrollUp, KeyModifiers::SHIFT) => {
                app.ctx.audio.seek_by(seek);
            }
            (MouseEventKind::ScrollUp, _) => app.change_volume(volume),
            (MouseEventKind::ScrollDown, KeyModifiers::SHIFT) => {
                app.ctx.audio.seek_by(-seek);
            }
            (MouseEventKind::ScrollDown, _) => app.change_volume(-volume),
            _ => {}
        }
    }
}

/// Blank input means "keep the current image".
async fn load_media(path: &str) -> Result<Option<MediaRef>, MediaError> {
    let path = path.trim();
    if path.is_empty() {
        return Ok(None);
    }
    let path = Path::new(path).to_path_buf();
    let requested = path.clone();
    tokio::task::spawn_blocking(move || MediaRef::from_file(&path))
        .await
        .map_err(|e| MediaError::Io {
            path: requested,
            source: std::io::Error::other(e),
        })?
        .map(Some)
}
