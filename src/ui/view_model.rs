//! Everything the widgets draw, derived from `AppState` plus a few live
//! readings. Building a model never mutates anything, so rebuilding it from
//! the same inputs yields the same model.

use std::time::Duration;

use crate::{
    audio::PlaybackState,
    camera::{CameraState, Frame, Resolution},
    profile::social_rows,
    store::{AppState, Theme},
    ui::notification::Notification,
    util::format::{format_time, format_views},
};

pub const NO_LINKS: &str = "No links added";
pub const NO_TRACKS: &str = "No tracks";
pub const NO_PHOTOS: &str = "No photos yet";

#[derive(Debug, Clone, PartialEq)]
pub struct LiveStatus {
    pub playback: PlaybackState,
    pub position: Duration,
    pub duration: Option<Duration>,
    pub retrying: bool,
    pub camera: CameraStatus,
    pub notification: Option<Notification>,
    pub avatar: Option<Frame>,
    pub cover: Option<Frame>,
}

impl Default for LiveStatus {
    fn default() -> Self {
        Self {
            playback: PlaybackState::Stopped,
            position: Duration::ZERO,
            duration: None,
            retrying: false,
            camera: CameraStatus::default(),
            notification: None,
            avatar: None,
            cover: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraStatus {
    pub state: CameraState,
    pub resolution: Option<Resolution>,
    pub preview: Option<Frame>,
}

impl Default for CameraStatus {
    fn default() -> Self {
        Self {
            state: CameraState::Closed,
            resolution: None,
            preview: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinkRow {
    pub icon: &'static str,
    pub name: &'static str,
    pub color: Option<u32>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileModel {
    pub name: String,
    pub bio: String,
    pub avatar: String,
    pub avatar_image: Option<Frame>,
    pub views: String,
    pub links: Vec<LinkRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerModel {
    pub title: String,
    pub artist: String,
    pub cover: String,
    pub cover_image: Option<Frame>,
    pub playing: bool,
    pub loading: bool,
    pub retrying: bool,
    pub elapsed: String,
    pub total: String,
    pub ratio: f64,
    pub volume: f32,
    pub volume_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackRow {
    pub title: String,
    pub artist: String,
    pub uploaded: bool,
    pub current: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhotoRow {
    pub id: u64,
    pub timestamp: String,
    pub size: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraModel {
    pub open: bool,
    pub facing: &'static str,
    pub status: String,
    pub preview: Option<Frame>,
    pub photos: Vec<PhotoRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettingsModel {
    pub theme: Theme,
    pub autoplay: bool,
    pub save_photos: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub theme: Theme,
    pub profile: ProfileModel,
    pub player: PlayerModel,
    pub tracks: Vec<TrackRow>,
    pub camera: CameraModel,
    pub settings: SettingsModel,
    pub notification: Option<Notification>,
}

pub fn project(state: &AppState, live: &LiveStatus) -> ViewModel {
    ViewModel {
        theme: state.settings.theme,
        profile: project_profile(state, live),
        player: project_player(state, live),
        tracks: state
            .tracks
            .iter()
            .enumerate()
            .map(|(i, track)| TrackRow {
                title: track.title.clone(),
                artist: track.artist.clone(),
                uploaded: track.source.is_embedded(),
                current: i == state.current_track,
            })
            .collect(),
        camera: project_camera(state, live),
        settings: SettingsModel {
            theme: state.settings.theme,
            autoplay: state.settings.autoplay,
            save_photos: state.settings.save_photos,
        },
        notification: live.notification.clone(),
    }
}

fn project_profile(state: &AppState, live: &LiveStatus) -> ProfileModel {
    ProfileModel {
        name: state.profile.name.clone(),
        bio: state.profile.bio.clone(),
        avatar: state.profile.avatar.describe(),
        avatar_image: live.avatar.clone(),
        views: format_views(state.profile.views),
        links: social_rows(state)
            .map(|row| LinkRow {
                icon: row.icon,
                name: row.name,
                color: row.color,
                url: row.url.to_string(),
            })
            .collect(),
    }
}

fn project_player(state: &AppState, live: &LiveStatus) -> PlayerModel {
    let (title, artist, cover) = match state.current() {
        Some(track) => (
            track.title.clone(),
            track.artist.clone(),
            track.cover.describe(),
        ),
        None => (NO_TRACKS.to_string(), String::new(), String::new()),
    };

    let ratio = match live.duration {
        Some(total) if !total.is_zero() => {
            (live.position.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
        }
        _ => 0.0,
    };

    PlayerModel {
        title,
        artist,
        cover,
        cover_image: live.cover.clone(),
        playing: matches!(live.playback, PlaybackState::Playing(_)),
        loading: matches!(live.playback, PlaybackState::Loading(_)),
        retrying: live.retrying,
        elapsed: format_time(Some(live.position)),
        total: format_time(live.duration),
        ratio,
        volume: state.volume,
        volume_label: format!("{}%", (state.volume * 100.0).round() as u32),
    }
}

fn project_camera(state: &AppState, live: &LiveStatus) -> CameraModel {
    let status = match (live.camera.state, live.camera.resolution) {
        (CameraState::Open { facing }, Some(res)) => {
            format!("{} camera · {}×{}", facing.label(), res.width, res.height)
        }
        (CameraState::Open { facing }, None) => format!("{} camera", facing.label()),
        (CameraState::Closed, _) => "Camera off".to_string(),
    };

    CameraModel {
        open: matches!(live.camera.state, CameraState::Open { .. }),
        facing: state.facing.label(),
        status,
        preview: live.camera.preview.clone(),
        photos: state
            .photos
            .iter()
            .map(|photo| PhotoRow {
                id: photo.id,
                timestamp: photo.timestamp.clone(),
                size: photo.data.describe(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FacingMode, Platform, SocialLink};
    use crate::ui::notification::NotificationKind;

    fn live() -> LiveStatus {
        LiveStatus {
            playback: PlaybackState::Playing(0),
            position: Duration::from_secs(30),
            duration: Some(Duration::from_secs(120)),
            retrying: false,
            camera: CameraStatus {
                state: CameraState::Open {
                    facing: FacingMode::User,
                },
                resolution: Some(Resolution::IDEAL),
                preview: None,
            },
            notification: Some(Notification {
                message: "hi".to_string(),
                kind: NotificationKind::Info,
            }),
            avatar: None,
            cover: None,
        }
    }

    #[test]
    fn projection_is_idempotent() {
        let state = AppState::default();
        let live = live();
        assert_eq!(project(&state, &live), project(&state, &live));
    }

    #[test]
    fn projects_defaults() {
        let mut state = AppState::default();
        state.profile.views = 1260;
        let model = project(&state, &live());

        assert_eq!(model.profile.name, "W");
        assert_eq!(model.profile.views, "1.3K");
        assert!(model.profile.links.is_empty());
        assert_eq!(model.player.title, "Midnight Dreams");
        assert_eq!(model.player.elapsed, "0:30");
        assert_eq!(model.player.total, "2:00");
        assert_eq!(model.player.ratio, 0.25);
        assert_eq!(model.player.volume_label, "50%");
        assert!(model.player.playing);
        assert_eq!(model.tracks.len(), 2);
        assert!(model.tracks[0].current && !model.tracks[1].current);
        assert_eq!(model.camera.status, "front camera · 1280×720");
    }

    #[test]
    fn empty_track_list_shows_placeholder() {
        let mut state = AppState::default();
        state.tracks.clear();
        let model = project(&state, &LiveStatus::default());

        assert_eq!(model.player.title, NO_TRACKS);
        assert_eq!(model.player.total, "0:00");
        assert_eq!(model.player.ratio, 0.0);
    }

    #[test]
    fn links_keep_list_order() {
        let mut state = AppState::default();
        for (id, platform) in [(1, Platform::Youtube), (2, Platform::Website)] {
            state.profile.social_links.push(SocialLink {
                id,
                platform,
                url: format!("https://example.com/{id}"),
            });
        }

        let links = project(&state, &LiveStatus::default()).profile.links;
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].url, "https://example.com/1");
        assert_eq!(links[1].name, Platform::Website.label());
    }

    #[test]
    fn decoded_artwork_is_passed_through() {
        let thumb = Frame {
            width: 2,
            height: 1,
            rgb: vec![1, 2, 3, 4, 5, 6],
        };
        let live = LiveStatus {
            avatar: Some(thumb.clone()),
            ..LiveStatus::default()
        };
        let model = project(&AppState::default(), &live);

        assert_eq!(model.profile.avatar_image, Some(thumb));
        assert!(model.player.cover_image.is_none());
        assert!(!model.profile.avatar.is_empty());
    }
}
