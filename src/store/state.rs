use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use super::media::MediaRef;

pub const DEFAULT_VIEWS: u64 = 1250;
pub const DEFAULT_VOLUME: f32 = 0.5;
pub const DEFAULT_COVER: &str =
    "https://images.unsplash.com/photo-1493225457124-a3eb161ffa5f?w=300&h=300&fit=crop";
const DEFAULT_AVATAR: &str = "https://images.unsplash.com/photo-1535713875002-d1d0cf377fde?w=200&h=200&fit=crop&crop=face";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub source: MediaRef,
    pub cover: MediaRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: u64,
    pub timestamp: String,
    pub data: MediaRef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Twitter,
    Youtube,
    Tiktok,
    Snapchat,
    Website,
    #[serde(other)]
    Other,
}

impl Platform {
    pub const ALL: [Platform; 7] = [
        Platform::Instagram,
        Platform::Twitter,
        Platform::Youtube,
        Platform::Tiktok,
        Platform::Snapchat,
        Platform::Website,
        Platform::Other,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub id: u64,
    pub platform: Platform,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub bio: String,
    pub avatar: MediaRef,
    pub views: u64,
    pub social_links: Vec<SocialLink>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "W".to_string(),
            bio: "Interface developer | UX designer".to_string(),
            avatar: MediaRef::path(DEFAULT_AVATAR),
            views: DEFAULT_VIEWS,
            social_links: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    pub autoplay: bool,
    pub save_photos: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            autoplay: true,
            save_photos: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    #[default]
    User,
    Environment,
}

impl FacingMode {
    pub fn toggled(self) -> Self {
        match self {
            FacingMode::User => FacingMode::Environment,
            FacingMode::Environment => FacingMode::User,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FacingMode::User => "front",
            FacingMode::Environment => "back",
        }
    }
}

/// Root aggregate. Owned by the application context and mutated only from
/// the UI task; every durable change is followed by a store write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    pub profile: Profile,
    pub settings: Settings,
    pub tracks: Vec<Track>,
    pub current_track: usize,
    pub volume: f32,
    pub playing: bool,
    pub facing: FacingMode,
    pub photos: Vec<Photo>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            settings: Settings::default(),
            tracks: default_tracks(),
            current_track: 0,
            volume: DEFAULT_VOLUME,
            playing: false,
            facing: FacingMode::User,
            photos: Vec::new(),
        }
    }
}

impl AppState {
    pub fn current(&self) -> Option<&Track> {
        self.tracks.get(self.current_track)
    }

    /// Restores the index and volume invariants after a load.
    pub fn normalize(&mut self) {
        if self.current_track >= self.tracks.len() {
            self.current_track = 0;
        }
        self.volume = clamp_unit(self.volume);
        if self.tracks.is_empty() {
            self.playing = false;
        }
    }
}

pub fn default_tracks() -> Vec<Track> {
    vec![
        Track {
            title: "Midnight Dreams".to_string(),
            artist: "Angeltia".to_string(),
            source: MediaRef::path("assets/music/track1.mp3"),
            cover: MediaRef::path(DEFAULT_COVER),
        },
        Track {
            title: "Digital Waves".to_string(),
            artist: "Angeltia".to_string(),
            source: MediaRef::path("assets/music/track2.mp3"),
            cover: MediaRef::path(
                "https://images.unsplash.com/photo-1511379938547-c1f69419868d?w=300&h=300&fit=crop",
            ),
        },
    ]
}

pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

/// Time-derived identifier above every id in `existing`, saturating at `u64::MAX`.
pub fn next_id(existing: impl IntoIterator<Item = u64>) -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();

    match existing.into_iter().max() {
        Some(max) => now.max(max.saturating_add(1)),
        None => now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_repairs_out_of_range_fields() {
        let mut state = AppState {
            current_track: 7,
            volume: 3.5,
            ..AppState::default()
        };
        state.normalize();
        assert_eq!(state.current_track, 0);
        assert_eq!(state.volume, 1.0);

        state.volume = f32::NAN;
        state.normalize();
        assert_eq!(state.volume, 0.0);
    }

    #[test]
    fn unknown_platform_tags_become_other() {
        let link: SocialLink =
            serde_json::from_str(r#"{"id":1,"platform":"mastodon","url":"https://a.b"}"#).unwrap();
        assert_eq!(link.platform, Platform::Other);
    }

    #[test]
    fn next_id_never_repeats() {
        let far_future = u64::MAX / 2;
        assert_eq!(next_id([far_future]), far_future + 1);
        assert!(next_id([]) > 0);
    }

    #[test]
    fn next_id_saturates_on_hostile_records() {
        assert_eq!(next_id([3, u64::MAX]), u64::MAX);

        let mut state: AppState = serde_json::from_str(
            r#"{"photos":[{"id":18446744073709551615,"timestamp":"t","data":"x.png"}]}"#,
        )
        .unwrap();
        state.normalize();
        assert_eq!(next_id(state.photos.iter().map(|p| p.id)), u64::MAX);
    }
}
