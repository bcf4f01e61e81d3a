//! Transport transitions over the track list. Nothing here touches the
//! output device; [`crate::audio::system::AudioSystem`] pairs these with the
//! matching device commands.

use std::time::Duration;

use tracing::info;

use crate::{
    audio::error::PlayerError,
    store::{
        AppState, MediaRef, Track, Upload,
        state::{DEFAULT_COVER, clamp_unit},
    },
};

pub const UPLOAD_ARTIST: &str = "User";

/// What happened to the current track after a deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The list is now empty: playback must stop.
    Emptied,
    /// The loaded track was removed; another one must be loaded.
    CurrentRemoved,
    /// A track before the current one was removed; the index moved down so
    /// the same track stays loaded.
    Shifted,
    Other,
}

pub fn load_track(state: &mut AppState, index: usize) -> Option<&Track> {
    if index >= state.tracks.len() {
        return None;
    }
    state.current_track = index;
    state.tracks.get(index)
}

pub fn next(state: &mut AppState) -> Option<usize> {
    let len = state.tracks.len();
    if len == 0 {
        return None;
    }
    state.current_track = (state.current_track + 1) % len;
    Some(state.current_track)
}

pub fn previous(state: &mut AppState) -> Option<usize> {
    let len = state.tracks.len();
    if len == 0 {
        return None;
    }
    state.current_track = (state.current_track + len - 1) % len;
    Some(state.current_track)
}

pub fn set_volume(state: &mut AppState, volume: f32) -> f32 {
    state.volume = clamp_unit(volume);
    state.volume
}

/// Position for a seek to `fraction` of the track, `None` while the
/// duration is unknown.
pub fn seek_position(fraction: f64, duration: Option<Duration>) -> Option<Duration> {
    let duration = duration.filter(|d| !d.is_zero())?;
    let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
    Some(duration.mul_f64(fraction))
}

pub fn title_from_file_name(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => file_name.to_string(),
    }
}

pub fn add_track(state: &mut AppState, upload: &Upload) -> Result<usize, PlayerError> {
    if !upload.mime.starts_with("audio/") {
        return Err(PlayerError::NotAudio(upload.mime.clone()));
    }

    let cover = state
        .tracks
        .first()
        .map(|t| t.cover.clone())
        .unwrap_or_else(|| MediaRef::path(DEFAULT_COVER));

    let track = Track {
        title: title_from_file_name(&upload.file_name),
        artist: UPLOAD_ARTIST.to_string(),
        source: MediaRef::embed(&upload.mime, &upload.bytes),
        cover,
    };
    info!(title = track.title.as_str(), "track_added");
    state.tracks.push(track);
    Ok(state.tracks.len() - 1)
}

pub fn delete_track(state: &mut AppState, index: usize) -> Result<DeleteOutcome, PlayerError> {
    if index >= state.tracks.len() {
        return Err(PlayerError::NoSuchTrack(index));
    }
    let removed = state.tracks.remove(index);
    info!(title = removed.title.as_str(), "track_deleted");

    let outcome = if state.tracks.is_empty() {
        state.current_track = 0;
        DeleteOutcome::Emptied
    } else if index == state.current_track {
        if state.current_track >= state.tracks.len() {
            state.current_track = 0;
        }
        DeleteOutcome::CurrentRemoved
    } else if index < state.current_track {
        state.current_track -= 1;
        DeleteOutcome::Shifted
    } else {
        DeleteOutcome::Other
    };
    Ok(outcome)
}

pub fn set_cover(state: &mut AppState, cover: MediaRef) -> Result<(), PlayerError> {
    let index = state.current_track;
    let track = state
        .tracks
        .get_mut(index)
        .ok_or(PlayerError::NoSuchTrack(index))?;
    track.cover = cover;
    Ok(())
}
