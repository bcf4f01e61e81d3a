use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::state::AppState;

pub const STATE_KEY: &str = "portfolio_state";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed state record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Stored record is not an object")]
    NotAnObject,
}

/// Durable home of the [`AppState`]. Both operations are best-effort:
/// failures are logged and never reach the user.
pub trait StateStore: Send {
    fn load(&self) -> AppState;
    fn save(&mut self, state: &AppState);
}

/// Shallow-merges the stored record over the defaults, so that top-level
/// fields missing from an older record keep their default values.
pub fn decode_state(raw: &str) -> Result<AppState, StoreError> {
    let Value::Object(stored) = serde_json::from_str::<Value>(raw)? else {
        return Err(StoreError::NotAnObject);
    };

    let mut merged = serde_json::to_value(AppState::default())?;
    if let Value::Object(defaults) = &mut merged {
        for (key, value) in stored {
            defaults.insert(key, value);
        }
    }

    let mut state: AppState = serde_json::from_value(merged)?;
    state.normalize();
    Ok(state)
}

pub fn encode_state(state: &AppState) -> Result<String, StoreError> {
    Ok(serde_json::to_string(state)?)
}

fn decode_or_default(raw: &str) -> AppState {
    match decode_state(raw) {
        Ok(state) => state,
        Err(e) => {
            warn!(error = %e, "state_record_discarded");
            AppState::default()
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    record: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self { record: None }
    }

    #[cfg(test)]
    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            record: Some(record.into()),
        }
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> AppState {
        self.record
            .as_deref()
            .map(decode_or_default)
            .unwrap_or_default()
    }

    fn save(&mut self, state: &AppState) {
        match encode_state(state) {
            Ok(record) => self.record = Some(record),
            Err(e) => warn!(error = %e, "state_encode_failed"),
        }
    }
}

/// JSON file store. After the first failed write it keeps the session's
/// state in memory only.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    degraded: Option<MemoryStore>,
}

impl FileStore {
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(format!("{STATE_KEY}.json")),
            degraded: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(test)]
    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }

    fn write(&self, record: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, record)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl StateStore for FileStore {
    fn load(&self) -> AppState {
        if let Some(memory) = &self.degraded {
            return memory.load();
        }

        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                info!(path = %self.path.display(), "state_loaded");
                decode_or_default(&raw)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "state_missing_using_defaults");
                AppState::default()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "state_read_failed");
                AppState::default()
            }
        }
    }

    fn save(&mut self, state: &AppState) {
        if let Some(memory) = &mut self.degraded {
            memory.save(state);
            return;
        }

        let result = encode_state(state).and_then(|record| self.write(&record));
        if let Err(e) = result {
            warn!(path = %self.path.display(), error = %e, "state_write_failed_memory_only");
            let mut memory = MemoryStore::new();
            memory.save(state);
            self.degraded = Some(memory);
        }
    }
}

/// Opens the file store in `dir`, or an in-memory store when no data
/// directory is available.
pub fn open_store(dir: Option<&Path>) -> Box<dyn StateStore> {
    match dir {
        Some(dir) => Box::new(FileStore::new(dir)),
        None => {
            warn!("no_data_dir_state_is_session_only");
            Box::new(MemoryStore::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::state::{FacingMode, Platform, SocialLink, Theme};

    fn customized() -> AppState {
        let mut state = AppState::default();
        state.profile.name = "Nour".to_string();
        state.profile.views = 4321;
        state.profile.social_links.push(SocialLink {
            id: 9,
            platform: Platform::Youtube,
            url: "https://youtube.com/@nour".to_string(),
        });
        state.settings.theme = Theme::Light;
        state.current_track = 1;
        state.volume = 0.8;
        state.facing = FacingMode::Environment;
        state
    }

    #[test]
    fn save_then_load_round_trips() {
        let state = customized();
        let mut store = MemoryStore::new();
        store.save(&state);
        assert_eq!(store.load(), state);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let store = MemoryStore::with_record(
            r#"{"profile":{"name":"Old","views":10},"volume":0.2}"#,
        );
        let state = store.load();

        assert_eq!(state.profile.name, "Old");
        assert_eq!(state.profile.views, 10);
        assert!(state.profile.social_links.is_empty());
        assert_eq!(state.volume, 0.2);
        assert_eq!(state.settings, AppState::default().settings);
        assert_eq!(state.tracks.len(), 2);
    }

    #[test]
    fn malformed_record_loads_defaults() {
        assert_eq!(MemoryStore::with_record("{not json").load(), AppState::default());
        assert_eq!(MemoryStore::with_record("[1,2]").load(), AppState::default());
        assert!(matches!(decode_state("42"), Err(StoreError::NotAnObject)));
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let state = customized();

        let mut store = FileStore::new(dir.path());
        store.save(&state);
        assert!(store.path().exists());

        let reopened = FileStore::new(dir.path());
        assert_eq!(reopened.load(), state);
    }

    #[test]
    fn file_store_degrades_to_memory_on_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocked");
        fs::write(&blocker, b"file, not a directory").unwrap();

        let mut store = FileStore::new(&blocker.join("nested"));
        let state = customized();
        store.save(&state);

        assert!(store.is_degraded());
        assert_eq!(store.load(), state);
    }
}
