pub mod media;
pub mod persistence;
pub mod state;

pub use media::{MediaError, MediaRef, Upload};
pub use persistence::{FileStore, MemoryStore, StateStore, open_store};
pub use state::{AppState, FacingMode, Photo, Platform, Profile, Settings, SocialLink, Theme, Track};
