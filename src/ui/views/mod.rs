pub mod camera;
pub mod confirm;
pub mod music;
pub mod playlist;
pub mod profile;
pub mod settings;
pub mod social;

pub use camera::CameraView;
pub use confirm::ConfirmView;
pub use music::MusicView;
pub use playlist::PlaylistView;
pub use profile::ProfileView;
pub use settings::SettingsView;
pub use social::SocialView;
