pub mod audio;
pub mod camera;
pub mod config;
pub mod event;
pub mod profile;
pub mod store;
pub mod ui;
pub mod util;
