pub mod app;
pub mod artwork;
pub mod components;
pub mod context;
pub mod input;
pub mod layout;
pub mod message;
pub mod notification;
pub mod router;
pub mod state;
pub mod traits;
pub mod tui;
pub mod util;
pub mod view_model;
pub mod views;
