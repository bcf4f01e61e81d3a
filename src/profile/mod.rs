pub mod error;
pub mod social;
pub mod views;

pub use error::ProfileError;
pub use social::{
    SocialRow, add_social_link, delete_social_link, open_social_link, set_avatar, social_rows,
    update_profile, validate_url,
};
pub use views::{click_jitter, increment_views, jitter_tick};
