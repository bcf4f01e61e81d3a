use thiserror::Error;

use crate::store::MediaError;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Please enter a link")]
    EmptyUrl,

    #[error("Not a valid link: {0}")]
    InvalidUrl(String),

    #[error("Links must start with http:// or https://")]
    UnsupportedScheme,

    #[error("No link at position {0}")]
    NoSuchLink(usize),

    #[error("Expected an image, got {0}")]
    NotAnImage(String),

    #[error("Could not open link: {0}")]
    Open(#[source] std::io::Error),

    #[error(transparent)]
    Media(#[from] MediaError),
}
