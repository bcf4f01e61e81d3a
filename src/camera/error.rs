use thiserror::Error;

use crate::store::MediaError;

#[derive(Error, Debug)]
pub enum CameraError {
    #[error("Camera access denied: {0}")]
    PermissionDenied(String),

    #[error("Camera unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("Frame capture failed: {0}")]
    Capture(String),

    #[error("Image encoding failed: {0}")]
    Encode(String),

    #[error("No photo at position {0}")]
    NoSuchPhoto(usize),

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
