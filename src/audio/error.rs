use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum AudioError {
    #[error("Audio output device error: {0}")]
    DeviceError(String),

    #[error("Stream error: {0}")]
    StreamError(String),

    #[error("Decoding error: {0}")]
    DecodingError(String),

    #[error("Track source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlayerError {
    #[error("Not an audio file ({0})")]
    NotAudio(String),

    #[error("No track at position {0}")]
    NoSuchTrack(usize),
}
