use async_trait::async_trait;

use crate::{
    audio::{error::AudioError, traits::AudioSource},
    store::MediaRef,
};

#[derive(Debug, Default, Clone)]
pub struct MediaLoader;

#[async_trait]
impl AudioSource for MediaLoader {
    async fn fetch(&self, media: &MediaRef) -> Result<Vec<u8>, AudioError> {
        match media {
            MediaRef::Embedded { .. } => media
                .bytes()
                .map_err(|e| AudioError::SourceUnavailable(e.to_string())),
            MediaRef::Path(path) if path.starts_with("http://") || path.starts_with("https://") => {
                Err(AudioError::SourceUnavailable(format!(
                    "remote sources are not streamed: {path}"
                )))
            }
            MediaRef::Path(path) => tokio::fs::read(path)
                .await
                .map_err(|e| AudioError::SourceUnavailable(format!("{path}: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn embedded_sources_decode_and_missing_files_fail() {
        let loader = MediaLoader;
        let embedded = MediaRef::embed("audio/wav", b"RIFF");
        assert_eq!(loader.fetch(&embedded).await.unwrap(), b"RIFF");

        let missing = MediaRef::path("/definitely/not/here.mp3");
        assert!(matches!(
            loader.fetch(&missing).await,
            Err(AudioError::SourceUnavailable(_))
        ));
    }
}
