use std::{
    fmt,
    path::{Path, PathBuf},
};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use thiserror::Error;

const DATA_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Embedded data is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("File has no name: {0}")]
    NoFileName(PathBuf),
}

/// Reference to a piece of media: either an external path/URL or the file
/// contents embedded in the record itself.
///
/// Serialized as a plain string, `data:<mime>;base64,<payload>` for embedded
/// media, so that the persisted record stays a flat JSON document.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(into = "String", from = "String")]
pub enum MediaRef {
    Path(String),
    Embedded { mime: String, data: String },
}

impl MediaRef {
    pub fn path(path: impl Into<String>) -> Self {
        Self::Path(path.into())
    }

    pub fn embed(mime: &str, bytes: &[u8]) -> Self {
        Self::Embedded {
            mime: mime.to_string(),
            data: STANDARD.encode(bytes),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, MediaError> {
        let bytes = std::fs::read(path).map_err(|source| MediaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::embed(guess_mime(path), &bytes))
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self, Self::Embedded { .. })
    }

    pub fn mime(&self) -> &str {
        match self {
            Self::Embedded { mime, .. } => mime,
            Self::Path(path) => guess_mime(Path::new(path)),
        }
    }

    /// Extension-like hint for decoders, e.g. `mp3`.
    pub fn format_hint(&self) -> Option<String> {
        match self {
            Self::Path(path) => Path::new(path)
                .extension()
                .and_then(|ext| ext.to_str())
                .map(str::to_lowercase),
            Self::Embedded { mime, .. } => mime
                .split_once('/')
                .map(|(_, sub)| sub.trim_start_matches("x-").to_string()),
        }
    }

    pub fn bytes(&self) -> Result<Vec<u8>, MediaError> {
        match self {
            Self::Embedded { data, .. } => Ok(STANDARD.decode(data)?),
            Self::Path(path) => std::fs::read(path).map_err(|source| MediaError::Io {
                path: PathBuf::from(path),
                source,
            }),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Path(path) => path.clone(),
            Self::Embedded { mime, data } => {
                let kib = (data.len() * 3 / 4).div_ceil(1024);
                format!("embedded {mime}, {kib} KiB")
            }
        }
    }
}

impl From<MediaRef> for String {
    fn from(media: MediaRef) -> Self {
        match media {
            MediaRef::Path(path) => path,
            MediaRef::Embedded { mime, data } => format!("{DATA_PREFIX}{mime}{BASE64_MARKER}{data}"),
        }
    }
}

impl From<String> for MediaRef {
    fn from(raw: String) -> Self {
        if let Some(rest) = raw.strip_prefix(DATA_PREFIX)
            && let Some((mime, data)) = rest.split_once(BASE64_MARKER)
        {
            return Self::Embedded {
                mime: mime.to_string(),
                data: data.to_string(),
            };
        }
        Self::Path(raw)
    }
}

impl fmt::Display for MediaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// A file picked by the user, read fully into memory.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn read(path: &Path) -> Result<Self, MediaError> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| MediaError::NoFileName(path.to_path_buf()))?
            .to_string();
        let bytes = std::fs::read(path).map_err(|source| MediaError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            file_name,
            mime: guess_mime(path).to_string(),
            bytes,
        })
    }
}

pub fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "mp3" => "audio/mpeg",
        "flac" => "audio/flac",
        "wav" => "audio/wav",
        "ogg" | "oga" => "audio/ogg",
        "m4a" | "aac" => "audio/mp4",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_media_serializes_as_data_url() {
        let media = MediaRef::embed("audio/mpeg", b"ID3");
        let raw: String = media.clone().into();

        assert!(raw.starts_with("data:audio/mpeg;base64,"));
        assert_eq!(MediaRef::from(raw), media);
        assert_eq!(media.bytes().unwrap(), b"ID3");
    }

    #[test]
    fn plain_strings_stay_paths() {
        let media = MediaRef::from("assets/music/track1.mp3".to_string());
        assert_eq!(media, MediaRef::path("assets/music/track1.mp3"));
        assert_eq!(media.format_hint().as_deref(), Some("mp3"));
        assert_eq!(media.mime(), "audio/mpeg");
    }

    #[test]
    fn mime_guess_is_case_insensitive() {
        assert_eq!(guess_mime(Path::new("Song.FLAC")), "audio/flac");
        assert_eq!(guess_mime(Path::new("notes.txt")), "application/octet-stream");
    }
}
