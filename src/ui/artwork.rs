use tracing::debug;

use crate::{camera::Frame, store::MediaRef};

/// Widest thumbnail kept in memory; the widgets scale down from here.
pub const THUMBNAIL_WIDTH: u32 = 96;

#[derive(Debug, Default)]
struct Slot {
    source: Option<MediaRef>,
    frame: Option<Frame>,
}

impl Slot {
    fn resolve(&mut self, media: &MediaRef) -> Option<Frame> {
        if self.source.as_ref() != Some(media) {
            self.frame = thumbnail(media);
            self.source = Some(media.clone());
        }
        self.frame.clone()
    }

    fn clear(&mut self) {
        self.source = None;
        self.frame = None;
    }
}

/// Decoded avatar and cover thumbnails, re-decoded only when the
/// underlying reference changes.
#[derive(Debug, Default)]
pub struct Artwork {
    avatar: Slot,
    cover: Slot,
}

impl Artwork {
    pub fn avatar(&mut self, media: &MediaRef) -> Option<Frame> {
        self.avatar.resolve(media)
    }

    pub fn cover(&mut self, media: Option<&MediaRef>) -> Option<Frame> {
        match media {
            Some(media) => self.cover.resolve(media),
            None => {
                self.cover.clear();
                None
            }
        }
    }
}

/// Only embedded images are decoded; paths stay text so the render loop
/// never touches the disk.
fn thumbnail(media: &MediaRef) -> Option<Frame> {
    if !media.is_embedded() || !media.mime().starts_with("image/") {
        return None;
    }
    let decoded = media
        .bytes()
        .map_err(|e| e.to_string())
        .and_then(|bytes| Frame::decode(&bytes).map_err(|e| e.to_string()));
    match decoded {
        Ok(frame) => Some(frame.downscale(THUMBNAIL_WIDTH)),
        Err(e) => {
            debug!(error = %e, "artwork_decode_failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(width: u32, height: u32) -> MediaRef {
        let frame = Frame {
            width,
            height,
            rgb: vec![200; (width * height * 3) as usize],
        };
        MediaRef::embed("image/png", &frame.to_png().unwrap())
    }

    #[test]
    fn embedded_images_become_thumbnails() {
        let mut artwork = Artwork::default();
        let frame = artwork.avatar(&png(192, 96)).unwrap();

        assert_eq!((frame.width, frame.height), (THUMBNAIL_WIDTH, 48));
        assert_eq!(frame.pixel(0, 0), Some([200, 200, 200]));
    }

    #[test]
    fn paths_and_broken_data_stay_text() {
        let mut artwork = Artwork::default();

        assert!(artwork.avatar(&MediaRef::path("assets/avatar.png")).is_none());
        assert!(artwork.avatar(&MediaRef::embed("image/png", b"garbage")).is_none());
        assert!(artwork.cover(Some(&MediaRef::embed("audio/mpeg", &[1, 2]))).is_none());
        assert!(artwork.cover(None).is_none());
    }

    #[test]
    fn slot_follows_the_current_reference() {
        let mut artwork = Artwork::default();
        let small = png(4, 4);

        assert_eq!(artwork.cover(Some(&small)).map(|f| f.width), Some(4));
        assert_eq!(artwork.cover(Some(&png(8, 2))).map(|f| f.width), Some(8));
        assert!(artwork.cover(None).is_none());
        assert_eq!(artwork.cover(Some(&small)).map(|f| f.width), Some(4));
    }
}
