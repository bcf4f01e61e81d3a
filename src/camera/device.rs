use std::io::Cursor;

use async_trait::async_trait;
use image::{DynamicImage, ImageFormat, RgbImage};

use super::error::CameraError;
use crate::store::FacingMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const IDEAL: Resolution = Resolution {
        width: 1280,
        height: 720,
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

impl Frame {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let at = ((y * self.width + x) * 3) as usize;
        self.rgb.get(at..at + 3).map(|p| [p[0], p[1], p[2]])
    }

    /// Nearest-neighbour downscale to at most `max_width` pixels wide.
    pub fn downscale(&self, max_width: u32) -> Frame {
        if self.width <= max_width || self.width == 0 {
            return self.clone();
        }
        let width = max_width.max(1);
        let height = ((self.height as u64 * width as u64) / self.width as u64).max(1) as u32;
        let mut rgb = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            let src_y = y * self.height / height;
            for x in 0..width {
                let src_x = x * self.width / width;
                rgb.extend_from_slice(&self.pixel(src_x, src_y).unwrap_or_default());
            }
        }
        Frame { width, height, rgb }
    }

    /// Decodes an encoded still (PNG, JPEG) into RGB8.
    pub fn decode(bytes: &[u8]) -> Result<Frame, CameraError> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| CameraError::Capture(e.to_string()))?
            .to_rgb8();
        Ok(Frame {
            width: image.width(),
            height: image.height(),
            rgb: image.into_raw(),
        })
    }

    pub fn to_png(&self) -> Result<Vec<u8>, CameraError> {
        let image = RgbImage::from_raw(self.width, self.height, self.rgb.clone())
            .ok_or_else(|| CameraError::Encode("frame buffer size mismatch".to_string()))?;
        let mut png = Vec::new();
        DynamicImage::ImageRgb8(image)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| CameraError::Encode(e.to_string()))?;
        Ok(png)
    }
}

/// A live capture stream. Dropping or stopping it releases the device.
pub trait CaptureStream: Send {
    fn resolution(&self) -> Resolution;
    fn snapshot(&mut self) -> Result<Frame, CameraError>;
    /// Small frame for on-screen preview, if one is available yet.
    fn preview(&self) -> Option<Frame>;
    fn stop(&mut self);
}

#[async_trait]
pub trait CaptureDevice: Send + Sync {
    async fn open(
        &self,
        facing: FacingMode,
        resolution: Resolution,
    ) -> Result<Box<dyn CaptureStream>, CameraError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> Frame {
        let mut rgb = Vec::new();
        for y in 0..height {
            for x in 0..width {
                rgb.extend_from_slice(&[x as u8, y as u8, 0]);
            }
        }
        Frame { width, height, rgb }
    }

    #[test]
    fn downscale_keeps_aspect() {
        let frame = gradient(64, 32).downscale(16);
        assert_eq!((frame.width, frame.height), (16, 8));
        assert_eq!(frame.rgb.len(), 16 * 8 * 3);
        assert_eq!(frame.pixel(1, 1), Some([4, 4, 0]));
    }

    #[test]
    fn png_encoding_produces_png() {
        let png = gradient(4, 4).to_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn encoded_stills_decode_back_to_rgb() {
        let png = gradient(8, 2).to_png().unwrap();
        let frame = Frame::decode(&png).unwrap();
        assert_eq!((frame.width, frame.height), (8, 2));
        assert_eq!(frame.pixel(3, 1), Some([3, 1, 0]));

        assert!(Frame::decode(b"not an image").is_err());
    }

    #[test]
    fn mismatched_buffer_is_an_encode_error() {
        let frame = Frame {
            width: 4,
            height: 4,
            rgb: vec![0; 5],
        };
        assert!(matches!(frame.to_png(), Err(CameraError::Encode(_))));
    }
}
