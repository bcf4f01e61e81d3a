pub mod device;
pub mod error;
pub mod module;
#[cfg(target_os = "linux")]
pub mod v4l;

use std::sync::Arc;

use async_trait::async_trait;

pub use device::{CaptureDevice, CaptureStream, Frame, Resolution};
pub use error::CameraError;
pub use module::{Camera, CameraState, delete_photo, export_photo};

use crate::store::FacingMode;

pub fn default_device() -> Arc<dyn CaptureDevice> {
    #[cfg(target_os = "linux")]
    {
        Arc::new(v4l::V4lDevice::default())
    }
    #[cfg(not(target_os = "linux"))]
    {
        Arc::new(Unsupported)
    }
}

/// Stands in where no capture backend exists; every open fails.
#[derive(Debug, Default)]
pub struct Unsupported;

#[async_trait]
impl CaptureDevice for Unsupported {
    async fn open(
        &self,
        _facing: FacingMode,
        _resolution: Resolution,
    ) -> Result<Box<dyn CaptureStream>, CameraError> {
        Err(CameraError::DeviceUnavailable(
            "no capture backend on this platform".to_string(),
        ))
    }
}

/// Packed YUYV 4:2:2 to RGB8 (BT.601).
pub fn yuyv_to_rgb(data: &[u8], width: u32, height: u32) -> Vec<u8> {
    let pixels = (width * height) as usize;
    let mut rgb = Vec::with_capacity(pixels * 3);

    for chunk in data.chunks_exact(4).take(pixels / 2) {
        let (y0, u, y1, v) = (chunk[0], chunk[1], chunk[2], chunk[3]);
        rgb.extend_from_slice(&yuv_pixel(y0, u, v));
        rgb.extend_from_slice(&yuv_pixel(y1, u, v));
    }
    rgb.resize(pixels * 3, 0);
    rgb
}

fn yuv_pixel(y: u8, u: u8, v: u8) -> [u8; 3] {
    let y = y as f32;
    let u = u as f32 - 128.0;
    let v = v as f32 - 128.0;
    let clamp = |x: f32| x.round().clamp(0.0, 255.0) as u8;
    [
        clamp(y + 1.402 * v),
        clamp(y - 0.344_136 * u - 0.714_136 * v),
        clamp(y + 1.772 * u),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_chroma_is_grey() {
        let rgb = yuyv_to_rgb(&[0, 128, 255, 128], 2, 1);
        assert_eq!(rgb, vec![0, 0, 0, 255, 255, 255]);
    }

    #[test]
    fn short_buffers_are_padded() {
        let rgb = yuyv_to_rgb(&[100, 128, 100, 128], 4, 1);
        assert_eq!(rgb.len(), 12);
        assert_eq!(&rgb[6..], &[0; 6]);
    }

    #[tokio::test]
    async fn unsupported_backend_reports_unavailable() {
        let result = Unsupported.open(FacingMode::User, Resolution::IDEAL).await;
        assert!(matches!(result, Err(CameraError::DeviceUnavailable(_))));
    }
}
