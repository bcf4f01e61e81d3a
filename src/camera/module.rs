use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::Local;
use tracing::{info, warn};

use super::{
    device::{CaptureDevice, CaptureStream, Frame, Resolution},
    error::CameraError,
};
use crate::{
    profile::increment_views,
    store::{AppState, FacingMode, MediaRef, Photo, state::next_id},
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraState {
    Closed,
    Open { facing: FacingMode },
}

/// Owns at most one live capture stream.
pub struct Camera {
    device: Arc<dyn CaptureDevice>,
    stream: Option<Box<dyn CaptureStream>>,
    state: CameraState,
    requested: Resolution,
}

impl Camera {
    pub fn new(device: Arc<dyn CaptureDevice>, requested: Resolution) -> Self {
        Self {
            device,
            stream: None,
            state: CameraState::Closed,
            requested,
        }
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, CameraState::Open { .. })
    }

    pub fn resolution(&self) -> Option<Resolution> {
        self.stream.as_ref().map(|s| s.resolution())
    }

    /// Opens the stream for `facing`, replacing any stream already open.
    /// On failure the camera stays closed.
    pub async fn open(&mut self, facing: FacingMode) -> Result<Resolution, CameraError> {
        self.stop();

        match self.device.open(facing, self.requested).await {
            Ok(stream) => {
                let resolution = stream.resolution();
                info!(
                    facing = facing.label(),
                    width = resolution.width,
                    height = resolution.height,
                    "camera_opened"
                );
                self.stream = Some(stream);
                self.state = CameraState::Open { facing };
                Ok(resolution)
            }
            Err(e) => {
                warn!(facing = facing.label(), error = %e, "camera_open_failed");
                Err(e)
            }
        }
    }

    /// Reopens with the other facing mode. Does nothing while closed and
    /// returns whether a switch happened. The new mode is kept in `state`
    /// even when reopening fails.
    pub async fn switch(&mut self, state: &mut AppState) -> Result<bool, CameraError> {
        let CameraState::Open { facing } = self.state else {
            return Ok(false);
        };
        let facing = facing.toggled();
        state.facing = facing;
        self.open(facing).await?;
        Ok(true)
    }

    /// Snapshots the current frame into a new photo and counts a view.
    /// Returns the photo's index, or `None` when the camera is closed.
    pub fn capture_photo(&mut self, state: &mut AppState) -> Result<Option<usize>, CameraError> {
        let Some(stream) = self.stream.as_mut() else {
            return Ok(None);
        };

        let png = stream.snapshot()?.to_png()?;
        let photo = Photo {
            id: next_id(state.photos.iter().map(|p| p.id)),
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            data: MediaRef::embed("image/png", &png),
        };
        info!(id = photo.id, bytes = png.len(), "photo_captured");

        state.photos.push(photo);
        increment_views(state, 1);
        Ok(Some(state.photos.len() - 1))
    }

    pub fn preview(&self) -> Option<Frame> {
        self.stream.as_ref().and_then(|s| s.preview())
    }

    pub fn stop(&mut self) -> bool {
        self.state = CameraState::Closed;
        match self.stream.take() {
            Some(mut stream) => {
                stream.stop();
                info!("camera_stopped");
                true
            }
            None => false,
        }
    }
}

impl Drop for Camera {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Writes `photo` to `dir` as `photo_<id>.png`.
pub fn export_photo(photo: &Photo, dir: &Path) -> Result<PathBuf, CameraError> {
    let bytes = photo.data.bytes()?;
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("photo_{}.png", photo.id));
    fs::write(&path, bytes)?;
    info!(path = %path.display(), "photo_exported");
    Ok(path)
}

pub fn delete_photo(state: &mut AppState, index: usize) -> Result<Photo, CameraError> {
    if index >= state.photos.len() {
        return Err(CameraError::NoSuchPhoto(index));
    }
    let photo = state.photos.remove(index);
    info!(id = photo.id, "photo_deleted");
    Ok(photo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    #[derive(Default)]
    struct FakeDevice {
        deny: Option<FacingMode>,
        opened: Mutex<Vec<FacingMode>>,
        stopped: Arc<AtomicUsize>,
    }

    struct FakeStream {
        stopped: Arc<AtomicUsize>,
    }

    impl CaptureStream for FakeStream {
        fn resolution(&self) -> Resolution {
            Resolution {
                width: 2,
                height: 2,
            }
        }

        fn snapshot(&mut self) -> Result<Frame, CameraError> {
            Ok(Frame {
                width: 2,
                height: 2,
                rgb: vec![200; 12],
            })
        }

        fn preview(&self) -> Option<Frame> {
            None
        }

        fn stop(&mut self) {
            self.stopped.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl CaptureDevice for FakeDevice {
        async fn open(
            &self,
            facing: FacingMode,
            _resolution: Resolution,
        ) -> Result<Box<dyn CaptureStream>, CameraError> {
            if self.deny == Some(facing) {
                return Err(CameraError::PermissionDenied("denied".to_string()));
            }
            self.opened.lock().unwrap().push(facing);
            Ok(Box::new(FakeStream {
                stopped: self.stopped.clone(),
            }))
        }
    }

    fn camera(device: FakeDevice) -> (Camera, Arc<AtomicUsize>) {
        let stopped = device.stopped.clone();
        (Camera::new(Arc::new(device), Resolution::IDEAL), stopped)
    }

    #[test]
    fn capture_while_closed_is_a_no_op() {
        let (mut camera, _) = camera(FakeDevice::default());
        let mut state = AppState::default();

        assert_eq!(camera.capture_photo(&mut state).unwrap(), None);
        assert!(state.photos.is_empty());
        assert_eq!(state.profile.views, 1250);
    }

    #[tokio::test]
    async fn capture_appends_one_photo_and_counts_a_view() {
        let (mut camera, _) = camera(FakeDevice::default());
        let mut state = AppState::default();
        camera.open(FacingMode::User).await.unwrap();

        let index = camera.capture_photo(&mut state).unwrap();

        assert_eq!(index, Some(0));
        assert_eq!(state.photos.len(), 1);
        assert!(!state.photos[0].timestamp.is_empty());
        assert_eq!(state.photos[0].data.mime(), "image/png");
        assert_eq!(state.profile.views, 1251);

        camera.capture_photo(&mut state).unwrap();
        assert!(state.photos[1].id > state.photos[0].id);
    }

    #[tokio::test]
    async fn switch_toggles_facing_and_reopens() {
        let (mut camera, stopped) = camera(FakeDevice::default());
        let mut state = AppState::default();

        assert!(!camera.switch(&mut state).await.unwrap());
        assert_eq!(state.facing, FacingMode::User);

        camera.open(FacingMode::User).await.unwrap();
        assert!(camera.switch(&mut state).await.unwrap());
        assert_eq!(state.facing, FacingMode::Environment);
        assert_eq!(
            camera.state(),
            CameraState::Open {
                facing: FacingMode::Environment
            }
        );
        assert_eq!(stopped.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_open_leaves_camera_closed() {
        let (mut camera, _) = camera(FakeDevice {
            deny: Some(FacingMode::Environment),
            ..FakeDevice::default()
        });
        let mut state = AppState::default();
        camera.open(FacingMode::User).await.unwrap();

        let result = camera.switch(&mut state).await;

        assert!(matches!(result, Err(CameraError::PermissionDenied(_))));
        assert_eq!(camera.state(), CameraState::Closed);
        assert_eq!(camera.capture_photo(&mut state).unwrap(), None);
    }

    #[tokio::test]
    async fn stop_is_idempotent() {
        let (mut camera, stopped) = camera(FakeDevice::default());
        camera.open(FacingMode::User).await.unwrap();

        assert!(camera.stop());
        assert!(!camera.stop());
        assert_eq!(stopped.load(Ordering::SeqCst), 1);
        assert!(!camera.is_open());
    }

    #[tokio::test]
    async fn export_writes_png_named_by_id() {
        let (mut camera, _) = camera(FakeDevice::default());
        let mut state = AppState::default();
        camera.open(FacingMode::User).await.unwrap();
        camera.capture_photo(&mut state).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = export_photo(&state.photos[0], dir.path()).unwrap();

        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some(format!("photo_{}.png", state.photos[0].id).as_str())
        );
        let bytes = std::fs::read(path).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
    }

    #[test]
    fn delete_photo_checks_bounds() {
        let mut state = AppState::default();
        state.photos.push(Photo {
            id: 1,
            timestamp: "t".to_string(),
            data: MediaRef::path("p.png"),
        });

        assert!(matches!(
            delete_photo(&mut state, 3),
            Err(CameraError::NoSuchPhoto(3))
        ));
        assert_eq!(delete_photo(&mut state, 0).unwrap().id, 1);
        assert!(state.photos.is_empty());
    }
}
