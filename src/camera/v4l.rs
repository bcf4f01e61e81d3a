//! V4L2 capture. Each open stream owns a thread that keeps the latest raw
//! frame and a small decoded preview.

use std::{
    io::ErrorKind,
    path::PathBuf,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    thread::JoinHandle,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};
use v4l::{
    Device, FourCC, buffer::Type, io::mmap::Stream as MmapStream,
    io::traits::CaptureStream as _, video::Capture,
};

use super::{
    device::{CaptureDevice, CaptureStream, Frame, Resolution},
    error::CameraError,
    yuyv_to_rgb,
};
use crate::store::FacingMode;

const BUFFER_COUNT: u32 = 4;
const PREVIEW_WIDTH: u32 = 160;
const PREVIEW_INTERVAL: Duration = Duration::from_millis(150);

/// Front camera is `/dev/video0`, back camera `/dev/video1`.
#[derive(Debug, Clone)]
pub struct V4lDevice {
    front: PathBuf,
    back: PathBuf,
}

impl Default for V4lDevice {
    fn default() -> Self {
        Self {
            front: PathBuf::from("/dev/video0"),
            back: PathBuf::from("/dev/video1"),
        }
    }
}

impl V4lDevice {
    fn path_for(&self, facing: FacingMode) -> PathBuf {
        match facing {
            FacingMode::User => self.front.clone(),
            FacingMode::Environment => self.back.clone(),
        }
    }
}

#[derive(Debug, Clone)]
struct RawFrame {
    fourcc: [u8; 4],
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RawFrame {
    fn decode(&self) -> Result<Frame, CameraError> {
        match &self.fourcc {
            b"MJPG" => {
                let image = image::load_from_memory_with_format(&self.data, image::ImageFormat::Jpeg)
                    .map_err(|e| CameraError::Capture(e.to_string()))?
                    .to_rgb8();
                Ok(Frame {
                    width: image.width(),
                    height: image.height(),
                    rgb: image.into_raw(),
                })
            }
            b"YUYV" => Ok(Frame {
                width: self.width,
                height: self.height,
                rgb: yuyv_to_rgb(&self.data, self.width, self.height),
            }),
            other => Err(CameraError::Capture(format!(
                "unsupported pixel format {}",
                String::from_utf8_lossy(other)
            ))),
        }
    }
}

#[derive(Default)]
struct Shared {
    running: AtomicBool,
    latest: Mutex<Option<RawFrame>>,
    preview: Mutex<Option<Frame>>,
}

pub struct V4lStream {
    shared: Arc<Shared>,
    worker: Option<JoinHandle<()>>,
    resolution: Resolution,
}

impl CaptureStream for V4lStream {
    fn resolution(&self) -> Resolution {
        self.resolution
    }

    fn snapshot(&mut self) -> Result<Frame, CameraError> {
        let raw = self
            .shared
            .latest
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
            .ok_or_else(|| CameraError::Capture("no frame received yet".to_string()))?;
        raw.decode()
    }

    fn preview(&self) -> Option<Frame> {
        self.shared.preview.lock().ok().and_then(|guard| guard.clone())
    }

    fn stop(&mut self) {
        self.shared.running.store(false, Ordering::Release);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
            info!("camera_stream_stopped");
        }
    }
}

impl Drop for V4lStream {
    fn drop(&mut self) {
        self.stop();
    }
}

#[async_trait]
impl CaptureDevice for V4lDevice {
    async fn open(
        &self,
        facing: FacingMode,
        resolution: Resolution,
    ) -> Result<Box<dyn CaptureStream>, CameraError> {
        let path = self.path_for(facing);
        let shared = Arc::new(Shared::default());
        shared.running.store(true, Ordering::Release);

        let (ready_tx, ready_rx) = oneshot::channel();
        let worker_shared = shared.clone();
        let worker = std::thread::Builder::new()
            .name("camera-capture".to_string())
            .spawn(move || capture_loop(path, resolution, worker_shared, ready_tx))?;

        match ready_rx.await {
            Ok(Ok(actual)) => Ok(Box::new(V4lStream {
                shared,
                worker: Some(worker),
                resolution: actual,
            })),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(CameraError::DeviceUnavailable(
                "capture thread exited during setup".to_string(),
            )),
        }
    }
}

fn device_error(path: &PathBuf, e: std::io::Error) -> CameraError {
    match e.kind() {
        ErrorKind::PermissionDenied => CameraError::PermissionDenied(path.display().to_string()),
        _ => CameraError::DeviceUnavailable(format!("{}: {e}", path.display())),
    }
}

fn capture_loop(
    path: PathBuf,
    requested: Resolution,
    shared: Arc<Shared>,
    ready: oneshot::Sender<Result<Resolution, CameraError>>,
) {
    let device = match Device::with_path(&path) {
        Ok(device) => device,
        Err(e) => {
            let _ = ready.send(Err(device_error(&path, e)));
            return;
        }
    };

    let format = device.format().and_then(|mut format| {
        format.width = requested.width;
        format.height = requested.height;
        format.fourcc = FourCC::new(b"MJPG");
        device.set_format(&format)
    });
    let format = match format {
        Ok(format) => format,
        Err(e) => {
            let _ = ready.send(Err(device_error(&path, e)));
            return;
        }
    };

    let mut stream = match MmapStream::with_buffers(&device, Type::VideoCapture, BUFFER_COUNT) {
        Ok(stream) => stream,
        Err(e) => {
            let _ = ready.send(Err(device_error(&path, e)));
            return;
        }
    };

    let resolution = Resolution {
        width: format.width,
        height: format.height,
    };
    info!(
        path = %path.display(),
        width = resolution.width,
        height = resolution.height,
        fourcc = %format.fourcc,
        "camera_stream_opened"
    );
    if ready.send(Ok(resolution)).is_err() {
        return;
    }

    let mut last_preview: Option<Instant> = None;
    while shared.running.load(Ordering::Acquire) {
        let (buf, _meta) = match stream.next() {
            Ok(frame) => frame,
            Err(e) => {
                warn!(error = %e, "camera_frame_read_failed");
                break;
            }
        };

        let raw = RawFrame {
            fourcc: format.fourcc.repr,
            width: format.width,
            height: format.height,
            data: buf.to_vec(),
        };

        if last_preview.is_none_or(|at| at.elapsed() >= PREVIEW_INTERVAL) {
            if let Ok(frame) = raw.decode()
                && let Ok(mut preview) = shared.preview.lock()
            {
                *preview = Some(frame.downscale(PREVIEW_WIDTH));
            }
            last_preview = Some(Instant::now());
        }

        if let Ok(mut latest) = shared.latest.lock() {
            *latest = Some(raw);
        }
    }

    shared.running.store(false, Ordering::Release);
    debug!("camera_capture_thread_exit");
}
