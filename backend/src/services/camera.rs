//! Camera capture
//!
//! A [`CameraSession`] owns an open stream and stops it when dropped, so the
//! stream is released whether capture succeeds, fails or is abandoned.

use crate::services::session::UiSession;
use async_trait::async_trait;
use nutriscan_shared::InlineImage;
use thiserror::Error;
use tracing::{debug, warn};

/// Shown when camera access is refused
pub const PERMISSION_DENIED_MESSAGE: &str = "ไม่สามารถเข้าถึงกล้องได้ กรุณาตรวจสอบสิทธิ์การใช้งาน";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    #[error("camera permission denied")]
    PermissionDenied,

    #[error("camera unavailable: {0}")]
    Unavailable(String),

    #[error("frame capture failed: {0}")]
    CaptureFailed(String),
}

impl CameraError {
    /// Text shown to the user
    pub fn user_message(&self) -> String {
        match self {
            CameraError::PermissionDenied => PERMISSION_DENIED_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Rear,
    Front,
}

/// Opaque handle to an open stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamHandle(pub u64);

/// Platform camera
#[async_trait]
pub trait CameraDevice: Send + Sync {
    async fn start_stream(&self, facing: Facing) -> Result<StreamHandle, CameraError>;

    /// Grab the current frame as an encoded image
    async fn capture_frame(&self, stream: StreamHandle) -> Result<InlineImage, CameraError>;

    fn stop_stream(&self, stream: StreamHandle);
}

/// An open stream, stopped on drop
pub struct CameraSession<'a> {
    device: &'a dyn CameraDevice,
    stream: Option<StreamHandle>,
}

impl<'a> CameraSession<'a> {
    /// Start the rear-facing stream
    pub async fn open(device: &'a dyn CameraDevice) -> Result<CameraSession<'a>, CameraError> {
        let stream = device.start_stream(Facing::Rear).await?;
        debug!(stream = stream.0, "Camera stream started");
        Ok(Self {
            device,
            stream: Some(stream),
        })
    }

    /// Capture one frame, closing the stream either way
    pub async fn capture(self) -> Result<InlineImage, CameraError> {
        match self.stream {
            Some(stream) => self.device.capture_frame(stream).await,
            None => Err(CameraError::Unavailable("stream already closed".to_string())),
        }
    }
}

impl Drop for CameraSession<'_> {
    fn drop(&mut self) {
        if let Some(stream) = self.stream.take() {
            self.device.stop_stream(stream);
            debug!(stream = stream.0, "Camera stream stopped");
        }
    }
}

/// Open the camera overlay, take one photo and close the overlay
///
/// The overlay is closed on every path; the caller starts the scan with the
/// returned image.
pub async fn capture_photo(
    ui: &mut UiSession,
    device: &dyn CameraDevice,
) -> Result<InlineImage, CameraError> {
    ui.open_camera()
        .map_err(|e| CameraError::Unavailable(e.to_string()))?;

    let result = match CameraSession::open(device).await {
        Ok(session) => session.capture().await,
        Err(e) => Err(e),
    };
    ui.close_camera();

    if let Err(e) = &result {
        warn!(error = %e, "Camera capture failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use nutriscan_shared::Screen;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct RecordingCamera {
        deny: bool,
        fail_capture: bool,
        started: AtomicUsize,
        stopped: AtomicUsize,
    }

    #[async_trait]
    impl CameraDevice for RecordingCamera {
        async fn start_stream(&self, facing: Facing) -> Result<StreamHandle, CameraError> {
            assert_eq!(facing, Facing::Rear);
            if self.deny {
                return Err(CameraError::PermissionDenied);
            }
            let id = self.started.fetch_add(1, Ordering::SeqCst) as u64;
            Ok(StreamHandle(id))
        }

        async fn capture_frame(&self, _stream: StreamHandle) -> Result<InlineImage, CameraError> {
            if self.fail_capture {
                return Err(CameraError::CaptureFailed("black frame".to_string()));
            }
            Ok(InlineImage::from_encoded("data:image/jpeg;base64,/9j/"))
        }

        fn stop_stream(&self, _stream: StreamHandle) {
            self.stopped.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn ui() -> UiSession {
        UiSession::new(NaiveDate::from_ymd_opt(2024, 6, 12).unwrap())
    }

    #[tokio::test]
    async fn test_capture_stops_stream() {
        let camera = RecordingCamera::default();
        let mut ui = ui();

        let image = capture_photo(&mut ui, &camera).await.unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(camera.started.load(Ordering::SeqCst), 1);
        assert_eq!(camera.stopped.load(Ordering::SeqCst), 1);
        assert!(!ui.camera_open());
    }

    #[tokio::test]
    async fn test_failed_capture_still_stops_stream() {
        let camera = RecordingCamera {
            fail_capture: true,
            ..Default::default()
        };
        let mut ui = ui();

        let err = capture_photo(&mut ui, &camera).await.unwrap_err();
        assert!(matches!(err, CameraError::CaptureFailed(_)));
        assert_eq!(camera.stopped.load(Ordering::SeqCst), 1);
        assert!(!ui.camera_open());
    }

    #[tokio::test]
    async fn test_dropped_session_stops_stream() {
        let camera = RecordingCamera::default();
        {
            let _session = CameraSession::open(&camera).await.unwrap();
            assert_eq!(camera.stopped.load(Ordering::SeqCst), 0);
        }
        assert_eq!(camera.stopped.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_permission_denied_closes_overlay() {
        let camera = RecordingCamera {
            deny: true,
            ..Default::default()
        };
        let mut ui = ui();

        let err = capture_photo(&mut ui, &camera).await.unwrap_err();
        assert_eq!(err, CameraError::PermissionDenied);
        assert_eq!(err.user_message(), PERMISSION_DENIED_MESSAGE);
        assert_eq!(camera.stopped.load(Ordering::SeqCst), 0);
        assert!(!ui.camera_open());
        assert_eq!(ui.screen(), Screen::Main);
    }

    #[tokio::test]
    async fn test_camera_refused_while_scanning() {
        let camera = RecordingCamera::default();
        let mut ui = ui();
        ui.begin_scan(&InlineImage::from_encoded("abc")).unwrap();

        assert!(capture_photo(&mut ui, &camera).await.is_err());
        assert_eq!(camera.started.load(Ordering::SeqCst), 0);
    }
}
