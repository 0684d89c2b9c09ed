//! Live capture through `nokhwa`.

use barscan_core::Frame;
use log::{info, warn};
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType, Resolution};
use nokhwa::Camera;

use crate::source::FrameSource;
use crate::ScanError;

/// A camera stream, open for the lifetime of the value.
pub struct CameraSource {
    camera: Camera,
    name: String,
}

impl CameraSource {
    /// Open camera `index` and start streaming at (or near) `resolution`.
    pub fn open(index: u32, resolution: [u32; 2]) -> Result<Self, ScanError> {
        let name = format!("camera {index}");
        let [w, h] = resolution;
        let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::HighestResolution(
            Resolution::new(w, h),
        ));
        let mut camera = Camera::new(CameraIndex::Index(index), requested)
            .map_err(|e| ScanError::source_unavailable(&name, e))?;
        camera
            .open_stream()
            .map_err(|e| ScanError::source_unavailable(&name, e))?;
        let actual = camera.resolution();
        info!(
            "{name} streaming at {}x{}",
            actual.width(),
            actual.height()
        );
        Ok(Self { camera, name })
    }
}

impl FrameSource for CameraSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_frame(&mut self) -> Result<Option<Frame>, ScanError> {
        let buffer = self
            .camera
            .frame()
            .map_err(|e| ScanError::source_unavailable(&self.name, e))?;
        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| ScanError::source_unavailable(&self.name, e))?;
        let (w, h) = decoded.dimensions();
        let frame = Frame::from_raw(w, h, decoded.into_raw())
            .ok_or_else(|| ScanError::source_unavailable(&self.name, "short frame buffer"))?;
        Ok(Some(frame))
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        if let Err(err) = self.camera.stop_stream() {
            warn!("{}: failed to stop stream: {err}", self.name);
        } else {
            info!("{} released", self.name);
        }
    }
}
