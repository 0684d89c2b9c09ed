//! Frame sources: where each session's frames come from.
//!
//! A source is owned by the driver for the whole session and dropped on the
//! way out, which is where device-backed sources release their handle.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use barscan_core::Frame;
use image::ImageReader;
use log::debug;

use crate::discover::list_images;
use crate::ScanError;

pub trait FrameSource {
    /// Human-readable name used in logs and errors.
    fn name(&self) -> &str;

    /// Block until the next frame is available.
    ///
    /// `Ok(None)` means the source is exhausted; errors mean it can no longer
    /// produce usable frames.
    fn next_frame(&mut self) -> Result<Option<Frame>, ScanError>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn next_frame(&mut self) -> Result<Option<Frame>, ScanError> {
        (**self).next_frame()
    }
}

pub(crate) fn load_frame(path: &Path) -> Result<Frame, ScanError> {
    let name = path.display().to_string();
    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| ScanError::source_unavailable(&name, e))?;
    let image = reader
        .decode()
        .map_err(|e| ScanError::source_unavailable(&name, e))?;
    Ok(image.to_rgb8())
}

/// A single still image, yielded once.
#[derive(Debug)]
pub struct ImageFileSource {
    path: PathBuf,
    name: String,
    consumed: bool,
}

impl ImageFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self {
            path,
            name,
            consumed: false,
        }
    }
}

impl FrameSource for ImageFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_frame(&mut self) -> Result<Option<Frame>, ScanError> {
        if self.consumed {
            return Ok(None);
        }
        self.consumed = true;
        load_frame(&self.path).map(Some)
    }
}

/// Replays the image files of a directory in file-name order.
///
/// Stands in for a camera when none is available; the session ends when the
/// last file has been yielded.
#[derive(Debug)]
pub struct ImageSequenceSource {
    name: String,
    pending: VecDeque<PathBuf>,
}

impl ImageSequenceSource {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, ScanError> {
        let dir = dir.as_ref();
        let name = dir.display().to_string();
        let files = list_images(dir).map_err(|e| ScanError::source_unavailable(&name, e))?;
        if files.is_empty() {
            return Err(ScanError::source_unavailable(&name, "no image files found"));
        }
        debug!("replaying {} frame(s) from {}", files.len(), name);
        Ok(Self {
            name,
            pending: files.into(),
        })
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl FrameSource for ImageSequenceSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_frame(&mut self) -> Result<Option<Frame>, ScanError> {
        match self.pending.pop_front() {
            Some(path) => load_frame(&path).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn file_source_yields_exactly_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("one.png");
        Frame::from_pixel(8, 6, Rgb([1, 2, 3])).save(&path).expect("save");

        let mut src = ImageFileSource::new(&path);
        let frame = src.next_frame().expect("load").expect("frame");
        assert_eq!(frame.dimensions(), (8, 6));
        assert!(src.next_frame().expect("second call").is_none());
    }

    #[test]
    fn unreadable_file_is_source_unavailable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image").expect("write");

        let err = ImageFileSource::new(&path).next_frame().expect_err("corrupt");
        assert!(matches!(err, ScanError::SourceUnavailable { .. }));

        let err = ImageFileSource::new(dir.path().join("missing.png"))
            .next_frame()
            .expect_err("missing");
        assert!(matches!(err, ScanError::SourceUnavailable { .. }));
    }

    #[test]
    fn sequence_replays_in_name_order_then_ends() {
        let dir = tempfile::tempdir().expect("tempdir");
        for (name, w) in [("b.png", 2u32), ("a.png", 1), ("c.jpg", 3)] {
            Frame::from_pixel(w, 4, Rgb([200, 200, 200]))
                .save(dir.path().join(name))
                .expect("save");
        }
        std::fs::write(dir.path().join("notes.txt"), "skip me").expect("write");

        let mut src = ImageSequenceSource::open(dir.path()).expect("open");
        assert_eq!(src.remaining(), 3);
        let widths: Vec<u32> = std::iter::from_fn(|| src.next_frame().expect("frame"))
            .map(|f| f.width())
            .collect();
        assert_eq!(widths, vec![1, 2, 3]);
    }

    #[test]
    fn empty_directory_is_source_unavailable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = ImageSequenceSource::open(dir.path()).expect_err("empty");
        assert!(matches!(err, ScanError::SourceUnavailable { .. }));
    }
}
