//! Locate and decode barcodes and QR codes in a still image or a live feed.
//!
//! This is the facade crate of the `barscan-*` workspace. It provides:
//! - re-exports of the core types (`barscan-core`) and the decoder seam
//!   (`barscan-decode`)
//! - the shared per-frame [`Pipeline`] step (preprocess, decode, annotate)
//! - the two mode drivers, [`ImageDriver`] and [`LiveDriver`]
//! - frame sources, display sinks and cancellation signals
//! - the `barscan` command-line binary (feature `cli`, on by default)
//!
//! ## Quickstart
//!
//! ```no_run
//! use barscan::{HeadlessSink, ImageDriver, ImageFileSource, Pipeline, RxingDecoder};
//!
//! # fn main() -> Result<(), barscan::ScanError> {
//! let mut driver = ImageDriver::new(Pipeline::new(RxingDecoder::default()));
//! let mut found: Vec<barscan::Detection> = Vec::new();
//! driver.run(ImageFileSource::new("label.png"), &mut HeadlessSink::new(), &mut found)?;
//! for detection in &found {
//!     println!("{} {}", detection.symbology, detection.payload);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//! - `cli` (default): the `barscan` binary.
//! - `camera`: [`CameraSource`] backed by `nokhwa`.
//! - `window`: [`WindowSink`] backed by `minifb`.
//! - `tracing`: spans on the hot path and a `tracing-subscriber` logger.

mod annotate;
mod cancel;
mod config;
mod discover;
mod driver;
mod error;
mod font;
mod pipeline;
mod session;
mod sink;
mod source;

#[cfg(feature = "camera")]
mod camera;
#[cfg(feature = "window")]
mod window;

pub use barscan_core as core;
pub use barscan_decode as decode;

pub use barscan_core::{BoundingBox, Detection, Frame, Symbology, SymbologySet};
pub use barscan_decode::{Decoder, RxingDecoder};

pub use annotate::{annotate, draw_box, draw_text, BOX_COLOR, LABEL_COLOR, LABEL_OFFSET};
pub use cancel::{CancelSignal, CtrlCSignal, NeverCancel};
pub use config::{ScanConfig, DEFAULT_RESOLUTION};
pub use discover::{discover_default_image, list_images, IMAGE_EXTENSIONS};
pub use driver::{DriverState, ImageDriver, LiveDriver};
pub use error::{ConfigError, ScanError};
pub use pipeline::Pipeline;
pub use session::{Notifier, ScanSession, SessionSummary, StdoutNotifier};
pub use sink::{FrameSink, HeadlessSink};
pub use source::{FrameSource, ImageFileSource, ImageSequenceSource};

#[cfg(feature = "camera")]
pub use camera::CameraSource;
#[cfg(feature = "window")]
pub use window::WindowSink;

/// Display title: the running executable's file stem, or `barscan`.
pub fn program_title() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "barscan".to_owned())
}
