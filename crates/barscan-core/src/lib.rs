//! Core types and utilities for barcode scanning.
//!
//! This crate is intentionally small. It does *not* depend on any concrete
//! decode backend, camera or window system; those live in `barscan-decode`
//! and the `barscan` facade.

mod dedup;
mod detection;
mod logger;
mod preprocess;
mod symbology;

pub use dedup::SessionDeduplicator;
pub use detection::{BoundingBox, Detection, DetectionKey};
pub use preprocess::{luma_bt601, preprocess, threshold_binary_mut, to_luma, BINARY_THRESHOLD};
pub use symbology::{Symbology, SymbologySet, DEFAULT_SYMBOLOGIES};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;

/// A color frame as produced by an image file or a camera.
pub type Frame = image::RgbImage;

/// The single-channel, thresholded representation handed to a decoder.
pub type GrayFrame = image::GrayImage;
