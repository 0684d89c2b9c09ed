//! Symbology-constrained decoding for the `barscan` pipeline.
//!
//! The crate exposes one seam, [`Decoder`], and one production backend,
//! [`RxingDecoder`]. Callers hand in an already preprocessed (binary) frame
//! and the allow-list; they get back zero or more [`Detection`]s in frame
//! coordinates, in no particular order and without deduplication.
//!
//! [`Detection`]: barscan_core::Detection

mod decoder;
mod error;
mod mapping;
mod region;
mod rxing_backend;

pub use decoder::Decoder;
pub use error::DecodeError;
pub use mapping::isbn10_from_ean13;
pub use rxing_backend::RxingDecoder;
