use barscan_core::{Detection, SymbologySet};
use image::GrayImage;

use crate::DecodeError;

/// A decode capability restricted to an allow-list of symbologies.
///
/// Implementations must only return detections whose symbology is a member
/// of `allowed`, and must return `Ok(vec![])` for a well-formed frame that
/// simply contains no codes.
pub trait Decoder {
    fn decode(
        &mut self,
        image: &GrayImage,
        allowed: &SymbologySet,
    ) -> Result<Vec<Detection>, DecodeError>;
}

impl<D: Decoder + ?Sized> Decoder for &mut D {
    fn decode(
        &mut self,
        image: &GrayImage,
        allowed: &SymbologySet,
    ) -> Result<Vec<Detection>, DecodeError> {
        (**self).decode(image, allowed)
    }
}

impl<D: Decoder + ?Sized> Decoder for Box<D> {
    fn decode(
        &mut self,
        image: &GrayImage,
        allowed: &SymbologySet,
    ) -> Result<Vec<Detection>, DecodeError> {
        (**self).decode(image, allowed)
    }
}
