//! The per-frame step shared by both operating modes.

use barscan_core::{preprocess, Detection, Frame, SymbologySet};
use barscan_decode::Decoder;
use log::debug;

use crate::annotate::annotate;
use crate::ScanError;

/// Preprocess → decode → annotate, bound to one decoder and one allow-list.
pub struct Pipeline<D> {
    decoder: D,
    symbologies: SymbologySet,
}

impl<D: Decoder> Pipeline<D> {
    /// Pipeline restricted to the default allow-list.
    pub fn new(decoder: D) -> Self {
        Self::with_symbologies(decoder, SymbologySet::default())
    }

    pub fn with_symbologies(decoder: D, symbologies: SymbologySet) -> Self {
        Self {
            decoder,
            symbologies,
        }
    }

    /// Run the inner step on one frame.
    ///
    /// Decoding sees a thresholded copy; overlays are drawn on `frame` itself.
    /// The returned detections are in no particular order and may repeat.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            level = "debug",
            skip(self, frame),
            fields(width = frame.width(), height = frame.height())
        )
    )]
    pub fn process_frame(&mut self, frame: &mut Frame) -> Result<Vec<Detection>, ScanError> {
        let binary = preprocess(frame);
        let detections = self.decoder.decode(&binary, &self.symbologies)?;
        for detection in &detections {
            annotate(frame, detection);
        }
        debug!("frame {}x{}: {} detection(s)", frame.width(), frame.height(), detections.len());
        Ok(detections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::BOX_COLOR;
    use barscan_core::{BoundingBox, GrayFrame, Symbology};
    use barscan_decode::DecodeError;
    use image::Rgb;

    struct Fixed {
        detections: Vec<Detection>,
        seen_binary: bool,
    }

    impl Decoder for Fixed {
        fn decode(
            &mut self,
            image: &GrayFrame,
            allowed: &SymbologySet,
        ) -> Result<Vec<Detection>, DecodeError> {
            self.seen_binary = image.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255);
            Ok(self
                .detections
                .iter()
                .filter(|d| allowed.contains(d.symbology))
                .cloned()
                .collect())
        }
    }

    struct Failing;

    impl Decoder for Failing {
        fn decode(&mut self, _: &GrayFrame, _: &SymbologySet) -> Result<Vec<Detection>, DecodeError> {
            Err(DecodeError::Backend("boom".into()))
        }
    }

    #[test]
    fn decoder_sees_binary_image_and_frame_gets_overlay() {
        let det = Detection::new(Symbology::Qrcode, "HELLO", BoundingBox::new(10, 30, 20, 20));
        let mut pipeline = Pipeline::new(Fixed {
            detections: vec![det.clone()],
            seen_binary: false,
        });
        let mut frame = Frame::from_fn(64, 64, |x, y| Rgb([(x * 4) as u8, (y * 4) as u8, 90]));

        let out = pipeline.process_frame(&mut frame).expect("process");

        assert_eq!(out, vec![det]);
        assert!(pipeline.decoder.seen_binary);
        assert_eq!(*frame.get_pixel(10, 30), BOX_COLOR);
    }

    #[test]
    fn duplicates_within_a_frame_are_kept() {
        let det = Detection::new(Symbology::Ean8, "96385074", BoundingBox::new(0, 20, 5, 5));
        let mut pipeline = Pipeline::new(Fixed {
            detections: vec![det.clone(), det],
            seen_binary: false,
        });
        let mut frame = Frame::new(32, 32);
        assert_eq!(pipeline.process_frame(&mut frame).expect("process").len(), 2);
    }

    #[test]
    fn decoder_failure_is_a_scan_error() {
        let mut pipeline = Pipeline::new(Failing);
        let mut frame = Frame::new(8, 8);
        let err = pipeline.process_frame(&mut frame).expect_err("must fail");
        assert!(matches!(err, ScanError::Decode(_)));
    }
}
