use barscan_core::{Detection, SymbologySet};
use image::GrayImage;
use log::{debug, trace};
use rxing::common::HybridBinarizer;
use rxing::multi::{GenericMultipleBarcodeReader, MultipleBarcodeReader};
use rxing::{
    BarcodeFormat, BinaryBitmap, DecodeHintType, DecodeHintValue, DecodingHintDictionary,
    Exceptions, Luma8LuminanceSource, MultiFormatReader, RXingResult, RXingResultMetadataType,
    RXingResultMetadataValue,
};

use crate::mapping::{backend_formats, classify, classify_extension};
use crate::region::symbol_region;
use crate::{DecodeError, Decoder};

/// Multi-symbology decoder backed by `rxing`, always in try-harder mode.
#[derive(Clone, Copy, Debug, Default)]
pub struct RxingDecoder;

impl RxingDecoder {
    pub fn new() -> Self {
        Self
    }

    fn hints(&self, allowed: &SymbologySet) -> DecodingHintDictionary {
        let mut hints = DecodingHintDictionary::new();
        hints.insert(
            DecodeHintType::POSSIBLE_FORMATS,
            DecodeHintValue::PossibleFormats(backend_formats(allowed)),
        );
        hints.insert(DecodeHintType::TRY_HARDER, DecodeHintValue::TryHarder(true));
        hints
    }
}

impl Decoder for RxingDecoder {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            level = "debug",
            skip(self, image, allowed),
            fields(width = image.width(), height = image.height(), allowed = allowed.len())
        )
    )]
    fn decode(
        &mut self,
        image: &GrayImage,
        allowed: &SymbologySet,
    ) -> Result<Vec<Detection>, DecodeError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(DecodeError::EmptyImage { width, height });
        }
        // An empty hint set would mean "every format" to the backend.
        if backend_formats(allowed).is_empty() {
            debug!("no backend reader for the allowed symbologies; skipping decode");
            return Ok(Vec::new());
        }

        let hints = self.hints(allowed);
        let source = Luma8LuminanceSource::new(image.as_raw().clone(), width, height);
        let mut bitmap = BinaryBitmap::new(HybridBinarizer::new(source));
        let mut reader = GenericMultipleBarcodeReader::new(MultiFormatReader::default());

        let results = match reader.decode_multiple_with_hints(&mut bitmap, &hints) {
            Ok(results) => results,
            Err(
                Exceptions::NotFoundException(_)
                | Exceptions::ChecksumException(_)
                | Exceptions::FormatException(_),
            ) => return Ok(Vec::new()),
            Err(err) => return Err(DecodeError::Backend(err.to_string())),
        };

        let detections: Vec<Detection> = results
            .iter()
            .flat_map(|r| result_detections(image, r, allowed))
            .collect();
        trace!(
            "backend returned {} result(s), {} allowed",
            results.len(),
            detections.len()
        );
        Ok(detections)
    }
}

fn result_detections(
    image: &GrayImage,
    result: &RXingResult,
    allowed: &SymbologySet,
) -> Vec<Detection> {
    let points: Vec<(f32, f32)> = result.getPoints().iter().map(|p| (p.x, p.y)).collect();
    let extension = match result
        .getRXingResultMetadata()
        .get(&RXingResultMetadataType::UPC_EAN_EXTENSION)
    {
        Some(RXingResultMetadataValue::UpcEanExtension(text)) => Some(text.as_str()),
        _ => None,
    };
    detections_from(
        image,
        result.getBarcodeFormat(),
        result.getText(),
        &points,
        extension,
        allowed,
    )
}

/// The symbol itself and, for EAN/UPC symbols carrying a 2- or 5-digit
/// add-on, the add-on as a code of its own.
fn detections_from(
    image: &GrayImage,
    format: &BarcodeFormat,
    text: &str,
    points: &[(f32, f32)],
    extension: Option<&str>,
    allowed: &SymbologySet,
) -> Vec<Detection> {
    // Add-on points follow the host's two scan-line points.
    let (host_points, addon_points) = match extension {
        Some(_) if points.len() >= 4 => points.split_at(2),
        _ => (points, points),
    };

    let mut out = Vec::new();
    if let Some((symbology, payload)) = classify(format, text, allowed) {
        if let Some(bbox) = symbol_region(image, format, host_points) {
            out.push(Detection::new(symbology, payload, bbox));
        }
    }
    if let Some((symbology, payload)) = extension.and_then(|e| classify_extension(e, allowed)) {
        if let Some(bbox) = symbol_region(image, format, addon_points) {
            out.push(Detection::new(symbology, payload, bbox));
        }
    }
    out
}
