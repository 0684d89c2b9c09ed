//! Recover a symbol's printed extent from the backend's result points.
//!
//! Linear readers report the two guard centres of the scan line that decoded,
//! and the QR reader reports finder pattern centres. Neither outlines the
//! symbol, so the binary frame is used to grow those points back out.

use barscan_core::BoundingBox;
use image::GrayImage;
use rxing::BarcodeFormat;

/// A row (or column) still belongs to a linear symbol when at most this share
/// of its pixels differ from the decoded scan line.
const LINE_MISMATCH_TOLERANCE: f32 = 0.1;

/// Finder pattern centre to the symbol's outer edge, in modules.
const FINDER_CENTRE_TO_EDGE: f32 = 3.5;

/// Bounding box of the symbol behind `points`, clipped to the frame.
pub(crate) fn symbol_region(
    image: &GrayImage,
    format: &BarcodeFormat,
    points: &[(f32, f32)],
) -> Option<BoundingBox> {
    let hull = BoundingBox::from_points(points.iter().copied())?;
    let region = if *format == BarcodeFormat::QR_CODE {
        pad_finder_hull(image, hull, points)
    } else if hull.height <= 1 {
        grow_rows(image, hull)
    } else if hull.width <= 1 {
        grow_columns(image, hull)
    } else {
        hull
    };
    region.clipped(image.width(), image.height())
}

fn is_dark(image: &GrayImage, x: u32, y: u32) -> bool {
    image.get_pixel(x, y).0[0] < 128
}

// Pixel range [lo, hi) of `start..start + len` inside `0..limit`.
fn span(start: i32, len: u32, limit: u32) -> Option<(u32, u32)> {
    let lo = i64::from(start).max(0);
    let hi = (i64::from(start) + i64::from(len)).min(i64::from(limit));
    (lo < hi).then_some((lo as u32, hi as u32))
}

fn lines_match(reference: &[bool], line: impl Iterator<Item = bool>) -> bool {
    let mismatches = reference.iter().zip(line).filter(|(a, b)| **a != *b).count();
    mismatches as f32 <= reference.len() as f32 * LINE_MISMATCH_TOLERANCE
}

// Extend a horizontal scan line up and down while the bar pattern holds.
fn grow_rows(image: &GrayImage, hull: BoundingBox) -> BoundingBox {
    let (width, height) = image.dimensions();
    let (Some((x0, x1)), Some((seed, _))) = (span(hull.x, hull.width, width), span(hull.y, 1, height))
    else {
        return hull;
    };
    let reference: Vec<bool> = (x0..x1).map(|x| is_dark(image, x, seed)).collect();
    if !reference.contains(&true) {
        return hull;
    }
    let same = |y: u32| lines_match(&reference, (x0..x1).map(|x| is_dark(image, x, y)));

    let mut top = seed;
    while top > 0 && same(top - 1) {
        top -= 1;
    }
    let mut bottom = seed;
    while bottom + 1 < height && same(bottom + 1) {
        bottom += 1;
    }
    BoundingBox::new(hull.x, top as i32, hull.width, bottom - top + 1)
}

// Same as `grow_rows` for a code read along a column.
fn grow_columns(image: &GrayImage, hull: BoundingBox) -> BoundingBox {
    let (width, height) = image.dimensions();
    let (Some((y0, y1)), Some((seed, _))) = (span(hull.y, hull.height, height), span(hull.x, 1, width))
    else {
        return hull;
    };
    let reference: Vec<bool> = (y0..y1).map(|y| is_dark(image, seed, y)).collect();
    if !reference.contains(&true) {
        return hull;
    }
    let same = |x: u32| lines_match(&reference, (y0..y1).map(|y| is_dark(image, x, y)));

    let mut left = seed;
    while left > 0 && same(left - 1) {
        left -= 1;
    }
    let mut right = seed;
    while right + 1 < width && same(right + 1) {
        right += 1;
    }
    BoundingBox::new(left as i32, hull.y, right - left + 1, hull.height)
}

// The first three QR points are finder centres; a fourth, when present, is an
// alignment pattern and says nothing about the module size.
fn pad_finder_hull(image: &GrayImage, hull: BoundingBox, points: &[(f32, f32)]) -> BoundingBox {
    let sizes: Vec<f32> = points
        .iter()
        .take(3)
        .filter_map(|&p| finder_module_size(image, p))
        .collect();
    if sizes.is_empty() {
        return hull;
    }
    let module = sizes.iter().sum::<f32>() / sizes.len() as f32;
    hull.grown((FINDER_CENTRE_TO_EDGE * module).round() as u32)
}

/// The dark core of a finder pattern is three modules wide.
fn finder_module_size(image: &GrayImage, (cx, cy): (f32, f32)) -> Option<f32> {
    let (width, height) = image.dimensions();
    let (x, y) = (cx.round(), cy.round());
    if !(x >= 0.0 && y >= 0.0 && x < width as f32 && y < height as f32) {
        return None;
    }
    let (x, y) = (x as u32, y as u32);
    if !is_dark(image, x, y) {
        return None;
    }
    let mut left = x;
    while left > 0 && is_dark(image, left - 1, y) {
        left -= 1;
    }
    let mut right = x;
    while right + 1 < width && is_dark(image, right + 1, y) {
        right += 1;
    }
    Some((right - left + 1) as f32 / 3.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn fill(img: &mut GrayImage, x: u32, y: u32, w: u32, h: u32, value: u8) {
        for yy in y..y + h {
            for xx in x..x + w {
                img.put_pixel(xx, yy, Luma([value]));
            }
        }
    }

    // 2 px bars from x = 10 to 50, rows 8..22.
    fn bars() -> GrayImage {
        let mut img = GrayImage::from_pixel(60, 30, Luma([255]));
        for x in (10..50).step_by(4) {
            fill(&mut img, x, 8, 2, 14, 0);
        }
        img
    }

    // 7x7-module finder pattern with 4 px modules.
    fn finder(img: &mut GrayImage, x: u32, y: u32) {
        fill(img, x, y, 28, 28, 0);
        fill(img, x + 4, y + 4, 20, 20, 255);
        fill(img, x + 8, y + 8, 12, 12, 0);
    }

    #[test]
    fn scan_line_grows_to_full_bar_height() {
        let img = bars();
        let bbox = symbol_region(&img, &BarcodeFormat::CODE_128, &[(10.0, 15.0), (49.0, 15.0)])
            .expect("region");
        assert_eq!(bbox, BoundingBox::new(10, 8, 39, 14));
    }

    #[test]
    fn column_scan_grows_sideways() {
        let src = bars();
        let img = GrayImage::from_fn(30, 60, |x, y| *src.get_pixel(y, x));
        let bbox = symbol_region(&img, &BarcodeFormat::CODE_39, &[(15.0, 10.0), (15.0, 49.0)])
            .expect("region");
        assert_eq!(bbox, BoundingBox::new(8, 10, 14, 39));
    }

    #[test]
    fn blank_scan_line_keeps_the_hull() {
        let img = GrayImage::from_pixel(60, 30, Luma([255]));
        let bbox = symbol_region(&img, &BarcodeFormat::EAN_13, &[(10.0, 15.0), (49.0, 15.0)])
            .expect("region");
        assert_eq!(bbox, BoundingBox::new(10, 15, 39, 1));
    }

    #[test]
    fn finder_centres_are_padded_to_the_symbol_edge() {
        // 21-module symbol at (20, 20): finders at modules 0 and 14.
        let mut img = GrayImage::from_pixel(130, 130, Luma([255]));
        finder(&mut img, 20, 20);
        finder(&mut img, 76, 20);
        finder(&mut img, 20, 76);
        let points = [(34.0, 90.0), (34.0, 34.0), (90.0, 34.0)];

        let bbox = symbol_region(&img, &BarcodeFormat::QR_CODE, &points).expect("region");
        assert_eq!(bbox, BoundingBox::new(20, 20, 84, 84));
    }

    #[test]
    fn padding_is_clipped_to_the_frame() {
        // One 6 px-module finder in the corner, read slightly off centre.
        let mut img = GrayImage::from_pixel(100, 100, Luma([255]));
        fill(&mut img, 0, 0, 42, 42, 0);
        fill(&mut img, 6, 6, 30, 30, 255);
        fill(&mut img, 12, 12, 18, 18, 0);
        let points = [(13.0, 60.0), (13.0, 13.0), (60.0, 13.0)];

        let bbox = symbol_region(&img, &BarcodeFormat::QR_CODE, &points).expect("region");
        assert_eq!(bbox, BoundingBox::new(0, 0, 81, 81));
    }
}
