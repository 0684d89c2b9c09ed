//! Frame preprocessing: luma conversion followed by a fixed binary threshold.

use image::{GrayImage, Luma, RgbImage};

/// Samples strictly above this value become 255, all others 0.
pub const BINARY_THRESHOLD: u8 = 127;

// ITU-R BT.601 weights in Q14 fixed point; they sum to 1 << 14.
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

/// BT.601 luma of one RGB sample, rounded to nearest.
#[inline]
pub fn luma_bt601(r: u8, g: u8, b: u8) -> u8 {
    let acc = LUMA_R * r as u32 + LUMA_G * g as u32 + LUMA_B * b as u32;
    ((acc + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
}

pub fn to_luma(frame: &RgbImage) -> GrayImage {
    GrayImage::from_fn(frame.width(), frame.height(), |x, y| {
        let [r, g, b] = frame.get_pixel(x, y).0;
        Luma([luma_bt601(r, g, b)])
    })
}

pub fn threshold_binary_mut(gray: &mut GrayImage, cutoff: u8) {
    for px in gray.pixels_mut() {
        px.0[0] = if px.0[0] > cutoff { u8::MAX } else { 0 };
    }
}

/// Turn a color frame into the decode-ready binary image.
///
/// The input frame is left untouched so it can be annotated afterwards.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip(frame), fields(width = frame.width(), height = frame.height()))
)]
pub fn preprocess(frame: &RgbImage) -> GrayImage {
    let mut gray = to_luma(frame);
    threshold_binary_mut(&mut gray, BINARY_THRESHOLD);
    gray
}
