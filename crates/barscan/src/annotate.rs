//! Overlay drawing: one outline and one text label per detection.

use barscan_core::{BoundingBox, Detection, Frame};
use image::Rgb;
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::font::{glyph, ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH};

pub const BOX_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
pub const LABEL_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Gap in pixels between the label's baseline and the box's top edge.
pub const LABEL_OFFSET: i32 = 10;

/// Draw `detection`'s outline and `"{payload} ({SYMBOLOGY})"` label.
pub fn annotate(frame: &mut Frame, detection: &Detection) {
    draw_box(frame, &detection.bbox, BOX_COLOR);
    let (x, y) = label_origin(frame, &detection.bbox);
    draw_text(frame, x, y, &detection.label(), LABEL_COLOR);
}

/// One-pixel outline; parts outside the frame are clipped.
pub fn draw_box(frame: &mut Frame, bbox: &BoundingBox, color: Rgb<u8>) {
    let rect = Rect::at(bbox.x, bbox.y).of_size(bbox.width.max(1), bbox.height.max(1));
    draw_hollow_rect_mut(frame, rect, color);
}

/// Top-left corner of the label: above the box, pulled back inside the frame.
fn label_origin(frame: &Frame, bbox: &BoundingBox) -> (i32, i32) {
    let max_y = (frame.height() as i32 - GLYPH_HEIGHT as i32).max(0);
    let y = (bbox.y - LABEL_OFFSET - GLYPH_HEIGHT as i32).clamp(0, max_y);
    (bbox.x.max(0), y)
}

/// Render `text` with the built-in bitmap font, top-left corner at `(x, y)`.
pub fn draw_text(frame: &mut Frame, x: i32, y: i32, text: &str, color: Rgb<u8>) {
    let (width, height) = (frame.width() as i32, frame.height() as i32);
    let mut pen_x = x;
    for ch in text.chars() {
        if pen_x >= width {
            break;
        }
        for (row, bits) in glyph(ch).iter().enumerate() {
            let py = y + row as i32;
            if py < 0 || py >= height {
                continue;
            }
            for col in 0..GLYPH_WIDTH {
                if (bits >> (GLYPH_WIDTH - 1 - col)) & 1 == 0 {
                    continue;
                }
                let px = pen_x + col as i32;
                if px >= 0 && px < width {
                    frame.put_pixel(px as u32, py as u32, color);
                }
            }
        }
        pen_x += ADVANCE as i32;
    }
}
