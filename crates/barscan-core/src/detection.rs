use serde::{Deserialize, Serialize};

use crate::Symbology;

/// Axis-aligned rectangle in frame pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Smallest box containing every point, at least one pixel in each
    /// dimension. Returns `None` for an empty or non-finite point set.
    ///
    /// A degenerate hull (a linear code's scan line) is widened to one pixel
    /// rather than rejected; recovering the full symbol is up to the decoder.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f32, f32)>,
    {
        let mut min_x = f32::INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;
        for (x, y) in points {
            if !x.is_finite() || !y.is_finite() {
                return None;
            }
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        if min_x > max_x || min_y > max_y {
            return None;
        }

        let x0 = min_x.floor() as i32;
        let y0 = min_y.floor() as i32;
        let x1 = max_x.ceil() as i32;
        let y1 = max_y.ceil() as i32;
        Some(Self {
            x: x0,
            y: y0,
            width: (x1 - x0).max(1) as u32,
            height: (y1 - y0).max(1) as u32,
        })
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width as i32)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height as i32)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.right() && y < self.bottom()
    }

    /// The box with `margin` pixels added on every side.
    pub fn grown(&self, margin: u32) -> Self {
        let m = margin.min(i32::MAX as u32) as i32;
        Self {
            x: self.x.saturating_sub(m),
            y: self.y.saturating_sub(m),
            width: self.width.saturating_add(margin.saturating_mul(2)),
            height: self.height.saturating_add(margin.saturating_mul(2)),
        }
    }

    /// The part of the box inside a `width` x `height` frame, if any.
    pub fn clipped(&self, width: u32, height: u32) -> Option<Self> {
        let x0 = self.x.max(0);
        let y0 = self.y.max(0);
        let x1 = self.right().min(width.min(i32::MAX as u32) as i32);
        let y1 = self.bottom().min(height.min(i32::MAX as u32) as i32);
        (x0 < x1 && y0 < y1).then(|| Self::new(x0, y0, (x1 - x0) as u32, (y1 - y0) as u32))
    }
}

/// One decoded code instance in the coordinate space of the frame it came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    pub symbology: Symbology,
    pub payload: String,
    pub bbox: BoundingBox,
}

/// Deduplication key: exact `(symbology, payload)` equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DetectionKey {
    pub symbology: Symbology,
    pub payload: String,
}

impl Detection {
    pub fn new(symbology: Symbology, payload: impl Into<String>, bbox: BoundingBox) -> Self {
        Self {
            symbology,
            payload: payload.into(),
            bbox,
        }
    }

    pub fn key(&self) -> DetectionKey {
        DetectionKey {
            symbology: self.symbology,
            payload: self.payload.clone(),
        }
    }

    /// Overlay text: `"{payload} ({SYMBOLOGY})"`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.payload, self.symbology)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hull_covers_all_points() {
        let bbox =
            BoundingBox::from_points([(10.4, 20.0), (50.0, 22.5), (48.2, 70.9), (12.0, 69.0)])
                .expect("bbox");
        assert_eq!(bbox, BoundingBox::new(10, 20, 40, 51));
        assert!(bbox.contains(10, 20));
        assert!(bbox.contains(49, 70));
        assert!(!bbox.contains(50, 71));
    }

    #[test]
    fn scan_line_gets_unit_height() {
        let bbox = BoundingBox::from_points([(5.0, 40.0), (95.0, 40.0)]).expect("bbox");
        assert_eq!(bbox.height, 1);
        assert_eq!(bbox.width, 90);
    }

    #[test]
    fn grow_then_clip_to_frame() {
        let bbox = BoundingBox::new(4, 10, 20, 5).grown(6);
        assert_eq!(bbox, BoundingBox::new(-2, 4, 32, 17));
        assert_eq!(bbox.clipped(25, 100), Some(BoundingBox::new(0, 4, 25, 17)));
        assert_eq!(BoundingBox::new(30, 30, 5, 5).clipped(25, 25), None);
    }

    #[test]
    fn empty_or_nan_points_have_no_hull() {
        assert!(BoundingBox::from_points(std::iter::empty()).is_none());
        assert!(BoundingBox::from_points([(f32::NAN, 1.0)]).is_none());
    }

    #[test]
    fn label_combines_payload_and_symbology() {
        let det = Detection::new(Symbology::Qrcode, "HELLO", BoundingBox::new(0, 0, 1, 1));
        assert_eq!(det.label(), "HELLO (QRCODE)");
        assert_eq!(det.key().payload, "HELLO");
    }
}
