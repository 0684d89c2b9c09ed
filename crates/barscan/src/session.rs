//! Per-session state and user notification.

use std::io::Write;

use barscan_core::{Detection, SessionDeduplicator};
use serde::{Deserialize, Serialize};

/// Receives every detection a driver decides to report.
pub trait Notifier {
    fn notify(&mut self, detection: &Detection);
}

/// Prints `[INFO] Found {SYMBOLOGY} barcode: {payload}` lines to stdout.
#[derive(Debug, Default)]
pub struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn notify(&mut self, detection: &Detection) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(
            out,
            "[INFO] Found {} barcode: {}",
            detection.symbology, detection.payload
        );
        let _ = out.flush();
    }
}

/// Collects reported detections in order.
impl Notifier for Vec<Detection> {
    fn notify(&mut self, detection: &Detection) {
        self.push(detection.clone());
    }
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    fn notify(&mut self, detection: &Detection) {
        (**self).notify(detection)
    }
}

/// Counters reported when a session terminates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Frames that went through the pipeline.
    pub frames: u64,
    /// Detections handed to the notifier.
    pub reported: u64,
    /// Distinct `(symbology, payload)` pairs seen.
    pub unique: usize,
}

/// State owned by one live session: the seen-set plus counters.
///
/// Created when the capture source is acquired and dropped with it.
#[derive(Debug, Default)]
pub struct ScanSession {
    dedup: SessionDeduplicator,
    frames: u64,
    reported: u64,
}

impl ScanSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_frame(&mut self) {
        self.frames += 1;
    }

    /// `true` on the first sighting of this pair in the session.
    pub fn observe(&mut self, detection: &Detection) -> bool {
        let fresh = self.dedup.observe(detection);
        if fresh {
            self.reported += 1;
        }
        fresh
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            frames: self.frames,
            reported: self.reported,
            unique: self.dedup.len(),
        }
    }
}
