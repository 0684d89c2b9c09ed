//! Display sinks: where annotated frames go.

use barscan_core::Frame;
use log::debug;

use crate::ScanError;

pub trait FrameSink {
    /// Present an annotated frame.
    fn show(&mut self, frame: &Frame) -> Result<(), ScanError>;

    /// Block until the user acknowledges the displayed frame.
    fn wait_for_ack(&mut self) -> Result<(), ScanError>;

    /// Short, non-blocking poll for a user cancellation request.
    fn cancel_requested(&mut self) -> bool {
        false
    }
}

impl<K: FrameSink + ?Sized> FrameSink for Box<K> {
    fn show(&mut self, frame: &Frame) -> Result<(), ScanError> {
        (**self).show(frame)
    }

    fn wait_for_ack(&mut self) -> Result<(), ScanError> {
        (**self).wait_for_ack()
    }

    fn cancel_requested(&mut self) -> bool {
        (**self).cancel_requested()
    }
}

/// No window: frames are dropped, acknowledgment is immediate.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeadlessSink;

impl HeadlessSink {
    pub fn new() -> Self {
        Self
    }
}

impl FrameSink for HeadlessSink {
    fn show(&mut self, frame: &Frame) -> Result<(), ScanError> {
        debug!("headless: dropping {}x{} frame", frame.width(), frame.height());
        Ok(())
    }

    fn wait_for_ack(&mut self) -> Result<(), ScanError> {
        debug!("headless: nothing to acknowledge");
        Ok(())
    }
}
