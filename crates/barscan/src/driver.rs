//! Outer control for the two operating modes.
//!
//! Both drivers wrap the same [`Pipeline`] step and own their frame source for
//! exactly one session: the source is dropped before the driver reports
//! [`DriverState::Terminated`], on success and on error alike.

use std::collections::HashSet;

use barscan_core::DetectionKey;
use barscan_decode::Decoder;
use log::{debug, info};

use crate::cancel::CancelSignal;
use crate::pipeline::Pipeline;
use crate::session::{Notifier, ScanSession, SessionSummary};
use crate::sink::FrameSink;
use crate::source::FrameSource;
use crate::ScanError;

/// Lifecycle of a driver. Running again starts a new session from `Processing`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Processing,
    Terminated,
}

/// Scan one still frame, report everything, wait for acknowledgment.
pub struct ImageDriver<D> {
    pipeline: Pipeline<D>,
    state: DriverState,
}

impl<D: Decoder> ImageDriver<D> {
    pub fn new(pipeline: Pipeline<D>) -> Self {
        Self {
            pipeline,
            state: DriverState::Idle,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Run one image session.
    ///
    /// Every detection is reported, duplicates included. A source that yields
    /// no frame at all is `SourceUnavailable`.
    pub fn run<S, K, N>(
        &mut self,
        mut source: S,
        sink: &mut K,
        mut notifier: N,
    ) -> Result<SessionSummary, ScanError>
    where
        S: FrameSource,
        K: FrameSink + ?Sized,
        N: Notifier,
    {
        self.state = DriverState::Processing;
        let result = self.scan_once(&mut source, sink, &mut notifier);
        drop(source);
        self.state = DriverState::Terminated;
        result
    }

    fn scan_once<S, K, N>(
        &mut self,
        source: &mut S,
        sink: &mut K,
        notifier: &mut N,
    ) -> Result<SessionSummary, ScanError>
    where
        S: FrameSource,
        K: FrameSink + ?Sized,
        N: Notifier,
    {
        let mut frame = source
            .next_frame()?
            .ok_or_else(|| ScanError::source_unavailable(source.name(), "no frame available"))?;
        let detections = self.pipeline.process_frame(&mut frame)?;

        let mut unique: HashSet<DetectionKey> = HashSet::new();
        for detection in &detections {
            unique.insert(detection.key());
            notifier.notify(detection);
        }
        info!(
            "{}: {} detection(s), {} unique",
            source.name(),
            detections.len(),
            unique.len()
        );

        sink.show(&frame)?;
        sink.wait_for_ack()?;

        Ok(SessionSummary {
            frames: 1,
            reported: detections.len() as u64,
            unique: unique.len(),
        })
    }
}

/// Scan frames until cancelled (or the source runs dry), reporting each
/// `(symbology, payload)` pair once per session.
pub struct LiveDriver<D> {
    pipeline: Pipeline<D>,
    state: DriverState,
}

impl<D: Decoder> LiveDriver<D> {
    pub fn new(pipeline: Pipeline<D>) -> Self {
        Self {
            pipeline,
            state: DriverState::Idle,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Run one live session on `source`.
    ///
    /// Cancellation (from the sink or `cancel`) is checked after each frame
    /// has been displayed, never mid-frame. A source that returns `Ok(None)`
    /// ends the session normally.
    pub fn run<S, K, C, N>(
        &mut self,
        mut source: S,
        sink: &mut K,
        cancel: &C,
        mut notifier: N,
    ) -> Result<SessionSummary, ScanError>
    where
        S: FrameSource,
        K: FrameSink + ?Sized,
        C: CancelSignal + ?Sized,
        N: Notifier,
    {
        self.state = DriverState::Processing;
        info!("live session started on {}", source.name());

        let mut session = ScanSession::new();
        let result = self.scan_loop(&mut source, sink, cancel, &mut notifier, &mut session);
        drop(source);
        self.state = DriverState::Terminated;

        let summary = session.summary();
        info!(
            "live session ended: {} frame(s), {} unique code(s)",
            summary.frames, summary.unique
        );
        result.map(|()| summary)
    }

    fn scan_loop<S, K, C, N>(
        &mut self,
        source: &mut S,
        sink: &mut K,
        cancel: &C,
        notifier: &mut N,
        session: &mut ScanSession,
    ) -> Result<(), ScanError>
    where
        S: FrameSource,
        K: FrameSink + ?Sized,
        C: CancelSignal + ?Sized,
        N: Notifier,
    {
        loop {
            let Some(mut frame) = source.next_frame()? else {
                info!("{} exhausted", source.name());
                return Ok(());
            };
            session.record_frame();

            for detection in self.pipeline.process_frame(&mut frame)? {
                if session.observe(&detection) {
                    info!("new {} code: {}", detection.symbology, detection.payload);
                    notifier.notify(&detection);
                } else {
                    debug!("already reported: {}", detection.label());
                }
            }

            sink.show(&frame)?;

            if sink.cancel_requested() || cancel.is_cancelled() {
                info!("cancellation requested");
                return Ok(());
            }
        }
    }
}
