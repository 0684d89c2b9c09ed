//! External cancellation of a live session.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use log::debug;

/// Polled by the live driver after each frame.
pub trait CancelSignal {
    fn is_cancelled(&self) -> bool;
}

/// Never fires. Sessions end only through the sink or the source.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeverCancel;

impl CancelSignal for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl CancelSignal for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::SeqCst)
    }
}

impl<C: CancelSignal + ?Sized> CancelSignal for Arc<C> {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

impl<C: CancelSignal + ?Sized> CancelSignal for &C {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

static INTERRUPTED: OnceLock<Arc<AtomicBool>> = OnceLock::new();

/// Fires once the process receives Ctrl+C (SIGINT/SIGTERM on unix).
///
/// The OS handler can only be registered once per process, so every
/// `install` after the first shares the same flag.
#[derive(Clone, Debug)]
pub struct CtrlCSignal {
    flag: Arc<AtomicBool>,
}

impl CtrlCSignal {
    pub fn install() -> Result<Self, ctrlc::Error> {
        if let Some(flag) = INTERRUPTED.get() {
            return Ok(Self { flag: flag.clone() });
        }
        let flag = Arc::new(AtomicBool::new(false));
        let handler_flag = flag.clone();
        ctrlc::set_handler(move || {
            handler_flag.store(true, Ordering::SeqCst);
        })?;
        let flag = INTERRUPTED.get_or_init(|| flag).clone();
        debug!("ctrl-c handler installed");
        Ok(Self { flag })
    }
}

impl CancelSignal for CtrlCSignal {
    fn is_cancelled(&self) -> bool {
        self.flag.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_flag_is_a_signal() {
        let flag = Arc::new(AtomicBool::new(false));
        let signal = flag.clone();
        assert!(!signal.is_cancelled());
        flag.store(true, Ordering::SeqCst);
        assert!(signal.is_cancelled());
        assert!(!NeverCancel.is_cancelled());
    }
}
