//! Minimal logger.
//!
//! The logger prints `[elapsed LEVEL] message` to stderr with a simple
//! elapsed-time prefix. Use `init_with_level` to install it once at startup.
//! Stdout stays reserved for scan results.
//!
//! Records from this workspace's crates pass at the requested level. Records
//! from dependencies (capture backends are chatty) pass at `warn` at most.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

const OWN_TARGET_PREFIX: &str = "barscan";

fn passes(level: LevelFilter, metadata: &Metadata) -> bool {
    let cap = if metadata.target().starts_with(OWN_TARGET_PREFIX) {
        level
    } else {
        level.min(LevelFilter::Warn)
    };
    metadata.level() <= cap
}

struct SimpleLogger {
    level: LevelFilter,
    started: Instant,
}

impl Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        passes(self.level, metadata)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let elapsed = self.started.elapsed().as_secs_f64();
        let mut stderr = std::io::stderr();
        let _ = writeln!(
            stderr,
            "[{:7.3}s {:>5}] {}",
            elapsed,
            record.level(),
            record.args()
        );
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<SimpleLogger> = OnceLock::new();

/// Install the simple logger with the provided level filter.
///
/// Calling this more than once is a no-op after the first successful
/// initialization.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| SimpleLogger {
            level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// Install a `tracing` subscriber. `log` records are forwarded into it by
/// `tracing-subscriber`'s log bridge.
///
/// `RUST_LOG` wins over `default_filter` when set.
#[cfg(feature = "tracing")]
pub fn init_tracing(default_filter: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    if json {
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_span_events(FmtSpan::CLOSE)
            .json()
            .flatten_event(true)
            .finish()
            .try_init();
    } else {
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_span_events(FmtSpan::CLOSE)
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, MetadataBuilder};

    fn meta(target: &str, level: Level) -> Metadata<'_> {
        MetadataBuilder::new().target(target).level(level).build()
    }

    #[test]
    fn own_crates_use_the_requested_level() {
        assert!(passes(LevelFilter::Debug, &meta("barscan::driver", Level::Debug)));
        assert!(passes(LevelFilter::Info, &meta("barscan_decode::rxing_backend", Level::Info)));
        assert!(!passes(LevelFilter::Info, &meta("barscan", Level::Debug)));
    }

    #[test]
    fn dependencies_are_capped_at_warn() {
        assert!(!passes(LevelFilter::Trace, &meta("nokhwa", Level::Info)));
        assert!(passes(LevelFilter::Trace, &meta("nokhwa", Level::Warn)));
        assert!(!passes(LevelFilter::Error, &meta("rxing", Level::Warn)));
    }
}
