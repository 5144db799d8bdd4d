//! Logging capability handed to components at construction.
//!
//! Components never reach for a process-wide logger themselves. They hold a
//! [`SharedLogger`] and the application decides where the records go: the
//! default [`LogFacade`] forwards to the `log` crate (and from there to
//! whatever backend the binary installed, `env_logger` for the bundled demo).

use std::{fmt, sync::Arc};

use log::Level;

/// Leveled diagnostic sink.
///
/// Only [`log`](Self::log) is required; the level helpers forward to it.
pub trait Logger {
    /// Emit one record at `level`.
    fn log(&self, level: Level, args: fmt::Arguments<'_>);

    /// Emit a trace-level record.
    fn trace(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Trace, args);
    }

    /// Emit an info-level record.
    fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, args);
    }

    /// Emit a warning.
    fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Warn, args);
    }

    /// Emit an error record.
    fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, args);
    }
}

/// Reference-counted logger shared between the window, its backend and the
/// camera.
pub type SharedLogger = Arc<dyn Logger + Send + Sync>;

/// Forwards records to the `log` facade under a fixed target.
#[derive(Debug, Clone, Copy)]
pub struct LogFacade {
    target: &'static str,
}

impl LogFacade {
    /// Create a facade logging under `target`.
    #[must_use]
    pub const fn new(target: &'static str) -> Self {
        Self { target }
    }
}

impl Default for LogFacade {
    fn default() -> Self {
        Self::new("casement")
    }
}

impl Logger for LogFacade {
    fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        log::log!(target: self.target, level, "{args}");
    }
}

/// The logger used when the caller does not inject one.
#[must_use]
pub fn default_logger() -> SharedLogger {
    Arc::new(LogFacade::default())
}

/// Captures records in memory so tests can assert on diagnostics.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingLogger {
    records: std::sync::Mutex<Vec<(Level, String)>>,
}

#[cfg(test)]
impl RecordingLogger {
    pub(crate) fn records(&self) -> Vec<(Level, String)> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    pub(crate) fn contains(&self, level: Level, needle: &str) -> bool {
        self.records()
            .iter()
            .any(|(l, msg)| *l == level && msg.contains(needle))
    }
}

#[cfg(test)]
impl Logger for RecordingLogger {
    fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        if let Ok(mut records) = self.records.lock() {
            records.push((level, args.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_helpers_forward_to_log() {
        let logger = RecordingLogger::default();
        logger.trace(format_args!("t {}", 1));
        logger.info(format_args!("i"));
        logger.warn(format_args!("w"));
        logger.error(format_args!("e"));

        let levels: Vec<Level> =
            logger.records().into_iter().map(|(l, _)| l).collect();
        assert_eq!(
            levels,
            vec![Level::Trace, Level::Info, Level::Warn, Level::Error]
        );
        assert!(logger.contains(Level::Trace, "t 1"));
    }
}
