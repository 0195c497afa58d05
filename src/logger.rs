//! Custom logging module.
//!
//! This module provides a capturing logger implementation that formats log
//! entries and keeps them in a shared buffer for the on-screen debug
//! console. The buffer is owned by the logger, not by the application
//! state, so logging from inside a state-mutating handler never deadlocks.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::{Arc, Mutex};

/// Upper bound on retained entries; older lines are dropped first.
///
const MAX_ENTRIES: usize = 500;

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {} {}", timestamp, level_str, record.args())
}

/// Read handle over the captured log lines.
///
#[derive(Clone)]
pub struct LogBuffer {
    entries: Arc<Mutex<Vec<String>>>,
}

impl LogBuffer {
    /// Snapshot of the captured lines, oldest first.
    ///
    pub fn entries(&self) -> Vec<String> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(_) => vec![],
        }
    }

    fn push(&self, line: String) {
        if let Ok(mut entries) = self.entries.lock() {
            if entries.len() >= MAX_ENTRIES {
                entries.remove(0);
            }
            entries.push(line);
        }
        // If the lock is poisoned the line is dropped; the console is a
        // debugging aid, never worth failing over.
    }
}

/// Capturing logger feeding the debug console buffer.
///
pub struct CapturingLogger {
    buffer: LogBuffer,
    level: LevelFilter,
}

impl CapturingLogger {
    pub fn new(level: LevelFilter) -> Self {
        CapturingLogger {
            buffer: LogBuffer {
                entries: Arc::new(Mutex::new(vec![])),
            },
            level,
        }
    }

    /// Read handle for the console renderer.
    ///
    pub fn buffer(&self) -> LogBuffer {
        self.buffer.clone()
    }

    /// Install as the global logger. Fails if another logger is already
    /// installed.
    ///
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for CapturingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.buffer.push(format_log(record));
        }
    }

    fn flush(&self) {}
}
