//! Event log for the RAM disk
//!
//! Fixed-capacity ring of static messages. Once full, the oldest records are
//! overwritten; `log_count` keeps counting so callers can tell how much was lost.

use alloc::vec::Vec;
use spin::Mutex;

const MAX_LOG_ENTRIES: usize = 64;

/// Severity of a log record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Request or lifecycle failure
    Error,
    /// Lifecycle event
    Info,
    /// Per-byte detail (only emitted with the `trace` feature)
    Trace,
}

/// One log record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogRecord {
    /// Severity
    pub level: LogLevel,
    /// Message text
    pub message: &'static str,
    /// Associated value (sector, byte count, ...)
    pub value: Option<u64>,
}

struct LogRing {
    entries: [Option<LogRecord>; MAX_LOG_ENTRIES],
    total: usize,
}

static LOG_BUFFER: Mutex<LogRing> = Mutex::new(LogRing {
    entries: [None; MAX_LOG_ENTRIES],
    total: 0,
});

/// Append a record to the ring
pub fn log(level: LogLevel, message: &'static str, value: Option<u64>) {
    let mut ring = LOG_BUFFER.lock();
    let idx = ring.total % MAX_LOG_ENTRIES;
    ring.entries[idx] = Some(LogRecord {
        level,
        message,
        value,
    });
    ring.total += 1;
}

/// Snapshot of the retained records, oldest first
pub fn get_logs() -> Vec<LogRecord> {
    let ring = LOG_BUFFER.lock();
    let retained = ring.total.min(MAX_LOG_ENTRIES);
    let first = ring.total - retained;
    (first..ring.total)
        .filter_map(|n| ring.entries[n % MAX_LOG_ENTRIES])
        .collect()
}

/// Number of records ever logged
pub fn log_count() -> usize {
    LOG_BUFFER.lock().total
}

#[doc(hidden)]
#[cfg(feature = "trace")]
pub fn trace(message: &'static str, value: u64) {
    log(LogLevel::Trace, message, Some(value));
}

#[doc(hidden)]
#[cfg(not(feature = "trace"))]
pub fn trace(_message: &'static str, _value: u64) {}


// Macros for easier logging
/// Log an informational record, optionally with a value
#[macro_export]
macro_rules! log_info {
    ($msg:expr) => {
        $crate::logger::log($crate::logger::LogLevel::Info, $msg, None)
    };
    ($msg:expr, $value:expr) => {
        $crate::logger::log($crate::logger::LogLevel::Info, $msg, Some($value as u64))
    };
}

/// Log an error record, optionally with a value
#[macro_export]
macro_rules! log_error {
    ($msg:expr) => {
        $crate::logger::log($crate::logger::LogLevel::Error, $msg, None)
    };
    ($msg:expr, $value:expr) => {
        $crate::logger::log($crate::logger::LogLevel::Error, $msg, Some($value as u64))
    };
}

/// Log a trace record; compiled out without the `trace` feature
#[macro_export]
macro_rules! log_trace {
    ($msg:expr, $value:expr) => {
        $crate::logger::trace($msg, $value as u64)
    };
}
