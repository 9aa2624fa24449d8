//! crates/logging/src/logger.rs
//! The logger: destination lifecycle, level filtering and record output.

use std::env;
use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::process;
use std::sync::atomic::{AtomicI32, AtomicU8, AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use logging_sink::{LogSink, open_log_file};
use time::{OffsetDateTime, UtcOffset};

use crate::config::LoggerConfig;
use crate::record::{RecordBuffer, Timestamp};
use crate::severity::Severity;
use crate::source::CallSite;
use crate::template::expand_template;

/// Prefix of diagnostics the logger writes about itself.
pub const DIAGNOSTIC_PREFIX: &str = "[logging]";

/// Sentinel stored while no local UTC offset has been resolved. Real offsets
/// are bounded well inside ±26 hours, so `i32::MIN` cannot collide.
const OFFSET_UNKNOWN: i32 = i32::MIN;

type FallbackWriter = Box<dyn Write + Send>;

/// Resolves the local UTC offset in effect at a given instant.
type OffsetLookup = fn(OffsetDateTime) -> Option<UtcOffset>;

fn system_offset_at(now: OffsetDateTime) -> Option<UtcOffset> {
    UtcOffset::local_offset_at(now).ok()
}

/// Everything guarded by the destination lock.
struct Destination {
    file: Option<LogSink<File>>,
    fallback: LogSink<FallbackWriter>,
}

impl Destination {
    fn emit(&mut self, record: &[u8]) {
        // Write and flush failures are dropped: callers never see them.
        let _ = match self.file.as_mut() {
            Some(file) => file.write_record(record),
            None => self.fallback.write_record(record),
        };
    }

    fn report(&mut self, context: &str, error: &dyn fmt::Display) {
        let line = format!("{DIAGNOSTIC_PREFIX} {context}: {error}\n");
        let _ = self.fallback.write_record(line.as_bytes());
    }
}

/// Leveled logger writing one line per record to an append-only file.
///
/// A logger starts out uninitialized: records go to the fallback stream
/// (standard error unless [`with_fallback`](Self::with_fallback) chose
/// another writer), the pid renders as `0` and the threshold is
/// [`Severity::Info`]. [`initialize`](Self::initialize) opens the log file and
/// captures the pid and the threshold; [`teardown`](Self::teardown) closes the
/// file again.
///
/// Timestamps use the offset pinned in the [`LoggerConfig`] if there is one.
/// Otherwise the local offset is looked up for the instant of each record, so
/// a daylight-saving change shows up in the very next record. When the system
/// refuses that lookup the last offset that did resolve is reused, and a
/// logger that never resolved one writes a blank timestamp.
///
/// No operation reports failure to its caller. Problems opening the file or
/// formatting a timestamp are written once to the fallback stream, prefixed
/// with [`DIAGNOSTIC_PREFIX`]; failed writes are dropped silently.
///
/// # Concurrency
///
/// The destination (file handle and fallback writer) sits behind one mutex.
/// `initialize` and `teardown` hold it while opening or closing the file and
/// every write holds it for the duration of its write and flush, so a
/// teardown can never close a handle that a writer is still using and two
/// records never interleave. Records are rendered before the lock is taken;
/// the critical section covers only the I/O. The pid, threshold and last
/// resolved offset are atomics and are read without locking.
///
/// # Examples
///
/// ```
/// use logging::{CallSite, Logger, LoggerConfig, Severity};
///
/// let dir = tempfile::tempdir()?;
/// let path = dir.path().join("app.log");
/// let logger = Logger::new(LoggerConfig::new().with_path(&path));
/// logger.initialize();
///
/// logger.write(CallSite::new("main", 7), Severity::Warn, format_args!("x={}", 5));
/// logger.teardown();
///
/// let contents = std::fs::read_to_string(&path)?;
/// assert!(contents.ends_with("main[7] | WARN | x=5\n"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Logger {
    config: LoggerConfig,
    destination: Mutex<Destination>,
    pid: AtomicU32,
    min_level: AtomicU8,
    last_offset: AtomicI32,
    offset_lookup: OffsetLookup,
}

impl Logger {
    /// Creates an uninitialized logger that falls back to standard error.
    pub fn new(config: LoggerConfig) -> Self {
        Self::with_fallback(config, io::stderr())
    }

    /// Creates an uninitialized logger with a custom fallback writer.
    ///
    /// The fallback receives records while no file is open, plus the
    /// logger's own diagnostics.
    pub fn with_fallback<W>(config: LoggerConfig, fallback: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            config,
            destination: Mutex::new(Destination {
                file: None,
                fallback: LogSink::new(Box::new(fallback)),
            }),
            pid: AtomicU32::new(0),
            min_level: AtomicU8::new(Severity::Info as u8),
            last_offset: AtomicI32::new(OFFSET_UNKNOWN),
            offset_lookup: system_offset_at,
        }
    }

    #[cfg(test)]
    fn with_offset_lookup(mut self, lookup: OffsetLookup) -> Self {
        self.offset_lookup = lookup;
        self
    }

    /// Configuration the logger was built with.
    pub const fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Opens the log file and captures the pid and threshold.
    ///
    /// A file that is already open is kept as is; calling this repeatedly
    /// never leaks handles. The pid and threshold are refreshed on every
    /// call, and the local offset is resolved once so later writes have a
    /// value to reuse if their own lookup fails. When the file cannot be
    /// opened, or its permissions cannot be restricted, a diagnostic is
    /// written to the fallback stream and the logger keeps writing there.
    pub fn initialize(&self) {
        {
            let mut destination = self.lock_destination();
            if destination.file.is_none() {
                match open_log_file(self.config.path(), self.config.mode()) {
                    Ok(file) => destination.file = Some(LogSink::new(file)),
                    Err(error) => destination.report("initialize", &error),
                }
            }
        }

        self.pid.store(process::id(), Ordering::Release);

        let raw_level = env::var(self.config.level_var()).ok();
        let level = Severity::from_env_value(raw_level.as_deref());
        self.min_level.store(level as u8, Ordering::Release);

        let _ = self.offset_at(OffsetDateTime::now_utc());
    }

    /// Closes the log file, if one is open.
    ///
    /// Later records go to the fallback stream until the next
    /// [`initialize`](Self::initialize). Calling this without an open file
    /// does nothing.
    pub fn teardown(&self) {
        let mut destination = self.lock_destination();
        if let Some(mut file) = destination.file.take() {
            let _ = file.flush();
        }
    }

    /// Reports whether records currently go to the log file.
    pub fn is_file_open(&self) -> bool {
        self.lock_destination().file.is_some()
    }

    /// Current minimum severity.
    pub fn min_level(&self) -> Severity {
        Severity::from_repr(self.min_level.load(Ordering::Acquire))
    }

    /// Process id captured by the last [`initialize`](Self::initialize), or `0`.
    pub fn pid(&self) -> u32 {
        self.pid.load(Ordering::Acquire)
    }

    /// Reports whether a record of `severity` passes the filter.
    pub fn enabled(&self, severity: Severity) -> bool {
        severity >= self.min_level()
    }

    /// Writes one record.
    ///
    /// Records below the threshold return immediately without reading the
    /// clock. Otherwise the record is rendered (truncated to
    /// [`MAX_RECORD_LEN`](crate::MAX_RECORD_LEN) bytes if needed), written to
    /// the current destination in one piece and flushed.
    pub fn write(&self, site: CallSite, severity: Severity, message: fmt::Arguments<'_>) {
        if !self.enabled(severity) {
            return;
        }

        let timestamp = match self.timestamp() {
            Ok(timestamp) => timestamp,
            Err(error) => {
                self.lock_destination().report(
                    "write",
                    &format_args!("failed to format timestamp: {error}"),
                );
                return;
            }
        };

        let mut record = RecordBuffer::new();
        record.render(&timestamp, self.pid(), site, severity, message);
        self.lock_destination().emit(record.as_line());
    }

    /// Writes a [`Severity::Debug`] record.
    pub fn debug(&self, site: CallSite, message: fmt::Arguments<'_>) {
        self.write(site, Severity::Debug, message);
    }

    /// Writes a [`Severity::Info`] record.
    pub fn info(&self, site: CallSite, message: fmt::Arguments<'_>) {
        self.write(site, Severity::Info, message);
    }

    /// Writes a [`Severity::Warn`] record.
    pub fn warn(&self, site: CallSite, message: fmt::Arguments<'_>) {
        self.write(site, Severity::Warn, message);
    }

    /// Writes a [`Severity::Error`] record.
    pub fn error(&self, site: CallSite, message: fmt::Arguments<'_>) {
        self.write(site, Severity::Error, message);
    }

    /// Writes a record whose message is a runtime printf-style template.
    ///
    /// See [`expand_template`] for how conversions and malformed templates
    /// are rendered.
    pub fn write_template<A>(&self, site: CallSite, severity: Severity, template: &str, args: &[A])
    where
        A: fmt::Display,
    {
        if !self.enabled(severity) {
            return;
        }
        let message = expand_template(template, args);
        self.write(site, severity, format_args!("{message}"));
    }

    fn timestamp(&self) -> Result<Timestamp, time::error::Format> {
        let now = OffsetDateTime::now_utc();
        match self.offset_at(now) {
            Some(offset) => Timestamp::format(now.to_offset(offset)),
            None => Ok(Timestamp::blank()),
        }
    }

    /// Offset for a record stamped at `now`: the pinned one, else a fresh
    /// lookup, else the last lookup that succeeded.
    fn offset_at(&self, now: OffsetDateTime) -> Option<UtcOffset> {
        if let Some(offset) = self.config.utc_offset() {
            return Some(offset);
        }
        if let Some(offset) = (self.offset_lookup)(now) {
            self.last_offset.store(offset.whole_seconds(), Ordering::Release);
            return Some(offset);
        }
        match self.last_offset.load(Ordering::Acquire) {
            OFFSET_UNKNOWN => None,
            seconds => UtcOffset::from_whole_seconds(seconds).ok(),
        }
    }

    fn lock_destination(&self) -> MutexGuard<'_, Destination> {
        self.destination
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LoggerConfig::default())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.config)
            .field("file_open", &self.is_file_open())
            .field("pid", &self.pid())
            .field("min_level", &self.min_level())
            .finish_non_exhaustive()
    }
}
