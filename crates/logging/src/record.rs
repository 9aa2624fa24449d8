//! crates/logging/src/record.rs
//! Fixed-capacity rendering of a single log record.
//!
//! A record has the layout
//!
//! ```text
//! [<YYYY-MM-DD HH:MM:SS>] [PID <pid>] <function>[<line>] | <SEVERITY> | <message>\n
//! ```
//!
//! Both the timestamp and the record are rendered into stack buffers of a
//! fixed size, so formatting a record never allocates. Records that do not
//! fit are truncated, never rejected.

use std::fmt::{self, Write as _};

use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::severity::Severity;
use crate::source::CallSite;

/// Maximum size of a rendered record in bytes, trailing newline included.
pub const MAX_RECORD_LEN: usize = 1024;

/// Maximum size of the rendered timestamp in bytes.
pub const MAX_TIMESTAMP_LEN: usize = 100;

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Rendered wall-clock timestamp.
#[derive(Clone, Copy)]
pub struct Timestamp {
    bytes: [u8; MAX_TIMESTAMP_LEN],
    len: usize,
}

impl Timestamp {
    /// Empty timestamp, used when local time cannot be determined.
    #[must_use]
    pub const fn blank() -> Self {
        Self {
            bytes: [0; MAX_TIMESTAMP_LEN],
            len: 0,
        }
    }

    /// Renders `datetime` as `YYYY-MM-DD HH:MM:SS`.
    ///
    /// Fails when the rendered text does not fit [`MAX_TIMESTAMP_LEN`] bytes.
    pub fn format(datetime: OffsetDateTime) -> Result<Self, time::error::Format> {
        let mut bytes = [0; MAX_TIMESTAMP_LEN];
        let len = {
            let mut cursor: &mut [u8] = &mut bytes;
            datetime.format_into(&mut cursor, TIMESTAMP_FORMAT)?
        };
        Ok(Self { bytes, len })
    }

    /// Rendered text; empty for a blank timestamp.
    #[must_use]
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.bytes[..self.len]).unwrap_or_default()
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Timestamp").field(&self.as_str()).finish()
    }
}

/// Bounded buffer a record is rendered into.
///
/// Writes past the capacity are dropped on a UTF-8 character boundary, the
/// same way `snprintf` truncates. One byte is always kept free for the
/// newline appended by [`RecordBuffer::as_line`].
pub struct RecordBuffer {
    bytes: [u8; MAX_RECORD_LEN],
    len: usize,
}

impl RecordBuffer {
    const BODY_CAPACITY: usize = MAX_RECORD_LEN - 1;

    /// Creates an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bytes: [0; MAX_RECORD_LEN],
            len: 0,
        }
    }

    /// Renders a complete record, replacing any previous content.
    ///
    /// A `Display` implementation inside `message` that reports an error
    /// stops the message where it failed; what was rendered so far is kept.
    pub fn render(
        &mut self,
        timestamp: &Timestamp,
        pid: u32,
        site: CallSite,
        severity: Severity,
        message: fmt::Arguments<'_>,
    ) {
        self.len = 0;
        // Writes into the buffer itself never fail; only user Display impls can.
        let _ = write!(
            self,
            "[{}] [PID {pid}] {site} | {severity} | ",
            timestamp.as_str()
        );
        let _ = self.write_fmt(message);
        // Keep one record on one line even if the message spans several.
        for byte in &mut self.bytes[..self.len] {
            if *byte == b'\n' {
                *byte = b' ';
            }
        }
    }

    /// Rendered text without the trailing newline.
    #[must_use]
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.bytes[..self.len]).unwrap_or_default()
    }

    /// Terminates the record with a newline and returns the bytes to write.
    pub fn as_line(&mut self) -> &[u8] {
        self.bytes[self.len] = b'\n';
        &self.bytes[..=self.len]
    }
}

impl Default for RecordBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Write for RecordBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let available = Self::BODY_CAPACITY - self.len;
        let take = floor_char_boundary(s, available);
        self.bytes[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        Ok(())
    }
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    (0..=index.min(s.len()))
        .rev()
        .find(|&i| s.is_char_boundary(i))
        .unwrap_or(0)
}
