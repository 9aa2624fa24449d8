#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging-sink` provides the destination primitives used by the `logging`
//! crate: a [`LogSink`] that streams fully rendered records into any
//! [`std::io::Write`] implementor, and [`open_log_file`], which opens the
//! append-only log file and restricts its permissions before handing it out.
//!
//! # Design
//!
//! A [`LogSink`] never buffers across calls. Each record is handed to the
//! writer with a single `write_all` and flushed immediately, so a record is
//! visible to readers of the destination before the call returns. Rendering
//! happens upstream; the sink only sees complete, newline-terminated bytes.
//!
//! # Invariants
//!
//! - One call to [`LogSink::write_record`] issues exactly one `write_all`
//!   followed by one `flush`.
//! - [`open_log_file`] never returns a handle whose permissions could not be
//!   restricted; the handle is closed before the error is returned.
//!
//! # Errors
//!
//! [`LogSink`] surfaces [`std::io::Error`] values from the underlying writer.
//! [`open_log_file`] reports failures through [`SinkError`], which keeps the
//! offending path for diagnostics.
//!
//! # Examples
//!
//! ```
//! use logging_sink::LogSink;
//!
//! let mut sink = LogSink::new(Vec::new());
//! sink.write_record(b"[] [PID 1] main[3] | INFO | ready\n")?;
//! assert!(sink.get_ref().ends_with(b"ready\n"));
//! # Ok::<(), std::io::Error>(())
//! ```

mod file;
mod sink;

pub use file::{DEFAULT_LOG_MODE, SinkError, open_log_file};
pub use sink::LogSink;
