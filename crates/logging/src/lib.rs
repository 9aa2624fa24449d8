#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` is a process-wide leveled logger. Records are written as single
//! lines to an append-only file at a fixed location (`/var/log/log_c.log`),
//! each carrying a local timestamp, the process id, the function and line that
//! issued it, its severity and a formatted message:
//!
//! ```text
//! [2024-03-05 07:08:09] [PID 4242] serve[17] | WARN | x=5
//! ```
//!
//! # Design
//!
//! [`Logger`] owns the destination. It starts uninitialized, writing to
//! standard error, until [`Logger::initialize`] opens the file (mode `0640`)
//! and captures the process id and the minimum severity from the `LOG_LEVEL`
//! environment variable. Timestamps use the local UTC offset in effect when
//! each record is written. [`Logger::teardown`] closes the file again. The process-wide instance returned by [`global`] is what the
//! [`log_debug!`], [`log_info!`], [`log_warn!`] and [`log_error!`] macros write
//! to; tests and tools build their own [`Logger`] from a [`LoggerConfig`]
//! pointing elsewhere.
//!
//! Rendering goes into fixed-size stack buffers ([`Timestamp`],
//! [`RecordBuffer`]); records longer than [`MAX_RECORD_LEN`] bytes are
//! truncated.
//!
//! # Invariants
//!
//! - Each record is exactly one line ending in `\n`, written and flushed in a
//!   single locked step, so records from different threads never interleave.
//! - At most one file handle is open per logger; repeated initialization
//!   reuses it.
//! - Records below the threshold are dropped before the clock is read or the
//!   message formatted.
//!
//! # Errors
//!
//! Logging never fails from the caller's point of view. A log file that cannot
//! be opened, or a timestamp that cannot be rendered, produces a diagnostic on
//! the fallback stream prefixed with [`DIAGNOSTIC_PREFIX`]; I/O errors on
//! individual writes are dropped.
//!
//! # Examples
//!
//! ```
//! use logging::{Logger, LoggerConfig, log_info, log_warn};
//!
//! let dir = tempfile::tempdir()?;
//! let logger = Logger::new(LoggerConfig::new().with_path(dir.path().join("app.log")));
//! logger.initialize();
//!
//! log_info!(logger: &logger, "starting {} workers", 4);
//! log_warn!(logger: &logger, "queue at {}%", 90);
//! logger.teardown();
//!
//! let contents = std::fs::read_to_string(dir.path().join("app.log"))?;
//! assert_eq!(contents.lines().count(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # See also
//!
//! - [`logging_sink`] for the file opening and line sink used underneath.
//! - [`expand_template`] for messages whose template is only known at run time.

mod config;
mod global;
mod logger;
mod macros;
mod record;
mod severity;
mod source;
mod template;

#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use config::{DEFAULT_LOG_PATH, LEVEL_ENV_VAR, LoggerConfig};
pub use global::{global, initialize, teardown};
pub use logger::{DIAGNOSTIC_PREFIX, Logger};
pub use record::{MAX_RECORD_LEN, MAX_TIMESTAMP_LEN, RecordBuffer, Timestamp};
pub use severity::{ParseSeverityError, Severity};
pub use source::CallSite;
pub use template::expand_template;

#[cfg(feature = "tracing")]
pub use tracing_bridge::{LoggerLayer, init_tracing, init_tracing_with_filter};

#[doc(hidden)]
pub mod __private {
    pub use crate::source::type_name_of;
}
