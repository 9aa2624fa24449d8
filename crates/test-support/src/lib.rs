//! Shared helpers for tests across the workspace.
//!
//! [`SharedBuffer`] stands in for the standard error stream so tests can
//! inspect fallback output, and [`LogDir`] hands out a scratch directory with
//! a log path inside it.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tempfile::TempDir;

/// Cloneable in-memory writer whose contents can be read back after the
/// writer has been moved into the code under test.
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything written so far.
    pub fn contents(&self) -> Vec<u8> {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns everything written so far as UTF-8, replacing invalid sequences.
    pub fn contents_string(&self) -> String {
        String::from_utf8_lossy(&self.contents()).into_owned()
    }

    /// Returns the written output split into lines.
    pub fn lines(&self) -> Vec<String> {
        self.contents_string().lines().map(str::to_owned).collect()
    }

    /// Discards everything written so far.
    pub fn clear(&self) {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Temporary directory holding a single log file path.
///
/// The directory and everything in it is removed when the value is dropped.
#[derive(Debug)]
pub struct LogDir {
    dir: TempDir,
    log_path: PathBuf,
}

impl LogDir {
    /// Creates a fresh directory; the log file itself is not created.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temporary log directory");
        let log_path = dir.path().join("test.log");
        Self { dir, log_path }
    }

    /// Directory root.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the log file inside the directory.
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Path inside a subdirectory that does not exist, for open failures.
    pub fn unreachable_path(&self) -> PathBuf {
        self.dir.path().join("missing").join("test.log")
    }

    /// Reads the log file, returning an empty string when it does not exist.
    pub fn read_log(&self) -> String {
        std::fs::read_to_string(&self.log_path).unwrap_or_default()
    }

    /// Returns the log file contents split into lines.
    pub fn log_lines(&self) -> Vec<String> {
        self.read_log().lines().map(str::to_owned).collect()
    }
}

impl Default for LogDir {
    fn default() -> Self {
        Self::new()
    }
}
