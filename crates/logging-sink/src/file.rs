use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// Permission bits applied to the log file after it is opened: owner
/// read/write, group read.
pub const DEFAULT_LOG_MODE: u32 = 0o640;

/// Failure raised while preparing the log file destination.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The file could not be opened or created in append mode.
    #[error("failed to open log file '{}': {source}", path.display())]
    Open {
        /// Path that was being opened.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The file was opened but its permissions could not be restricted.
    #[error("failed to chmod log file '{}' to {mode:o}: {source}", path.display())]
    Permissions {
        /// Path of the file whose permissions were being changed.
        path: PathBuf,
        /// Requested permission bits.
        mode: u32,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// Opens `path` for appending, creating it when absent, and restricts its
/// permissions to `mode`.
///
/// The permission change goes through the freshly opened handle rather than
/// the path, so it always applies to the file that will receive records. If
/// it fails, the handle is closed before the error is returned and the
/// caller never observes a half-prepared destination.
///
/// On platforms without Unix permission bits the restriction step is
/// skipped.
///
/// # Examples
///
/// ```
/// use logging_sink::{DEFAULT_LOG_MODE, open_log_file};
///
/// let dir = tempfile::tempdir()?;
/// let path = dir.path().join("app.log");
/// let file = open_log_file(&path, DEFAULT_LOG_MODE)?;
/// drop(file);
/// assert!(path.exists());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn open_log_file(path: &Path, mode: u32) -> Result<File, SinkError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| SinkError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    restrict_permissions(&file, mode).map_err(|source| SinkError::Permissions {
        path: path.to_path_buf(),
        mode,
        source,
    })?;

    Ok(file)
}

#[cfg(unix)]
fn restrict_permissions(file: &File, mode: u32) -> io::Result<()> {
    use std::fs::Permissions;
    use std::os::unix::fs::PermissionsExt;

    file.set_permissions(Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &File, _mode: u32) -> io::Result<()> {
    Ok(())
}
