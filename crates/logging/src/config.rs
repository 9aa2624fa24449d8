//! crates/logging/src/config.rs
//! Construction-time settings for a [`Logger`](crate::Logger).

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use logging_sink::DEFAULT_LOG_MODE;
use time::UtcOffset;

/// Fixed location of the process-wide log file.
pub const DEFAULT_LOG_PATH: &str = "/var/log/log_c.log";

/// Environment variable consulted for the minimum severity.
pub const LEVEL_ENV_VAR: &str = "LOG_LEVEL";

/// Settings a [`Logger`](crate::Logger) is built from.
///
/// The process-wide logger always uses [`LoggerConfig::default`]; explicit
/// instances may point elsewhere, which is how tests and the `logc` tool
/// avoid touching the fixed path.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoggerConfig {
    path: PathBuf,
    level_var: Cow<'static, str>,
    mode: u32,
    utc_offset: Option<UtcOffset>,
}

impl LoggerConfig {
    /// Default configuration: fixed path, `LOG_LEVEL`, mode `0o640`, local time.
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_LOG_PATH),
            level_var: Cow::Borrowed(LEVEL_ENV_VAR),
            mode: DEFAULT_LOG_MODE,
            utc_offset: None,
        }
    }

    /// Sets the log file path.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the environment variable that selects the minimum severity.
    pub fn with_level_var(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.level_var = name.into();
        self
    }

    /// Sets the permission bits applied to the log file once opened.
    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = mode;
        self
    }

    /// Renders timestamps at a fixed offset instead of looking up local time
    /// for each record.
    pub fn with_utc_offset(mut self, offset: UtcOffset) -> Self {
        self.utc_offset = Some(offset);
        self
    }

    /// Log file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name of the level environment variable.
    pub fn level_var(&self) -> &str {
        &self.level_var
    }

    /// Permission bits for the log file.
    pub const fn mode(&self) -> u32 {
        self.mode
    }

    /// Fixed timestamp offset, if one was configured.
    pub const fn utc_offset(&self) -> Option<UtcOffset> {
        self.utc_offset
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::new()
    }
}
