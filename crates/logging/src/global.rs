//! crates/logging/src/global.rs
//! The process-wide logger instance.

use std::sync::OnceLock;

use crate::logger::Logger;

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// Returns the process-wide logger.
///
/// The instance is created on first use with [`LoggerConfig::default`]
/// (`/var/log/log_c.log`, `LOG_LEVEL`) and lives until the process exits. It
/// starts uninitialized, so records logged before [`initialize`] go to
/// standard error.
///
/// [`LoggerConfig::default`]: crate::LoggerConfig::default
pub fn global() -> &'static Logger {
    GLOBAL.get_or_init(Logger::default)
}

/// Initializes the process-wide logger.
///
/// Shorthand for `global().initialize()`; see [`Logger::initialize`].
pub fn initialize() {
    global().initialize();
}

/// Closes the process-wide logger's file.
///
/// Shorthand for `global().teardown()`; see [`Logger::teardown`].
pub fn teardown() {
    global().teardown();
}
