//! crates/logging/src/macros.rs
//! Logging macros that capture the call site.
//!
//! Each macro takes a `format!`-style message. Without a `logger:` prefix the
//! record goes to the process-wide [`global`](crate::global) logger; with one,
//! to the given `&Logger`. The message is only formatted when its severity
//! passes the filter.

/// Logs a message at an explicit [`Severity`](crate::Severity).
///
/// # Examples
///
/// ```
/// use logging::{Logger, LoggerConfig, Severity, log_at};
///
/// let logger = Logger::with_fallback(LoggerConfig::new(), Vec::new());
/// log_at!(logger: &logger, Severity::Warn, "retrying in {}s", 5);
/// ```
#[macro_export]
macro_rules! log_at {
    (logger: $logger:expr, $severity:expr, $($arg:tt)+) => {{
        let logger: &$crate::Logger = $logger;
        let severity: $crate::Severity = $severity;
        if logger.enabled(severity) {
            logger.write(
                $crate::call_site!(),
                severity,
                ::core::format_args!($($arg)+),
            );
        }
    }};
    ($severity:expr, $($arg:tt)+) => {
        $crate::log_at!(logger: $crate::global(), $severity, $($arg)+)
    };
}

/// Logs a message at [`Severity::Debug`](crate::Severity::Debug).
#[macro_export]
macro_rules! log_debug {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::log_at!(logger: $logger, $crate::Severity::Debug, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!(logger: $crate::global(), $crate::Severity::Debug, $($arg)+)
    };
}

/// Logs a message at [`Severity::Info`](crate::Severity::Info).
///
/// # Examples
///
/// ```no_run
/// logging::initialize();
/// logging::log_info!("listening on port {}", 8080);
/// logging::teardown();
/// ```
#[macro_export]
macro_rules! log_info {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::log_at!(logger: $logger, $crate::Severity::Info, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!(logger: $crate::global(), $crate::Severity::Info, $($arg)+)
    };
}

/// Logs a message at [`Severity::Warn`](crate::Severity::Warn).
#[macro_export]
macro_rules! log_warn {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::log_at!(logger: $logger, $crate::Severity::Warn, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!(logger: $crate::global(), $crate::Severity::Warn, $($arg)+)
    };
}

/// Logs a message at [`Severity::Error`](crate::Severity::Error).
#[macro_export]
macro_rules! log_error {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::log_at!(logger: $logger, $crate::Severity::Error, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!(logger: $crate::global(), $crate::Severity::Error, $($arg)+)
    };
}
