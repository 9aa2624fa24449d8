//! Integration tests for opening, reusing and closing the log file.

use std::fs;

use logging::{CallSite, Logger, LoggerConfig, log_info};
use test_support::{LogDir, SharedBuffer};

fn logger_for(dir: &LogDir) -> (Logger, SharedBuffer) {
    let fallback = SharedBuffer::new();
    let config = LoggerConfig::new()
        .with_path(dir.log_path())
        .with_level_var("LOGGING_LIFECYCLE_TEST_LEVEL_NEVER_SET");
    (Logger::with_fallback(config, fallback.clone()), fallback)
}

// ============================================================================
// Initialize
// ============================================================================

/// Verifies initialize creates the file.
#[test]
fn initialize_creates_file() {
    let dir = LogDir::new();
    let (logger, fallback) = logger_for(&dir);
    logger.initialize();

    assert!(dir.log_path().exists());
    assert!(logger.is_file_open());
    assert!(fallback.contents().is_empty());
}

/// Verifies existing content is preserved and new records are appended.
#[test]
fn initialize_appends_to_existing_file() {
    let dir = LogDir::new();
    fs::write(dir.log_path(), "previous run\n").expect("seed log");

    let (logger, _fallback) = logger_for(&dir);
    logger.initialize();
    log_info!(logger: &logger, "this run");

    let lines = dir.log_lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "previous run");
    assert!(lines[1].ends_with("| INFO | this run"));
}

/// Verifies a second initialize keeps the handle instead of reopening.
///
/// The file is unlinked between the calls. A reopen would recreate it at the
/// path; reusing the handle leaves the path empty.
#[test]
fn repeated_initialize_keeps_existing_handle() {
    let dir = LogDir::new();
    let (logger, _fallback) = logger_for(&dir);
    logger.initialize();
    fs::remove_file(dir.log_path()).expect("unlink log");

    logger.initialize();
    log_info!(logger: &logger, "into unlinked file");

    assert!(logger.is_file_open());
    assert!(!dir.log_path().exists());
}

/// Verifies the new file is created with mode 0640.
#[cfg(unix)]
#[test]
fn new_file_is_group_readable_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = LogDir::new();
    let (logger, _fallback) = logger_for(&dir);
    logger.initialize();

    let mode = fs::metadata(dir.log_path()).expect("stat log").permissions().mode();
    assert_eq!(mode & 0o777, 0o640);
}

/// Verifies a custom mode is applied.
#[cfg(unix)]
#[test]
fn custom_mode_is_applied() {
    use std::os::unix::fs::PermissionsExt;

    let dir = LogDir::new();
    let config = LoggerConfig::new().with_path(dir.log_path()).with_mode(0o600);
    let logger = Logger::with_fallback(config, SharedBuffer::new());
    logger.initialize();

    let mode = fs::metadata(dir.log_path()).expect("stat log").permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

// ============================================================================
// Open Failures
// ============================================================================

/// Verifies an unreachable path produces one diagnostic and stderr logging.
#[test]
fn unreachable_path_falls_back() {
    let dir = LogDir::new();
    let fallback = SharedBuffer::new();
    let config = LoggerConfig::new().with_path(dir.unreachable_path());
    let logger = Logger::with_fallback(config, fallback.clone());

    logger.initialize();
    logger.error(CallSite::new("main", 10), format_args!("still reported"));

    let lines = fallback.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("[logging] initialize: "));
    assert!(lines[0].contains("missing"));
    assert!(lines[1].ends_with("main[10] | ERROR | still reported"));
    assert!(!logger.is_file_open());
}

/// Verifies a directory path cannot be opened as a log file.
#[test]
fn directory_path_falls_back() {
    let dir = LogDir::new();
    let fallback = SharedBuffer::new();
    let config = LoggerConfig::new().with_path(dir.path());
    let logger = Logger::with_fallback(config, fallback.clone());

    logger.initialize();
    assert!(!logger.is_file_open());
    assert!(fallback.contents_string().starts_with("[logging] initialize: "));
}

/// Verifies a file that opens but refuses a mode change is not used.
///
/// procfs files accept writes from their owner but reject `fchmod` with
/// `EPERM`, even for root.
#[cfg(target_os = "linux")]
#[test]
fn permission_change_failure_falls_back() {
    let fallback = SharedBuffer::new();
    let config = LoggerConfig::new()
        .with_path("/proc/self/comm")
        .with_level_var("LOGGING_LIFECYCLE_TEST_LEVEL_NEVER_SET");
    let logger = Logger::with_fallback(config, fallback.clone());

    logger.initialize();
    assert!(!logger.is_file_open());

    logger.error(CallSite::new("main", 11), format_args!("after chmod"));

    let lines = fallback.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("[logging] initialize: failed to chmod log file"));
    assert!(lines[1].ends_with("main[11] | ERROR | after chmod"));
}

// ============================================================================
// Teardown
// ============================================================================

/// Verifies teardown is safe with no file and when repeated.
#[test]
fn teardown_is_idempotent() {
    let dir = LogDir::new();
    let (logger, fallback) = logger_for(&dir);

    logger.teardown();
    logger.initialize();
    logger.teardown();
    logger.teardown();

    assert!(!logger.is_file_open());
    assert!(fallback.contents().is_empty());
}

/// Verifies records after teardown go to the fallback, not the file.
#[test]
fn teardown_routes_records_to_fallback() {
    let dir = LogDir::new();
    let (logger, fallback) = logger_for(&dir);
    logger.initialize();
    log_info!(logger: &logger, "before");
    logger.teardown();
    log_info!(logger: &logger, "after");

    assert_eq!(dir.log_lines().len(), 1);
    assert!(fallback.contents_string().ends_with("| INFO | after\n"));
}

/// Verifies the logger can be initialized again after teardown.
#[test]
fn initialize_after_teardown_reopens() {
    let dir = LogDir::new();
    let (logger, _fallback) = logger_for(&dir);
    logger.initialize();
    log_info!(logger: &logger, "first session");
    logger.teardown();

    logger.initialize();
    log_info!(logger: &logger, "second session");
    logger.teardown();

    let lines = dir.log_lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].ends_with("second session"));
}
