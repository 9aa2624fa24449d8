//! Integration tests for resolving the minimum severity from the environment.
//!
//! Each test points its logger at its own variable name, but the process
//! environment is still shared, so every test is serialized.

#![allow(unsafe_code)]

use std::env;

use logging::{CallSite, Logger, LoggerConfig, Severity};
use serial_test::serial;
use test_support::{LogDir, SharedBuffer};
use time::UtcOffset;

fn set_level(var: &str, value: &str) {
    // SAFETY: every test touching the environment is marked #[serial].
    unsafe {
        env::set_var(var, value);
    }
}

fn clear_level(var: &str) {
    // SAFETY: every test touching the environment is marked #[serial].
    unsafe {
        env::remove_var(var);
    }
}

fn logger_with_var(dir: &LogDir, var: &'static str) -> Logger {
    let config = LoggerConfig::new()
        .with_path(dir.log_path())
        .with_level_var(var)
        .with_utc_offset(UtcOffset::UTC);
    Logger::with_fallback(config, SharedBuffer::new())
}

fn emit_all(logger: &Logger) {
    let site = CallSite::new("emit_all", 1);
    logger.write_template(site, Severity::Debug, "x=%d", &[5]);
    logger.write_template(site, Severity::Info, "x=%d", &[5]);
    logger.write_template(site, Severity::Warn, "x=%d", &[5]);
    logger.write_template(site, Severity::Error, "x=%d", &[5]);
}

fn severities(dir: &LogDir) -> Vec<String> {
    dir.log_lines()
        .iter()
        .filter_map(|line| line.split(" | ").nth(1).map(str::to_owned))
        .collect()
}

// ============================================================================
// Threshold Selection
// ============================================================================

/// Verifies LOG_LEVEL=WARN drops DEBUG and INFO records.
#[test]
#[serial]
fn warn_threshold_keeps_warn_and_error() {
    const VAR: &str = "LOGGING_ENV_TEST_WARN";
    set_level(VAR, "WARN");
    let dir = LogDir::new();
    let logger = logger_with_var(&dir, VAR);
    logger.initialize();
    emit_all(&logger);
    logger.teardown();
    clear_level(VAR);

    let lines = dir.log_lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("| WARN | x=5"));
    assert!(lines[1].ends_with("| ERROR | x=5"));
}

/// Verifies each label selects exactly that threshold.
#[test]
#[serial]
fn each_label_selects_its_threshold() {
    const VAR: &str = "LOGGING_ENV_TEST_EACH";
    for severity in Severity::ALL {
        set_level(VAR, severity.as_str());
        let dir = LogDir::new();
        let logger = logger_with_var(&dir, VAR);
        logger.initialize();
        assert_eq!(logger.min_level(), severity);
    }
    clear_level(VAR);
}

/// Verifies LOG_LEVEL=DEBUG lets every record through.
#[test]
#[serial]
fn debug_threshold_keeps_everything() {
    const VAR: &str = "LOGGING_ENV_TEST_DEBUG";
    set_level(VAR, "DEBUG");
    let dir = LogDir::new();
    let logger = logger_with_var(&dir, VAR);
    logger.initialize();
    emit_all(&logger);
    clear_level(VAR);

    assert_eq!(severities(&dir), ["DEBUG", "INFO", "WARN", "ERROR"]);
}

/// Verifies LOG_LEVEL=ERROR keeps only ERROR records.
#[test]
#[serial]
fn error_threshold_keeps_only_errors() {
    const VAR: &str = "LOGGING_ENV_TEST_ERROR";
    set_level(VAR, "ERROR");
    let dir = LogDir::new();
    let logger = logger_with_var(&dir, VAR);
    logger.initialize();
    emit_all(&logger);
    clear_level(VAR);

    assert_eq!(severities(&dir), ["ERROR"]);
}

// ============================================================================
// Fallback To INFO
// ============================================================================

/// Verifies an unset variable resolves to INFO.
#[test]
#[serial]
fn unset_variable_defaults_to_info() {
    const VAR: &str = "LOGGING_ENV_TEST_UNSET";
    clear_level(VAR);
    let dir = LogDir::new();
    let logger = logger_with_var(&dir, VAR);
    logger.initialize();

    assert_eq!(logger.min_level(), Severity::Info);
    emit_all(&logger);
    assert_eq!(severities(&dir), ["INFO", "WARN", "ERROR"]);
}

/// Verifies lower-case and unknown values resolve to INFO.
#[test]
#[serial]
fn unrecognised_values_default_to_info() {
    const VAR: &str = "LOGGING_ENV_TEST_UNKNOWN";
    for value in ["TRACE", "warn", "VERBOSE", "", " WARN", "WARNING"] {
        set_level(VAR, value);
        let dir = LogDir::new();
        let logger = logger_with_var(&dir, VAR);
        logger.initialize();
        assert_eq!(logger.min_level(), Severity::Info, "value {value:?}");
    }
    clear_level(VAR);
}

// ============================================================================
// Re-reading On Initialize
// ============================================================================

/// Verifies each initialize call re-reads the variable.
#[test]
#[serial]
fn initialize_rereads_the_variable() {
    const VAR: &str = "LOGGING_ENV_TEST_REREAD";
    let dir = LogDir::new();
    let logger = logger_with_var(&dir, VAR);

    set_level(VAR, "ERROR");
    logger.initialize();
    assert_eq!(logger.min_level(), Severity::Error);

    set_level(VAR, "DEBUG");
    logger.initialize();
    assert_eq!(logger.min_level(), Severity::Debug);
    assert!(logger.is_file_open());

    clear_level(VAR);
}

/// Verifies the threshold is not read until initialize runs.
#[test]
#[serial]
fn threshold_is_info_before_initialize() {
    const VAR: &str = "LOGGING_ENV_TEST_BEFORE_INIT";
    set_level(VAR, "ERROR");
    let dir = LogDir::new();
    let logger = logger_with_var(&dir, VAR);
    assert_eq!(logger.min_level(), Severity::Info);
    clear_level(VAR);
}
