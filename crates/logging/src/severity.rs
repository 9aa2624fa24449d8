//! crates/logging/src/severity.rs
//! Ordered severity levels used for filtering and rendering.

use std::fmt;
use std::str::FromStr;

/// Severity of a log record.
///
/// Variants are ordered from least to most severe, so the derived
/// [`Ord`] implementation doubles as the filter comparison: a record is
/// emitted when its severity is greater than or equal to the configured
/// minimum.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
#[repr(u8)]
pub enum Severity {
    /// Diagnostic detail, hidden unless explicitly requested.
    Debug = 0,
    /// Normal operational messages. The default threshold.
    #[default]
    Info = 1,
    /// Something unexpected that the program recovered from.
    Warn = 2,
    /// A failure the program could not recover from locally.
    Error = 3,
}

impl Severity {
    /// Every severity, ordered from least to most severe.
    pub const ALL: [Self; 4] = [Self::Debug, Self::Info, Self::Warn, Self::Error];

    /// Returns the upper-case label rendered in log records.
    ///
    /// The same strings are accepted by the `LOG_LEVEL` environment variable.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::Severity;
    ///
    /// assert_eq!(Severity::Debug.as_str(), "DEBUG");
    /// assert_eq!(Severity::Info.as_str(), "INFO");
    /// assert_eq!(Severity::Warn.as_str(), "WARN");
    /// assert_eq!(Severity::Error.as_str(), "ERROR");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }

    /// Resolves the minimum severity from the raw value of the level
    /// environment variable.
    ///
    /// Matching is exact and case-sensitive. Anything that is not one of the
    /// four labels, including an empty string or an absent variable, resolves
    /// to [`Severity::Info`].
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::Severity;
    ///
    /// assert_eq!(Severity::from_env_value(Some("WARN")), Severity::Warn);
    /// assert_eq!(Severity::from_env_value(Some("warn")), Severity::Info);
    /// assert_eq!(Severity::from_env_value(Some("")), Severity::Info);
    /// assert_eq!(Severity::from_env_value(None), Severity::Info);
    /// ```
    #[must_use]
    pub fn from_env_value(value: Option<&str>) -> Self {
        value
            .and_then(|value| value.parse().ok())
            .unwrap_or(Self::Info)
    }

    pub(crate) const fn from_repr(value: u8) -> Self {
        match value {
            0 => Self::Debug,
            1 => Self::Info,
            2 => Self::Warn,
            _ => Self::Error,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`Severity`] from a string fails.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unrecognised log severity '{input}' (expected DEBUG, INFO, WARN or ERROR)")]
pub struct ParseSeverityError {
    input: String,
}

impl ParseSeverityError {
    /// Returns the rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARN" => Ok(Self::Warn),
            "ERROR" => Ok(Self::Error),
            _ => Err(ParseSeverityError {
                input: input.to_owned(),
            }),
        }
    }
}
