// SPDX-License-Identifier: Apache-2.0 OR MIT
// Severity levels for logging (RFC 5424 syslog-style, plus trace)

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Log severity levels (0-8, lower is more severe)
///
/// A message passes a sink's threshold when its numeric value is less than
/// or equal to the threshold's, so `Severity::Info` lets everything from
/// `Emergency` through `Info` through and drops `Debug` and `Trace`.
#[repr(u8)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// System is unusable
    #[serde(alias = "emerg")]
    Emergency = 0,
    /// Action must be taken immediately
    Alert = 1,
    /// Critical conditions
    #[serde(alias = "crit")]
    Critical = 2,
    /// Error conditions
    #[serde(alias = "err")]
    Error = 3,
    /// Warning conditions
    #[serde(alias = "warn")]
    Warning = 4,
    /// Normal but significant condition
    Notice = 5,
    /// Informational (default threshold)
    #[default]
    Info = 6,
    /// Debug-level messages
    Debug = 7,
    /// Trace-level messages
    Trace = 8,
}

impl Severity {
    /// Every level, most severe first.
    pub const ALL: [Severity; 9] = [
        Severity::Emergency,
        Severity::Alert,
        Severity::Critical,
        Severity::Error,
        Severity::Warning,
        Severity::Notice,
        Severity::Info,
        Severity::Debug,
        Severity::Trace,
    ];

    /// Get severity level as u8 (0-8)
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Get severity name as static string
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Emergency => "EMERG",
            Severity::Alert => "ALERT",
            Severity::Critical => "CRIT",
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Notice => "NOTICE",
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
            Severity::Trace => "TRACE",
        }
    }

    /// Create from u8 value (returns None if invalid)
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Severity::Emergency),
            1 => Some(Severity::Alert),
            2 => Some(Severity::Critical),
            3 => Some(Severity::Error),
            4 => Some(Severity::Warning),
            5 => Some(Severity::Notice),
            6 => Some(Severity::Info),
            7 => Some(Severity::Debug),
            8 => Some(Severity::Trace),
            _ => None,
        }
    }

    /// True when a message at `self` passes a sink whose threshold is `threshold`.
    #[inline]
    pub const fn passes(self, threshold: Severity) -> bool {
        self.as_u8() <= threshold.as_u8()
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returned when a string names no known severity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity level: {0}")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "emerg" | "emergency" => Ok(Severity::Emergency),
            "alert" => Ok(Severity::Alert),
            "crit" | "critical" => Ok(Severity::Critical),
            "err" | "error" => Ok(Severity::Error),
            "warn" | "warning" => Ok(Severity::Warning),
            "notice" => Ok(Severity::Notice),
            "info" => Ok(Severity::Info),
            "debug" => Ok(Severity::Debug),
            "trace" => Ok(Severity::Trace),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}
