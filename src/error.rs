// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Error types for loggers, sinks and facilities

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = LoggerError> = std::result::Result<T, E>;

/// Top-level error returned by logger, sink and registry operations
#[derive(Error, Debug)]
pub enum LoggerError {
    /// Generic failure
    #[error("{0}")]
    Failed(String),

    /// A sink could not be constructed or set up
    #[error(transparent)]
    Sink(#[from] SinkError),

    /// A syslog facility could not be resolved
    #[error(transparent)]
    Facility(#[from] FacilityError),

    /// A configuration file could not be read, parsed or applied
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl LoggerError {
    pub fn new(message: impl Into<String>) -> Self {
        LoggerError::Failed(message.into())
    }
}

impl Default for LoggerError {
    fn default() -> Self {
        LoggerError::Failed("logger failed".to_string())
    }
}

/// Sink construction or setup failure
#[derive(Error, Debug)]
#[error("{message}")]
pub struct SinkError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl SinkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an I/O failure that prevented the sink from being set up.
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// The sink's facility could not be resolved.
    pub fn facility(source: FacilityError) -> Self {
        Self {
            message: format!("sink failed: {source}"),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for SinkError {
    fn default() -> Self {
        Self::new("sink failed")
    }
}

/// Unknown or unusable syslog facility
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FacilityError {
    message: String,
}

impl FacilityError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// No facility in the catalog carries `keyword`.
    pub fn unknown_keyword(keyword: &str) -> Self {
        Self::new(format!("facility failed: unknown facility keyword '{keyword}'"))
    }

    /// No facility in the catalog carries `code`.
    pub fn unknown_code(code: u8) -> Self {
        Self::new(format!("facility failed: unknown facility code {code}"))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for FacilityError {
    fn default() -> Self {
        Self::new("facility failed")
    }
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("failed to read config file '{shown}': {1}", shown = .0.display())]
    Io(PathBuf, String),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("logger #{index} has an empty name")]
    EmptyLoggerName { index: usize },

    #[error(
        "duplicate logger '{name}' (entries {first} and {second})",
        first = .indices.0,
        second = .indices.1
    )]
    DuplicateLogger {
        name: String,
        indices: (usize, usize),
    },

    #[error("logger '{name}': {source}")]
    Facility {
        name: String,
        #[source]
        source: FacilityError,
    },

    #[error("logger '{name}': unknown syslog option '{option}'")]
    SyslogOption { name: String, option: String },

    #[error("logger '{name}': program name {program_name:?} contains a NUL byte")]
    NulProgramName { name: String, program_name: String },

    #[error("logger '{name}': file sink has an empty path")]
    EmptyPath { name: String },

    #[error("logger '{name}': failed to open '{shown}': {message}", shown = .path.display())]
    OpenFile {
        name: String,
        path: PathBuf,
        message: String,
    },
}
