// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Configuration file types and parsing.
//!
//! JSON5 configuration format supporting:
//! - Registry defaults (program name, level, ECID)
//! - Pre-declared loggers with their sink and an optional level override
//! - Comments and trailing commas

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{ConfigError, Result};
use crate::facility::Facility;
use crate::logger::Logger;
use crate::registry::Registry;
use crate::sink::{Sink, StreamSink, StreamTarget, SyslogOptions, SyslogParams, SyslogSink};
use crate::Severity;

/// Logging configuration (JSON5 file format)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// Program name for every logger declared here (and created later)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_name: Option<String>,

    /// Registry default level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Severity>,

    /// ECID broadcast once all loggers exist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecid: Option<String>,

    #[serde(default)]
    pub loggers: Vec<LoggerConfig>,
}

/// Logger as stored in config file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggerConfig {
    pub name: String,

    #[serde(default)]
    pub sink: SinkSpec,

    /// Overrides the registry default for this logger only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Severity>,
}

/// Destination of a configured logger
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SinkSpec {
    #[default]
    Stdout,
    Stderr,
    Syslog {
        #[serde(default = "default_facility")]
        facility: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        options: Vec<String>,
    },
    /// Opened in append mode, created if missing. The file is opened by
    /// [`Config::apply`] even when the name is already registered.
    File { path: PathBuf },
}

/// A logger's destination with every fallible step already taken
enum PreparedSink {
    Stdout,
    Stderr,
    Syslog(SyslogParams),
    File(File),
}

fn default_facility() -> String {
    Facility::default().keyword().to_string()
}

impl Config {
    /// Load configuration from a JSON5 file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e.to_string()))?;
        Self::parse(&content)
    }

    /// Parse configuration from a JSON5 string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        json5::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize configuration to JSON5 string (with pretty formatting)
    pub fn to_json5(&self) -> String {
        // json5 has no pretty printer; plain JSON is valid JSON5
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Save configuration to a file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_json5();
        std::fs::write(path, content)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e.to_string()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for (idx, logger) in self.loggers.iter().enumerate() {
            if logger.name.is_empty() {
                return Err(ConfigError::EmptyLoggerName { index: idx });
            }
            if let Some(prev_idx) = seen.insert(logger.name.as_str(), idx) {
                return Err(ConfigError::DuplicateLogger {
                    name: logger.name.clone(),
                    indices: (prev_idx, idx),
                });
            }
            logger.validate()?;
        }
        Ok(())
    }

    /// Configure `registry` and create every declared logger
    ///
    /// All or nothing: the config is validated and every sink's resources
    /// are acquired (files opened, syslog settings resolved) before the
    /// registry is touched, so an error leaves it exactly as it was.
    ///
    /// Order: program name, default level, loggers (through the registry's
    /// get-or-create, so an already registered name is reused as is),
    /// per-logger levels, then the ECID broadcast.
    pub fn apply(&self, registry: &Registry) -> Result<Vec<Arc<Logger>>> {
        self.validate()?;

        let program_name = self
            .program_name
            .clone()
            .unwrap_or_else(|| registry.program_name());
        let prepared = self
            .loggers
            .iter()
            .map(|entry| entry.prepare(&program_name))
            .collect::<Result<Vec<_>, ConfigError>>()?;

        if let Some(program_name) = &self.program_name {
            registry.set_program_name(program_name);
        }
        if let Some(level) = self.level {
            registry.set_log_level(level);
        }

        let mut loggers = Vec::with_capacity(self.loggers.len());
        for (entry, sink) in self.loggers.iter().zip(prepared) {
            let logger = entry.register(registry, sink)?;
            if let Some(level) = entry.level {
                logger.set_log_level(level);
            }
            loggers.push(logger);
        }

        if let Some(ecid) = &self.ecid {
            registry.set_ecid(ecid);
        }
        Ok(loggers)
    }
}

impl LoggerConfig {
    pub fn new(name: impl Into<String>, sink: SinkSpec) -> Self {
        Self {
            name: name.into(),
            sink,
            level: None,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match &self.sink {
            SinkSpec::Stdout | SinkSpec::Stderr => Ok(()),
            SinkSpec::Syslog { facility, options } => {
                Facility::resolve(facility).map_err(|source| ConfigError::Facility {
                    name: self.name.clone(),
                    source,
                })?;
                self.syslog_options(options).map(|_| ())
            }
            SinkSpec::File { path } if path.as_os_str().is_empty() => {
                Err(ConfigError::EmptyPath {
                    name: self.name.clone(),
                })
            }
            SinkSpec::File { .. } => Ok(()),
        }
    }

    fn syslog_options(&self, keywords: &[String]) -> Result<SyslogOptions, ConfigError> {
        let mut bits = 0;
        for keyword in keywords {
            let option =
                SyslogOptions::from_keyword(keyword).ok_or_else(|| ConfigError::SyslogOption {
                    name: self.name.clone(),
                    option: keyword.clone(),
                })?;
            bits |= option.bits();
        }
        Ok(SyslogOptions::from_bits(bits))
    }

    fn prepare(&self, program_name: &str) -> Result<PreparedSink, ConfigError> {
        match &self.sink {
            SinkSpec::Stdout => Ok(PreparedSink::Stdout),
            SinkSpec::Stderr => Ok(PreparedSink::Stderr),
            SinkSpec::Syslog { facility, options } => {
                // The program name becomes the C ident passed to openlog.
                if program_name.contains('\0') {
                    return Err(ConfigError::NulProgramName {
                        name: self.name.clone(),
                        program_name: program_name.to_string(),
                    });
                }
                let options = self.syslog_options(options)?;
                Ok(PreparedSink::Syslog(SyslogParams::new(facility.as_str(), options)))
            }
            SinkSpec::File { path } => OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map(PreparedSink::File)
                .map_err(|e| ConfigError::OpenFile {
                    name: self.name.clone(),
                    path: path.clone(),
                    message: e.to_string(),
                }),
        }
    }

    fn register(&self, registry: &Registry, sink: PreparedSink) -> Result<Arc<Logger>> {
        match sink {
            PreparedSink::Stdout => Ok(registry.get(&self.name)),
            PreparedSink::Stderr => registry.get_as::<StreamSink>(&self.name, StreamTarget::Stderr),
            PreparedSink::Syslog(params) => registry.get_as::<SyslogSink>(&self.name, params),
            PreparedSink::File(file) => registry.get_with(&self.name, |options| {
                Ok(Box::new(StreamSink::with_writer(options, file)) as Box<dyn Sink>)
            }),
        }
    }
}
