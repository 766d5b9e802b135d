// SPDX-License-Identifier: Apache-2.0 OR MIT
// Named loggers over pluggable sinks
//
// - sink: destinations (stream, raw fd, syslog) and their shared state
// - logger: named handle owning one sink
// - registry: process-wide name → logger directory
// - config: JSON5 description of registry defaults and loggers

#[macro_use]
mod macros;

pub mod config;
pub mod error;
pub mod facility;
mod logger;
pub mod record;
pub mod registry;
mod severity;
pub mod sink;

// Public exports
pub use config::{Config, LoggerConfig, SinkSpec};
pub use error::{ConfigError, FacilityError, LoggerError, Result, SinkError};
pub use facility::{Facility, FacilityRef};
pub use logger::Logger;
pub use registry::{
    get, get_as, remove, reset_registry, set_ecid, set_level, set_program_name, Registry,
};
pub use severity::{ParseSeverityError, Severity};
pub use sink::{
    BuildSink, FdSink, Sink, SinkOptions, SinkState, StreamSink, StreamTarget, SyslogOptions,
    SyslogParams, SyslogSink,
};

/// Version of this library
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
