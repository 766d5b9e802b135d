// SPDX-License-Identifier: Apache-2.0 OR MIT
// Named logger handle delegating to one sink

use crate::sink::Sink;
use crate::Severity;
use std::fmt;

/// Named handle that owns exactly one sink
///
/// Loggers are usually obtained from a [`Registry`](crate::Registry) and
/// shared as `Arc<Logger>`, but can also be built directly around any sink.
/// Dropping the logger drops its sink.
pub struct Logger {
    name: String,
    sink: Box<dyn Sink>,
}

impl Logger {
    /// Create a logger around `sink`. The sink is renamed to `name` if its
    /// own name differs, so lines always carry the logger's name.
    pub fn new(name: impl Into<String>, sink: impl Sink + 'static) -> Self {
        Self::from_boxed(name, Box::new(sink))
    }

    pub fn from_boxed(name: impl Into<String>, sink: Box<dyn Sink>) -> Self {
        let name = name.into();
        if sink.name() != name {
            sink.set_name(&name);
        }
        Self { name, sink }
    }

    /// Write a message at `level`
    #[inline]
    pub fn log(&self, level: Severity, args: fmt::Arguments<'_>) {
        self.sink.write(level, args);
    }

    /// True if a message at `level` would be written
    #[inline]
    pub fn is_enabled(&self, level: Severity) -> bool {
        self.sink.is_enabled(level)
    }

    /// Log with emergency severity
    #[inline]
    pub fn emergency(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Emergency, args);
    }

    /// Log with alert severity
    #[inline]
    pub fn alert(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Alert, args);
    }

    /// Log with critical severity
    #[inline]
    pub fn critical(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Critical, args);
    }

    /// Log with error severity
    #[inline]
    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Error, args);
    }

    /// Log with warning severity
    #[inline]
    pub fn warning(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Warning, args);
    }

    /// Log with notice severity
    #[inline]
    pub fn notice(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Notice, args);
    }

    /// Log with info severity
    #[inline]
    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Info, args);
    }

    /// Log with debug severity
    #[inline]
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Debug, args);
    }

    /// Log with trace severity
    #[inline]
    pub fn trace(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Trace, args);
    }

    pub fn set_log_level(&self, level: Severity) {
        self.sink.set_log_level(level);
    }

    pub fn level(&self) -> Severity {
        self.sink.level()
    }

    /// Set the execution context id; an empty string clears it.
    pub fn set_ecid(&self, ecid: &str) {
        self.sink.set_ecid(ecid);
    }

    pub fn ecid(&self) -> String {
        self.sink.ecid()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn program_name(&self) -> String {
        self.sink.program_name()
    }

    pub fn sink(&self) -> &dyn Sink {
        self.sink.as_ref()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("program_name", &self.program_name())
            .finish()
    }
}
