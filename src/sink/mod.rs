// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Log sinks (destinations)
//!
//! A sink owns everything needed to frame and deliver one log line to a
//! destination. Loggers delegate every call to exactly one sink.
//!
//! Shared state lives in [`SinkState`]:
//! - the threshold is a single atomic, so a level check never waits on a lock;
//! - the ECID tag sits behind its own read/write lock (many writers of log
//!   lines read it concurrently, `set_ecid` takes it exclusively);
//! - the name and its cached `[L SUBSYS=...]` tag sit behind another
//!   read/write lock so a rename is seen as one unit.

mod fd;
mod stream;
mod syslog;

pub use fd::FdSink;
pub use stream::{StreamSink, StreamTarget};
pub use syslog::{SyslogOptions, SyslogParams, SyslogSink};

use crate::error::Result;
use crate::record::{self, LineContext};
use crate::Severity;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{PoisonError, RwLock};

/// Construction parameters common to every sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkOptions {
    /// Subsystem name, embedded in every line
    pub name: String,
    /// Program identity (syslog ident, stream prefix)
    pub program_name: String,
    /// Initial threshold
    pub level: Severity,
}

impl SinkOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn program_name(mut self, program_name: impl Into<String>) -> Self {
        self.program_name = program_name.into();
        self
    }

    pub fn level(mut self, level: Severity) -> Self {
        self.level = level;
        self
    }
}

impl Default for SinkOptions {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            program_name: "prog".to_string(),
            level: Severity::Info,
        }
    }
}

struct Naming {
    name: String,
    subsystem: String,
}

/// Mutable per-sink state shared by every concrete sink
pub struct SinkState {
    naming: RwLock<Naming>,
    program_name: String,
    level: AtomicU8,
    ecid: RwLock<Option<String>>,
}

impl SinkState {
    pub fn new(options: SinkOptions) -> Self {
        let subsystem = record::subsystem_tag(&options.name);
        Self {
            naming: RwLock::new(Naming {
                name: options.name,
                subsystem,
            }),
            program_name: options.program_name,
            level: AtomicU8::new(options.level.as_u8()),
            ecid: RwLock::new(None),
        }
    }

    pub fn name(&self) -> String {
        self.naming
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .name
            .clone()
    }

    /// Rename the sink and regenerate its subsystem tag.
    pub fn set_name(&self, name: &str) {
        let mut naming = self.naming.write().unwrap_or_else(PoisonError::into_inner);
        naming.name = name.to_string();
        naming.subsystem = record::subsystem_tag(name);
    }

    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    pub fn level(&self) -> Severity {
        // Only valid discriminants are ever stored.
        Severity::from_u8(self.level.load(Ordering::Acquire)).unwrap_or_default()
    }

    pub fn set_level(&self, level: Severity) {
        self.level.store(level.as_u8(), Ordering::Release);
    }

    #[inline]
    pub fn is_enabled(&self, level: Severity) -> bool {
        level.passes(self.level())
    }

    /// Current ECID tag, or `"- "` when unset.
    pub fn ecid(&self) -> String {
        self.ecid
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .unwrap_or_else(|| record::NO_ECID.to_string())
    }

    /// Empty clears the tag; anything else is truncated and wrapped.
    pub fn set_ecid(&self, ecid: &str) {
        let mut current = self.ecid.write().unwrap_or_else(PoisonError::into_inner);
        *current = record::ecid_tag(ecid);
    }

    /// Run `f` with the program name, subsystem tag and ECID tag held
    /// under their read locks.
    pub fn with_context<R>(&self, f: impl FnOnce(LineContext<'_>) -> R) -> R {
        let naming = self.naming.read().unwrap_or_else(PoisonError::into_inner);
        let ecid = self.ecid.read().unwrap_or_else(PoisonError::into_inner);
        f(LineContext {
            program_name: &self.program_name,
            subsystem: &naming.subsystem,
            ecid: ecid.as_deref(),
        })
    }
}

impl fmt::Debug for SinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinkState")
            .field("name", &self.name())
            .field("program_name", &self.program_name)
            .field("level", &self.level())
            .field("ecid", &self.ecid())
            .finish()
    }
}

/// A log destination
///
/// Implementors provide [`Sink::state`] and [`Sink::write`]; everything else
/// has a default that forwards to the shared [`SinkState`].
///
/// `write` must drop the message without formatting it when `level` does not
/// pass the current threshold (see [`Sink::is_enabled`]).
pub trait Sink: Send + Sync {
    fn state(&self) -> &SinkState;

    /// Format and deliver one message.
    fn write(&self, level: Severity, args: fmt::Arguments<'_>);

    fn is_enabled(&self, level: Severity) -> bool {
        self.state().is_enabled(level)
    }

    fn level(&self) -> Severity {
        self.state().level()
    }

    fn set_log_level(&self, level: Severity) {
        self.state().set_level(level);
    }

    fn ecid(&self) -> String {
        self.state().ecid()
    }

    fn set_ecid(&self, ecid: &str) {
        self.state().set_ecid(ecid);
    }

    fn name(&self) -> String {
        self.state().name()
    }

    fn set_name(&self, name: &str) {
        self.state().set_name(name);
    }

    fn program_name(&self) -> String {
        self.state().program_name().to_string()
    }
}

/// A sink the registry can build from common options plus sink-specific args
pub trait BuildSink: Sink + Sized + 'static {
    type Args;

    fn build(options: SinkOptions, args: Self::Args) -> Result<Self>;
}
