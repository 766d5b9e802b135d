// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Syslog sink, backed by the POSIX `openlog`/`syslog`/`closelog` API.
//!
//! POSIX allows a single syslog connection per process, so every
//! [`SyslogSink`] shares it: the most recently built sink's program name and
//! options win, and the connection is closed when the last sink is dropped.
//! Each record still carries its own facility bits, so sinks with different
//! facilities can coexist.

use super::{BuildSink, Sink, SinkOptions, SinkState};
use crate::error::{Result, SinkError};
use crate::facility::{Facility, FacilityRef};
use crate::record;
use crate::Severity;
use std::ffi::CString;
use std::fmt;
use std::ops::BitOr;
use std::sync::{Mutex, PoisonError};

/// `openlog(3)` option flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SyslogOptions(libc::c_int);

impl SyslogOptions {
    /// Include the pid in every message
    pub const PID: Self = Self(libc::LOG_PID);
    /// Write to the console if the daemon is unreachable
    pub const CONS: Self = Self(libc::LOG_CONS);
    /// Connect immediately instead of on first message
    pub const NDELAY: Self = Self(libc::LOG_NDELAY);
    /// Delay connecting until the first message
    pub const ODELAY: Self = Self(libc::LOG_ODELAY);
    /// Don't wait for child processes spawned while logging
    pub const NOWAIT: Self = Self(libc::LOG_NOWAIT);

    /// Zero means "no preference" and becomes [`SyslogOptions::PID`].
    pub const fn from_bits(bits: libc::c_int) -> Self {
        if bits == 0 {
            Self::PID
        } else {
            Self(bits)
        }
    }

    pub const fn bits(self) -> libc::c_int {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Parse an option keyword (`pid`, `cons`, `ndelay`, `odelay`, `nowait`).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "pid" => Some(Self::PID),
            "cons" => Some(Self::CONS),
            "ndelay" => Some(Self::NDELAY),
            "odelay" => Some(Self::ODELAY),
            "nowait" => Some(Self::NOWAIT),
            _ => None,
        }
    }
}

impl Default for SyslogOptions {
    fn default() -> Self {
        Self::PID
    }
}

impl BitOr for SyslogOptions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Syslog-specific construction arguments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyslogParams {
    pub facility: FacilityRef,
    pub options: SyslogOptions,
}

impl SyslogParams {
    pub fn new(facility: impl Into<FacilityRef>, options: SyslogOptions) -> Self {
        Self {
            facility: facility.into(),
            options,
        }
    }
}

struct Connection {
    /// Must outlive the connection: `openlog` keeps the pointer.
    ident: Option<CString>,
    users: usize,
}

static CONNECTION: Mutex<Connection> = Mutex::new(Connection {
    ident: None,
    users: 0,
});

fn open_connection(ident: CString, options: SyslogOptions, facility: Facility) {
    let mut connection = CONNECTION.lock().unwrap_or_else(PoisonError::into_inner);
    // SAFETY: `ident` is NUL-terminated and is stored below, so it stays
    // alive until the next openlog or the final closelog.
    unsafe { libc::openlog(ident.as_ptr(), options.bits(), facility.syslog_bits()) };
    connection.ident = Some(ident);
    connection.users += 1;
}

fn release_connection() {
    let mut connection = CONNECTION.lock().unwrap_or_else(PoisonError::into_inner);
    connection.users = connection.users.saturating_sub(1);
    if connection.users == 0 {
        // SAFETY: closelog has no preconditions.
        unsafe { libc::closelog() };
        connection.ident = None;
    }
}

/// Forwards log lines to the local syslog daemon
///
/// Message layout: `[L SUBSYS=<name>] <ecid> <message>\n`. Unlike the stream
/// sinks, an unset ECID leaves no `- ` placeholder: the slot and its
/// separator are dropped, giving `[L SUBSYS=<name>] <message>\n`. The message
/// ends in exactly one newline. Trace and debug both map to `LOG_DEBUG`.
pub struct SyslogSink {
    state: SinkState,
    facility: Facility,
    options: SyslogOptions,
}

impl SyslogSink {
    /// Resolve the facility and open the shared connection.
    ///
    /// Both failure modes come back as [`SinkError`]; an unknown facility
    /// keeps its [`FacilityError`](crate::FacilityError) as the source.
    pub fn new(options: SinkOptions, params: SyslogParams) -> Result<Self> {
        let facility = params.facility.resolve().map_err(SinkError::facility)?;
        let ident = CString::new(options.program_name.as_str()).map_err(|_| {
            SinkError::new(format!(
                "sink failed: program name {:?} contains a NUL byte",
                options.program_name
            ))
        })?;
        let syslog_options = SyslogOptions::from_bits(params.options.bits());

        open_connection(ident, syslog_options, facility);

        Ok(Self {
            state: SinkState::new(options),
            facility,
            options: syslog_options,
        })
    }

    pub fn facility(&self) -> Facility {
        self.facility
    }

    pub fn options(&self) -> SyslogOptions {
        self.options
    }

    /// Syslog priority for `level`; the daemon has no trace level.
    pub fn priority(level: Severity) -> libc::c_int {
        match level {
            Severity::Emergency => libc::LOG_EMERG,
            Severity::Alert => libc::LOG_ALERT,
            Severity::Critical => libc::LOG_CRIT,
            Severity::Error => libc::LOG_ERR,
            Severity::Warning => libc::LOG_WARNING,
            Severity::Notice => libc::LOG_NOTICE,
            Severity::Info => libc::LOG_INFO,
            Severity::Debug | Severity::Trace => libc::LOG_DEBUG,
        }
    }

    fn render(&self, args: fmt::Arguments<'_>) -> String {
        let message = fmt::format(args);
        self.state.with_context(|context| {
            let mut line = String::with_capacity(32 + message.len());
            line.push_str(context.subsystem);
            line.push(' ');
            if let Some(tag) = context.ecid {
                line.push_str(tag);
                line.push(' ');
            }
            record::push_message(&mut line, &message);
            line
        })
    }
}

impl Sink for SyslogSink {
    fn state(&self) -> &SinkState {
        &self.state
    }

    fn write(&self, level: Severity, args: fmt::Arguments<'_>) {
        if !self.state.is_enabled(level) {
            return;
        }
        let line = self.render(args).replace('\0', "");
        let Ok(line) = CString::new(line) else {
            return;
        };
        let priority = self.facility.syslog_bits() | Self::priority(level);
        // SAFETY: the format string is a static "%s" and `line` is a valid
        // NUL-terminated string that outlives the call.
        unsafe { libc::syslog(priority, b"%s\0".as_ptr().cast(), line.as_ptr()) };
    }
}

impl BuildSink for SyslogSink {
    type Args = SyslogParams;

    fn build(options: SinkOptions, params: SyslogParams) -> Result<Self> {
        Self::new(options, params)
    }
}

impl Drop for SyslogSink {
    fn drop(&mut self) {
        release_connection();
    }
}

impl fmt::Debug for SyslogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyslogSink")
            .field("state", &self.state)
            .field("facility", &self.facility.keyword())
            .field("options", &self.options)
            .finish()
    }
}
