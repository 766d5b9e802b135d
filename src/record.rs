// SPDX-License-Identifier: Apache-2.0 OR MIT
// Line framing shared by the text sinks

use crate::Severity;
use chrono::{FixedOffset, Local, Offset, Utc};
use std::fmt::Write as _;

/// Longest execution context id kept, in characters.
pub const MAX_ECID_LEN: usize = 64;

/// Rendered in place of the ECID tag when none is set.
pub const NO_ECID: &str = "- ";

/// Facts about the running process, captured once per sink.
#[derive(Debug, Clone)]
pub struct ProcessInfo {
    pub pid: u32,
    pub hostname: String,
    /// UTC offset in effect when the sink was built (the "lag")
    pub lag: FixedOffset,
}

impl ProcessInfo {
    pub fn capture() -> Self {
        Self {
            pid: std::process::id(),
            hostname: local_hostname(),
            lag: Local::now().offset().fix(),
        }
    }

    /// Current time as `YYYY-MM-DDTHH:MM:SS.NNNNNN±HH:MM` in the captured offset.
    pub fn timestamp(&self) -> String {
        Utc::now()
            .with_timezone(&self.lag)
            .format("%Y-%m-%dT%H:%M:%S%.6f%:z")
            .to_string()
    }
}

/// Identity and tags of the sink emitting a line.
#[derive(Debug, Clone, Copy)]
pub struct LineContext<'a> {
    pub program_name: &'a str,
    /// `[L SUBSYS=<name>]`
    pub subsystem: &'a str,
    /// `[M ECID="..."]`, or `None` when unset
    pub ecid: Option<&'a str>,
}

/// Build the full stream record:
/// `<PRI>1 <timestamp> <host> <program>.<pid>.<tid> - [L SUBSYS=<name>] <ecid> <message>\n`
pub fn stream_line(
    process: &ProcessInfo,
    context: LineContext<'_>,
    level: Severity,
    message: &str,
) -> String {
    let mut line = String::with_capacity(96 + message.len());
    let _ = write!(
        line,
        "<{}>1 {} {} {}.{}.{} - {} ",
        level.as_u8(),
        process.timestamp(),
        process.hostname,
        context.program_name,
        process.pid,
        current_thread_id(),
        context.subsystem,
    );
    push_ecid(&mut line, context.ecid);
    push_message(&mut line, message);
    line
}

/// Append the ECID tag followed by its separator, or the `- ` placeholder.
pub fn push_ecid(line: &mut String, ecid: Option<&str>) {
    match ecid {
        Some(tag) => {
            line.push_str(tag);
            line.push(' ');
        }
        None => line.push_str(NO_ECID),
    }
}

/// Append `message`, adding a trailing newline only if it lacks one.
pub fn push_message(line: &mut String, message: &str) {
    line.push_str(message);
    if !message.ends_with('\n') {
        line.push('\n');
    }
}

/// `[L SUBSYS=<name>]`
pub fn subsystem_tag(name: &str) -> String {
    format!("[L SUBSYS={name}]")
}

/// `[M ECID="<value>"]` with the value cut to [`MAX_ECID_LEN`] characters,
/// or `None` for an empty value.
pub fn ecid_tag(value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    let truncated: String = value.chars().take(MAX_ECID_LEN).collect();
    Some(format!("[M ECID=\"{truncated}\"]"))
}

fn local_hostname() -> String {
    nix::unistd::gethostname()
        .ok()
        .and_then(|name| name.into_string().ok())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "-".to_string())
}

/// Get current thread ID
pub fn current_thread_id() -> u64 {
    #[cfg(target_os = "linux")]
    {
        // SAFETY: gettid has no preconditions and cannot fail.
        unsafe { libc::gettid() as u64 }
    }
    #[cfg(not(target_os = "linux"))]
    {
        // SAFETY: pthread_self has no preconditions and cannot fail.
        unsafe { libc::pthread_self() as usize as u64 }
    }
}
