// SPDX-License-Identifier: Apache-2.0 OR MIT
// Stream sink: stdout, stderr or any caller-supplied writer

use super::{BuildSink, Sink, SinkOptions, SinkState};
use crate::error::Result;
use crate::record::{self, ProcessInfo};
use crate::Severity;
use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// Where a [`StreamSink`] writes
pub enum StreamTarget {
    Stdout,
    Stderr,
    /// Any writer; the sink owns it and serialises access to it
    Writer(Box<dyn Write + Send>),
}

impl fmt::Debug for StreamTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamTarget::Stdout => f.write_str("Stdout"),
            StreamTarget::Stderr => f.write_str("Stderr"),
            StreamTarget::Writer(_) => f.write_str("Writer(..)"),
        }
    }
}

enum Output {
    Stdout(io::Stdout),
    Stderr(io::Stderr),
    Writer(Mutex<Box<dyn Write + Send>>),
}

impl Output {
    /// One `write_all` per record. The standard streams are only guarded by
    /// their own internal lock.
    fn emit(&self, line: &[u8]) -> io::Result<()> {
        match self {
            Output::Stdout(stdout) => {
                let mut out = stdout.lock();
                out.write_all(line)?;
                out.flush()
            }
            Output::Stderr(stderr) => stderr.lock().write_all(line),
            Output::Writer(writer) => {
                let mut writer = writer.lock().unwrap_or_else(PoisonError::into_inner);
                writer.write_all(line)?;
                writer.flush()
            }
        }
    }
}

/// Writes RFC 5424-shaped text lines to an already-open stream
///
/// Line layout:
/// `<PRI>1 <timestamp> <host> <program>.<pid>.<tid> - [L SUBSYS=<name>] <ecid> <message>\n`
///
/// Hostname, pid and UTC offset are captured once at construction.
pub struct StreamSink {
    state: SinkState,
    process: ProcessInfo,
    output: Output,
}

impl StreamSink {
    pub fn new(options: SinkOptions, target: StreamTarget) -> Self {
        let output = match target {
            StreamTarget::Stdout => Output::Stdout(io::stdout()),
            StreamTarget::Stderr => Output::Stderr(io::stderr()),
            StreamTarget::Writer(writer) => Output::Writer(Mutex::new(writer)),
        };
        Self {
            state: SinkState::new(options),
            process: ProcessInfo::capture(),
            output,
        }
    }

    pub fn stdout(options: SinkOptions) -> Self {
        Self::new(options, StreamTarget::Stdout)
    }

    pub fn stderr(options: SinkOptions) -> Self {
        Self::new(options, StreamTarget::Stderr)
    }

    /// Write to `writer`, e.g. an open `File`.
    pub fn with_writer(options: SinkOptions, writer: impl Write + Send + 'static) -> Self {
        Self::new(options, StreamTarget::Writer(Box::new(writer)))
    }

    pub fn hostname(&self) -> &str {
        &self.process.hostname
    }

    pub fn pid(&self) -> u32 {
        self.process.pid
    }

    fn render(&self, level: Severity, args: fmt::Arguments<'_>) -> String {
        let message = fmt::format(args);
        self.state
            .with_context(|context| record::stream_line(&self.process, context, level, &message))
    }
}

impl Sink for StreamSink {
    fn state(&self) -> &SinkState {
        &self.state
    }

    fn write(&self, level: Severity, args: fmt::Arguments<'_>) {
        if !self.state.is_enabled(level) {
            return;
        }
        let line = self.render(level, args);
        let _ = self.output.emit(line.as_bytes());
    }
}

impl BuildSink for StreamSink {
    type Args = StreamTarget;

    fn build(options: SinkOptions, target: StreamTarget) -> Result<Self> {
        Ok(Self::new(options, target))
    }
}

impl fmt::Debug for StreamSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamSink")
            .field("state", &self.state)
            .field("hostname", &self.process.hostname)
            .field("pid", &self.process.pid)
            .finish()
    }
}
