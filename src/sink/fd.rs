// SPDX-License-Identifier: Apache-2.0 OR MIT
// Raw file descriptor sink: one write(2) loop per record, no user-space buffering

use super::{BuildSink, Sink, SinkOptions, SinkState};
use crate::error::Result;
use crate::record::{self, ProcessInfo};
use crate::Severity;
use nix::errno::Errno;
use std::fmt;
use std::os::fd::{AsFd, AsRawFd};

/// Writes the same lines as [`StreamSink`](super::StreamSink) straight to a
/// file descriptor
///
/// The sink holds whatever `F` is: a borrowed descriptor is never closed, an
/// owned one (e.g. a `File`) is closed when the sink drops.
pub struct FdSink<F> {
    state: SinkState,
    process: ProcessInfo,
    fd: F,
}

impl<F: AsFd + Send + Sync> FdSink<F> {
    pub fn new(options: SinkOptions, fd: F) -> Self {
        Self {
            state: SinkState::new(options),
            process: ProcessInfo::capture(),
            fd,
        }
    }

    pub fn raw_fd(&self) -> i32 {
        self.fd.as_fd().as_raw_fd()
    }

    fn emit(&self, mut line: &[u8]) -> nix::Result<()> {
        while !line.is_empty() {
            match nix::unistd::write(self.fd.as_fd(), line) {
                Ok(0) => return Err(Errno::EIO),
                Ok(written) => line = &line[written..],
                Err(Errno::EINTR) => continue,
                Err(errno) => return Err(errno),
            }
        }
        Ok(())
    }
}

impl<F: AsFd + Send + Sync> Sink for FdSink<F> {
    fn state(&self) -> &SinkState {
        &self.state
    }

    fn write(&self, level: Severity, args: fmt::Arguments<'_>) {
        if !self.state.is_enabled(level) {
            return;
        }
        let message = fmt::format(args);
        let line = self
            .state
            .with_context(|context| record::stream_line(&self.process, context, level, &message));
        let _ = self.emit(line.as_bytes());
    }
}

impl<F: AsFd + Send + Sync + 'static> BuildSink for FdSink<F> {
    type Args = F;

    fn build(options: SinkOptions, fd: F) -> Result<Self> {
        Ok(Self::new(options, fd))
    }
}

impl<F> fmt::Debug for FdSink<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FdSink")
            .field("state", &self.state)
            .field("hostname", &self.process.hostname)
            .finish()
    }
}
