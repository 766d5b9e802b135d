// SPDX-License-Identifier: Apache-2.0 OR MIT
// A sink defined outside the crate, built through the registry

use sinklog::{
    BuildSink, Facility, FacilityError, FacilityRef, LoggerError, Registry, Severity, Sink,
    SinkOptions, SinkState, SyslogOptions, SyslogParams, SyslogSink,
};
use std::fmt;
use std::sync::{Arc, Mutex};

/// `(level, subsystem, ecid, message)` for every accepted record
type Records = Arc<Mutex<Vec<(Severity, String, String, String)>>>;

struct MemorySink {
    state: SinkState,
    records: Records,
}

impl Sink for MemorySink {
    fn state(&self) -> &SinkState {
        &self.state
    }

    fn write(&self, level: Severity, args: fmt::Arguments<'_>) {
        if !self.is_enabled(level) {
            return;
        }
        self.records
            .lock()
            .unwrap()
            .push((level, self.name(), self.ecid(), args.to_string()));
    }
}

impl BuildSink for MemorySink {
    type Args = Records;

    fn build(options: SinkOptions, records: Self::Args) -> sinklog::Result<Self> {
        Ok(Self {
            state: SinkState::new(options),
            records,
        })
    }
}

#[test]
fn test_custom_sink_through_registry() {
    let records = Records::default();
    let registry = Registry::with_defaults("app", Severity::Notice);
    let logger = registry
        .get_as::<MemorySink>("memory", Arc::clone(&records))
        .unwrap();

    logger.info(format_args!("below default"));
    registry.set_ecid("m-1");
    logger.error(format_args!("code {}", 17));

    let records = records.lock().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0],
        (
            Severity::Error,
            "memory".to_string(),
            "[M ECID=\"m-1\"]".to_string(),
            "code 17".to_string()
        )
    );
}

#[test]
fn test_failing_factory_leaves_no_entry() {
    let registry = Registry::with_defaults("app", Severity::Info);
    let err = registry
        .get_as::<SyslogSink>(
            "audit",
            SyslogParams::new("not-a-real-facility", SyslogOptions::PID),
        )
        .unwrap_err();
    assert!(matches!(err, LoggerError::Sink(_)));
    assert!(err.to_string().contains("not-a-real-facility"));
    let source = std::error::Error::source(&err)
        .and_then(|source| source.downcast_ref::<FacilityError>());
    assert!(source.is_some());
    assert_eq!(registry.size(), 0);
}

#[test]
fn test_syslog_through_registry() {
    let registry = Registry::with_defaults("sinklog-integration", Severity::Info);
    let logger = registry
        .get_as::<SyslogSink>(
            "audit",
            SyslogParams::new(FacilityRef::from(Facility::Local0), SyslogOptions::default()),
        )
        .unwrap();
    assert_eq!(logger.program_name(), "sinklog-integration");
    logger.set_ecid("syslog-1");
    logger.info(format_args!("sent to the local daemon"));
}
