// SPDX-License-Identifier: Apache-2.0 OR MIT
// Full stream line layout, checked field by field

use crate::common::{parse_line, SharedBuffer};
use sinklog::record::MAX_ECID_LEN;
use sinklog::{FdSink, Logger, Registry, Severity, Sink, SinkOptions, StreamSink, StreamTarget};
use std::io::{Read, Seek, SeekFrom};

#[test]
fn test_every_field_of_a_stream_line() {
    let registry = Registry::with_defaults("layout-app", Severity::Info);
    let buffer = SharedBuffer::default();
    let logger = registry
        .get_as::<StreamSink>("svc", StreamTarget::Writer(Box::new(buffer.clone())))
        .unwrap();

    logger.warning(format_args!("disk at {}%", 91));

    let lines = buffer.lines();
    assert_eq!(lines.len(), 1);
    let parsed = parse_line(&lines[0]);

    assert_eq!(parsed.priority, Severity::Warning.as_u8());
    chrono::DateTime::parse_from_rfc3339(&parsed.timestamp).unwrap();
    let fraction = parsed.timestamp.split('.').nth(1).unwrap();
    assert_eq!(fraction.chars().take_while(char::is_ascii_digit).count(), 6);
    assert!(!parsed.hostname.is_empty());
    assert_eq!(parsed.program_name, "layout-app");
    assert_eq!(parsed.pid, std::process::id());
    assert!(parsed.tid > 0);
    assert_eq!(parsed.rest, "[L SUBSYS=svc] - disk at 91%");
}

#[test]
fn test_threads_report_their_own_id() {
    let buffer = SharedBuffer::default();
    let logger = Logger::new(
        "threads",
        StreamSink::with_writer(SinkOptions::new("threads"), buffer.clone()),
    );

    // Both threads alive at once so the kernel cannot reuse an id.
    let barrier = std::sync::Barrier::new(2);
    std::thread::scope(|scope| {
        for word in ["one", "two"] {
            let (logger, barrier) = (&logger, &barrier);
            scope.spawn(move || {
                logger.info(format_args!("{word}"));
                barrier.wait();
            });
        }
    });

    let lines = buffer.lines();
    let first = parse_line(&lines[0]);
    let second = parse_line(&lines[1]);
    assert_eq!(first.pid, second.pid);
    assert_ne!(first.tid, second.tid);
}

#[test]
fn test_ecid_truncated_in_line() {
    let buffer = SharedBuffer::default();
    let logger = Logger::new(
        "ecid",
        StreamSink::with_writer(SinkOptions::new("ecid"), buffer.clone()),
    );
    logger.set_ecid(&"x".repeat(MAX_ECID_LEN + 36));
    logger.info(format_args!("long"));

    let expected = format!("[L SUBSYS=ecid] [M ECID=\"{}\"] long", "x".repeat(MAX_ECID_LEN));
    assert_eq!(parse_line(&buffer.lines()[0]).rest, expected);
}

#[test]
fn test_fd_sink_matches_stream_layout() {
    let mut file = tempfile::tempfile().unwrap();
    let sink = FdSink::new(
        SinkOptions::new("fd").program_name("layout-app").level(Severity::Debug),
        file.try_clone().unwrap(),
    );
    sink.set_ecid("fd-1");
    sink.write(Severity::Debug, format_args!("via write(2)\n"));
    sink.write(Severity::Trace, format_args!("filtered"));

    let mut out = String::new();
    file.seek(SeekFrom::Start(0)).unwrap();
    file.read_to_string(&mut out).unwrap();

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 1);
    let parsed = parse_line(lines[0]);
    assert_eq!(parsed.priority, 7);
    assert_eq!(parsed.program_name, "layout-app");
    assert_eq!(parsed.rest, "[L SUBSYS=fd] [M ECID=\"fd-1\"] via write(2)");
    assert!(out.ends_with("write(2)\n"));
}
