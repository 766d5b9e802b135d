// SPDX-License-Identifier: Apache-2.0 OR MIT
// Registry behaviour seen from outside the crate

use crate::common::SharedBuffer;
use sinklog::{Logger, Registry, Severity, StreamSink, StreamTarget};
use std::sync::{Arc, Barrier};
use std::thread;

fn buffered(registry: &Registry, name: &str) -> (Arc<Logger>, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let logger = registry
        .get_as::<StreamSink>(name, StreamTarget::Writer(Box::new(buffer.clone())))
        .unwrap();
    (logger, buffer)
}

#[test]
fn test_many_threads_many_names_one_logger_each() {
    const THREADS: usize = 16;
    const NAMES: usize = 4;

    let registry = Arc::new(Registry::with_defaults("contention", Severity::Info));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (0..NAMES)
                    .map(|n| registry.get(&format!("worker-{n}")))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let results: Vec<Vec<Arc<Logger>>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(registry.size(), NAMES);
    for n in 0..NAMES {
        let canonical = registry.lookup(&format!("worker-{n}")).unwrap();
        for loggers in &results {
            assert!(Arc::ptr_eq(&loggers[n], &canonical));
        }
    }
}

#[test]
fn test_broadcast_and_defaults() {
    let registry = Registry::with_defaults("first", Severity::Info);
    let (early, early_out) = buffered(&registry, "early");

    registry.set_log_level(Severity::Warning);
    registry.set_ecid("req-9");
    registry.set_program_name("second");

    let (late, late_out) = buffered(&registry, "late");

    // Level: both. ECID: early only. Program name: late only.
    assert_eq!(early.level(), Severity::Warning);
    assert_eq!(late.level(), Severity::Warning);
    assert_eq!(early.ecid(), "[M ECID=\"req-9\"]");
    assert_eq!(late.ecid(), "- ");
    assert_eq!(early.program_name(), "first");
    assert_eq!(late.program_name(), "second");

    early.info(format_args!("filtered"));
    early.error(format_args!("kept"));
    late.error(format_args!("kept"));

    assert_eq!(early_out.lines().len(), 1);
    assert!(early_out.contents().contains(" first."));
    assert!(early_out
        .contents()
        .ends_with("[L SUBSYS=early] [M ECID=\"req-9\"] kept\n"));
    assert!(late_out.contents().contains(" second."));
    assert!(late_out.contents().ends_with("[L SUBSYS=late] - kept\n"));
}

#[test]
fn test_handles_outlive_reset() {
    let registry = Registry::with_defaults("app", Severity::Info);
    let (logger, buffer) = buffered(&registry, "survivor");

    registry.reset();
    assert_eq!(registry.size(), 0);

    let writer = Arc::clone(&logger);
    thread::spawn(move || writer.notice(format_args!("after reset")))
        .join()
        .unwrap();
    assert_eq!(buffer.lines().len(), 1);

    let fresh = registry.get("survivor");
    assert!(!Arc::ptr_eq(&logger, &fresh));
}

#[test]
fn test_levels_change_while_logging() {
    let registry = Arc::new(Registry::with_defaults("app", Severity::Info));
    let (logger, buffer) = buffered(&registry, "busy");

    thread::scope(|scope| {
        for t in 0..4 {
            let logger = Arc::clone(&logger);
            scope.spawn(move || {
                for i in 0..100 {
                    logger.notice(format_args!("writer {t} message {i}"));
                }
            });
        }
        let registry = Arc::clone(&registry);
        scope.spawn(move || {
            for i in 0..100 {
                let level = if i % 2 == 0 { Severity::Trace } else { Severity::Emergency };
                registry.set_log_level(level);
                registry.set_ecid(&format!("flip-{i}"));
            }
        });
    });

    // Every line that made it out is whole.
    for line in buffer.lines() {
        assert!(line.starts_with("<5>1 "), "{line}");
        assert!(line.contains("[L SUBSYS=busy] "), "{line}");
    }
}

#[test]
fn test_process_wide_registry() {
    let a = sinklog::get("integration-global");
    let b = Registry::instance().get("integration-global");
    assert!(Arc::ptr_eq(&a, &b));

    sinklog::remove("integration-global");
    assert!(!Registry::instance().contains("integration-global"));

    let buffer = SharedBuffer::default();
    let logger = sinklog::get_as::<StreamSink>(
        "integration-global-buffered",
        StreamTarget::Writer(Box::new(buffer.clone())),
    )
    .unwrap();
    sinklog::set_ecid("global");
    logger.info(format_args!("through the singleton"));
    let expected =
        "[L SUBSYS=integration-global-buffered] [M ECID=\"global\"] through the singleton";
    assert!(buffer.contents().contains(expected));

    sinklog::reset_registry();
    assert_eq!(Registry::instance().size(), 0);
}
