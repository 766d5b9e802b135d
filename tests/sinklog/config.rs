// SPDX-License-Identifier: Apache-2.0 OR MIT
// Configuration files applied to a registry

use sinklog::{Config, ConfigError, LoggerError, Registry, Severity};
use std::io::Write;

#[test]
fn test_config_file_drives_registry() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("service.log");
    let config_path = dir.path().join("logging.json5");

    let mut file = std::fs::File::create(&config_path).unwrap();
    write!(
        file,
        r#"{{
            // defaults for every logger
            program_name: "billing",
            level: "warn",
            loggers: [
                {{ name: "ledger", sink: {{ type: "file", path: "{}" }} }},
                {{ name: "console", sink: {{ type: "stderr" }}, level: "crit" }},
            ],
        }}"#,
        log_path.display()
    )
    .unwrap();
    drop(file);

    let config = Config::load_from_file(&config_path).unwrap();
    let registry = Registry::with_defaults("app", Severity::Info);
    let loggers = config.apply(&registry).unwrap();

    assert_eq!(registry.names(), vec!["console".to_string(), "ledger".to_string()]);
    assert_eq!(loggers[1].level(), Severity::Critical);

    let ledger = registry.lookup("ledger").unwrap();
    ledger.notice(format_args!("filtered"));
    ledger.warning(format_args!("balance mismatch"));
    drop(loggers);
    drop(ledger);
    registry.reset();

    let content = std::fs::read_to_string(&log_path).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert!(content.starts_with("<4>1 "));
    assert!(content.contains(" billing."));
    assert!(content.ends_with("[L SUBSYS=ledger] - balance mismatch\n"));
}

#[test]
fn test_file_sink_appends() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("append.log");
    std::fs::write(&log_path, "existing\n").unwrap();

    let config = Config::parse(&format!(
        r#"{{ loggers: [{{ name: "append", sink: {{ type: "file", path: "{}" }} }}] }}"#,
        log_path.display()
    ))
    .unwrap();
    let registry = Registry::with_defaults("app", Severity::Info);
    let loggers = config.apply(&registry).unwrap();
    loggers[0].info(format_args!("added"));

    let content = std::fs::read_to_string(&log_path).unwrap();
    assert!(content.starts_with("existing\n"));
    assert!(content.ends_with("[L SUBSYS=append] - added\n"));
}

#[test]
fn test_unknown_facility_in_config() {
    let config = Config::parse(
        r#"{ loggers: [
            { name: "audit", sink: { type: "syslog", facility: "not-a-real-facility" } },
        ] }"#,
    )
    .unwrap();
    let registry = Registry::with_defaults("app", Severity::Info);
    let err = config.apply(&registry).unwrap_err();
    assert!(matches!(
        err,
        LoggerError::Config(ConfigError::Facility { .. })
    ));
    assert!(err.to_string().contains("not-a-real-facility"));
    assert_eq!(registry.size(), 0);
}
