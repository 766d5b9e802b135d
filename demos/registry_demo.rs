// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Walk through the registry: named loggers, broadcasts, config, syslog.
//!
//! ```text
//! cargo run --example registry_demo
//! ```

use anyhow::{Context, Result};
use sinklog::{
    log_info, log_notice, log_warning, Config, Facility, Registry, Severity, StreamSink,
    StreamTarget, SyslogOptions, SyslogParams, SyslogSink,
};

fn main() -> Result<()> {
    println!("sinklog {}", sinklog::version());

    sinklog::set_program_name("registry-demo");
    let http = sinklog::get("http");
    let db = sinklog::get_as::<StreamSink>("db", StreamTarget::Stderr)?;

    log_info!(http, "listening on port {}", 8080);
    log_notice!(db, "pool ready with {} connections", 4);

    // Request-scoped context reaches every registered logger.
    sinklog::set_ecid("req-0001");
    log_info!(http, "GET /health 200");
    sinklog::set_ecid("");

    sinklog::set_level(Severity::Warning);
    log_info!(http, "hidden after the level change");
    log_warning!(db, "slow query: {}ms", 812);

    let audit = Registry::instance()
        .get_as::<SyslogSink>(
            "audit",
            SyslogParams::new(Facility::Local0, SyslogOptions::PID | SyslogOptions::NDELAY),
        )
        .context("syslog sink")?;
    log_warning!(audit, "demo finished setup");

    // A separate registry configured from JSON5.
    let config = Config::parse(
        r#"{
            program_name: "configured",
            level: "debug",
            ecid: "batch-7",
            loggers: [{ name: "worker", sink: { type: "stdout" } }],
        }"#,
    )?;
    let registry = Registry::new();
    let loggers = config.apply(&registry)?;
    for logger in &loggers {
        logger.debug(format_args!("configured logger {}", logger.name()));
    }

    sinklog::reset_registry();
    log_warning!(http, "handles keep working after a reset");
    Ok(())
}
