// SPDX-License-Identifier: Apache-2.0 OR MIT
// Logging macros for convenient logging
//
// Each macro takes a logger (anything with the `Logger` methods, usually an
// `Arc<Logger>`) followed by `format!`-style arguments. Arguments are only
// rendered when the level passes the logger's threshold.

/// Log a message at an explicit severity
///
/// # Examples
/// ```ignore
/// log_at!(logger, Severity::Notice, "worker {} restarted", id);
/// ```
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format_args!($($arg)+))
    };
}

/// Log a message with emergency severity
///
/// # Examples
/// ```ignore
/// log_emergency!(logger, "System is down");
/// ```
#[macro_export]
macro_rules! log_emergency {
    ($logger:expr, $($arg:tt)+) => {
        $logger.emergency(format_args!($($arg)+))
    };
}

/// Log a message with alert severity
///
/// # Examples
/// ```ignore
/// log_alert!(logger, "Disk {} almost full", mount);
/// ```
#[macro_export]
macro_rules! log_alert {
    ($logger:expr, $($arg:tt)+) => {
        $logger.alert(format_args!($($arg)+))
    };
}

/// Log a message with critical severity
#[macro_export]
macro_rules! log_critical {
    ($logger:expr, $($arg:tt)+) => {
        $logger.critical(format_args!($($arg)+))
    };
}

/// Log a message with error severity
///
/// # Examples
/// ```ignore
/// log_error!(logger, "Failed to bind {}: {}", addr, err);
/// ```
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.error(format_args!($($arg)+))
    };
}

/// Log a message with warning severity
#[macro_export]
macro_rules! log_warning {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warning(format_args!($($arg)+))
    };
}

/// Log a message with notice severity
#[macro_export]
macro_rules! log_notice {
    ($logger:expr, $($arg:tt)+) => {
        $logger.notice(format_args!($($arg)+))
    };
}

/// Log a message with info severity
///
/// # Examples
/// ```ignore
/// log_info!(logger, "Request {} served in {}ms", id, elapsed);
/// ```
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.info(format_args!($($arg)+))
    };
}

/// Log a message with debug severity
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug(format_args!($($arg)+))
    };
}

/// Log a message with trace severity
#[macro_export]
macro_rules! log_trace {
    ($logger:expr, $($arg:tt)+) => {
        $logger.trace(format_args!($($arg)+))
    };
}
