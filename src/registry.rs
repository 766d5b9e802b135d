// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Name → logger directory with atomic get-or-create
//!
//! A [`Registry`] can be constructed and injected like any other value; the
//! process-wide one is reached through [`Registry::instance`], built lazily
//! on first access and never torn down.
//!
//! Every operation takes the registry's single mutex for its whole duration,
//! including sink construction. Two threads asking for the same name can
//! therefore never both observe "absent": the second one gets the first
//! one's logger.

use crate::error::Result;
use crate::logger::Logger;
use crate::sink::{BuildSink, Sink, SinkOptions, StreamSink};
use crate::Severity;
use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

/// Program name used when none has been set: the executable's file stem.
pub const FALLBACK_PROGRAM_NAME: &str = "prog";

struct RegistryInner {
    loggers: HashMap<String, Arc<Logger>>,
    /// Default threshold for new loggers, also broadcast on change
    level: Severity,
    /// Default program name for new loggers only
    program_name: String,
}

pub struct Registry {
    inner: Mutex<RegistryInner>,
}

impl Registry {
    pub fn new() -> Self {
        Self::with_defaults(default_program_name(), Severity::default())
    }

    pub fn with_defaults(program_name: impl Into<String>, level: Severity) -> Self {
        Self {
            inner: Mutex::new(RegistryInner {
                loggers: HashMap::new(),
                level,
                program_name: program_name.into(),
            }),
        }
    }

    /// The process-wide registry
    pub fn instance() -> &'static Registry {
        static INSTANCE: OnceLock<Registry> = OnceLock::new();
        INSTANCE.get_or_init(Registry::new)
    }

    fn lock(&self) -> MutexGuard<'_, RegistryInner> {
        // A panic inside a sink constructor must not disable logging.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Existing logger for `name`, or a new one writing to standard output.
    pub fn get(&self, name: &str) -> Arc<Logger> {
        let created = self.get_with(name, |options| {
            Ok::<_, Infallible>(Box::new(StreamSink::stdout(options)) as Box<dyn Sink>)
        });
        match created {
            Ok(logger) => logger,
            Err(never) => match never {},
        }
    }

    /// Existing logger for `name`, or a new one backed by an `S` built from
    /// the registry's current defaults plus `args`.
    ///
    /// If `name` is already registered, `args` is dropped unused and the
    /// existing logger is returned whatever its sink type.
    pub fn get_as<S: BuildSink>(&self, name: &str, args: S::Args) -> Result<Arc<Logger>> {
        self.get_with(name, |options| {
            S::build(options, args).map(|sink| Box::new(sink) as Box<dyn Sink>)
        })
    }

    /// Get-or-create with a caller-supplied sink constructor
    ///
    /// `make` runs at most once, under the registry lock, and only when
    /// `name` is absent. A failed construction leaves the registry unchanged.
    pub fn get_with<E>(
        &self,
        name: &str,
        make: impl FnOnce(SinkOptions) -> std::result::Result<Box<dyn Sink>, E>,
    ) -> std::result::Result<Arc<Logger>, E> {
        let mut inner = self.lock();
        if let Some(existing) = inner.loggers.get(name) {
            return Ok(Arc::clone(existing));
        }

        let options = SinkOptions::new(name)
            .program_name(inner.program_name.as_str())
            .level(inner.level);
        let logger = Arc::new(Logger::from_boxed(name, make(options)?));
        inner.loggers.insert(name.to_string(), Arc::clone(&logger));
        Ok(logger)
    }

    /// Registered logger for `name`, without creating one.
    pub fn lookup(&self, name: &str) -> Option<Arc<Logger>> {
        self.lock().loggers.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lock().loggers.contains_key(name)
    }

    /// Forget `name`. Handles already given out keep working.
    pub fn remove(&self, name: &str) {
        self.lock().loggers.remove(name);
    }

    /// Forget every logger. Handles already given out keep working and
    /// release their sinks when the last one is dropped.
    pub fn reset(&self) {
        self.lock().loggers.clear();
    }

    pub fn size(&self) -> usize {
        self.lock().loggers.len()
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().loggers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Set the default level and apply it to every registered logger.
    pub fn set_log_level(&self, level: Severity) {
        let mut inner = self.lock();
        inner.level = level;
        for logger in inner.loggers.values() {
            logger.set_log_level(level);
        }
    }

    pub fn level(&self) -> Severity {
        self.lock().level
    }

    /// Apply `ecid` to every registered logger. Loggers created later start
    /// without one.
    pub fn set_ecid(&self, ecid: &str) {
        let inner = self.lock();
        for logger in inner.loggers.values() {
            logger.set_ecid(ecid);
        }
    }

    /// Change the program name given to loggers created from now on.
    pub fn set_program_name(&self, program_name: &str) {
        self.lock().program_name = program_name.to_string();
    }

    pub fn program_name(&self) -> String {
        self.lock().program_name.clone()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        let mut names: Vec<&String> = inner.loggers.keys().collect();
        names.sort();
        f.debug_struct("Registry")
            .field("loggers", &names)
            .field("level", &inner.level)
            .field("program_name", &inner.program_name)
            .finish()
    }
}

fn default_program_name() -> String {
    std::env::current_exe()
        .ok()
        .as_deref()
        .and_then(Path::file_stem)
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map_or_else(|| FALLBACK_PROGRAM_NAME.to_string(), str::to_string)
}

/// [`Registry::get`] on the process-wide registry
pub fn get(name: &str) -> Arc<Logger> {
    Registry::instance().get(name)
}

/// [`Registry::get_as`] on the process-wide registry
pub fn get_as<S: BuildSink>(name: &str, args: S::Args) -> Result<Arc<Logger>> {
    Registry::instance().get_as::<S>(name, args)
}

pub fn remove(name: &str) {
    Registry::instance().remove(name);
}

pub fn set_level(level: Severity) {
    Registry::instance().set_log_level(level);
}

pub fn set_ecid(ecid: &str) {
    Registry::instance().set_ecid(ecid);
}

pub fn set_program_name(program_name: &str) {
    Registry::instance().set_program_name(program_name);
}

pub fn reset_registry() {
    Registry::instance().reset();
}
