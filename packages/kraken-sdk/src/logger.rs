//! Logging interface for the SDK
//!
//! The client reports failures through a [`Logger`] rather than returning
//! them, and a [`LogPolicy`] decides the severity of each failure class.

use std::sync::Mutex;

/// Error codes that the exchange emits during short outages. In cron mode
/// they are reported at info level.
pub const TRANSIENT_ERROR_CODES: [&str; 2] = ["EService:Unavailable", "EAPI:Invalid nonce"];

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Logger trait that can be implemented for custom logging behavior
pub trait Logger: Send + Sync {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
    fn log(&self, level: LogLevel, message: &str);
}

/// Logger forwarding to the `tracing` macros
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!("{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }

    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => self.debug(message),
            LogLevel::Info => self.info(message),
            LogLevel::Warn => self.warn(message),
            LogLevel::Error => self.error(message),
        }
    }
}

/// Logger keeping every entry in memory
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<(LogLevel, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// True if an entry at `level` contains `needle`
    pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.entries()
            .iter()
            .any(|(l, message)| *l == level && message.contains(needle))
    }

    /// Number of entries at or above `level`
    pub fn count_at_least(&self, level: LogLevel) -> usize {
        self.entries().iter().filter(|(l, _)| *l >= level).count()
    }

    fn push(&self, level: LogLevel, message: &str) {
        match self.entries.lock() {
            Ok(mut entries) => entries.push((level, message.to_string())),
            Err(poisoned) => poisoned.into_inner().push((level, message.to_string())),
        }
    }
}

impl Logger for MemoryLogger {
    fn debug(&self, message: &str) {
        self.push(LogLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.push(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.push(LogLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.push(LogLevel::Error, message);
    }

    fn log(&self, level: LogLevel, message: &str) {
        self.push(level, message);
    }
}

/// No-op logger that discards all log messages
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn debug(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
    fn log(&self, _level: LogLevel, _message: &str) {}
}

/// Severity policy for failed calls.
///
/// Cron mode tones down failures caused by the exchange being temporarily
/// unreachable so that unattended runs do not send mail for every outage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogPolicy {
    cron: bool,
}

impl LogPolicy {
    pub fn standard() -> Self {
        Self { cron: false }
    }

    pub fn cron() -> Self {
        Self { cron: true }
    }

    pub fn from_cron_flag(cron: bool) -> Self {
        Self { cron }
    }

    pub fn is_cron(&self) -> bool {
        self.cron
    }

    pub fn network_error_level(&self) -> LogLevel {
        if self.cron {
            LogLevel::Info
        } else {
            LogLevel::Error
        }
    }

    /// `None` means the failure is not reported at all
    pub fn value_error_level(&self) -> Option<LogLevel> {
        if self.cron {
            None
        } else {
            Some(LogLevel::Error)
        }
    }

    pub fn api_error_level(&self, code: &str) -> LogLevel {
        if self.cron && TRANSIENT_ERROR_CODES.contains(&code) {
            LogLevel::Info
        } else {
            LogLevel::Error
        }
    }
}
