//! Logging port used by the client.
//!
//! The client never talks to a logging backend directly. It is handed a
//! [`LogSink`] at construction; [`NullLog`] is the default.

use std::fmt;

/// Severity of a client log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Debug => f.write_str("DEBUG"),
            Severity::Info => f.write_str("INFO"),
            Severity::Error => f.write_str("ERROR"),
        }
    }
}

/// Receives log messages from the client. Must not panic.
pub trait LogSink {
    fn log(&self, message: &str, severity: Severity);
}

impl<F> LogSink for F
where
    F: Fn(&str, Severity),
{
    fn log(&self, message: &str, severity: Severity) {
        self(message, severity)
    }
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLog;

impl LogSink for NullLog {
    fn log(&self, _message: &str, _severity: Severity) {}
}

/// Forwards messages to the `log` facade under the `hdhomerun` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogCrateSink;

impl LogSink for LogCrateSink {
    fn log(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Debug => log::debug!(target: "hdhomerun", "{}", message),
            Severity::Info => log::info!(target: "hdhomerun", "{}", message),
            Severity::Error => log::error!(target: "hdhomerun", "{}", message),
        }
    }
}
