//! Log entry data model and its JSON wire encoding.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canned messages a generated entry can carry.
pub const MESSAGES: [&str; 8] = [
    "User login successful",
    "User login failed",
    "Database connection established",
    "Database connection failed",
    "Service started",
    "Service stopped",
    "Payment processed",
    "Payment failed",
];

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Info,
    Warning,
    Error,
    Debug,
}

impl LogLevel {
    /// Every level, in the order the generator samples from.
    pub const ALL: [LogLevel; 4] = [
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Debug,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Debug => "DEBUG",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single synthetic log record.
///
/// Serialized as a flat JSON object with the keys `level`, `message` and
/// `timestamp` (milliseconds since the Unix epoch).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: i64,
}

impl LogEntry {
    /// Encode the entry as UTF-8 JSON bytes, ready to hand to a publisher.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}
