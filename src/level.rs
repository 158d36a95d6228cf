// Syslog severity levels as used by GELF
//
// Numeric values follow RFC 5424: 0 = emergency ... 7 = debug.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Emergency = 0,
    Alert = 1,
    Critical = 2,
    Error = 3,
    Warning = 4,
    Notice = 5,
    Info = 6,
    Debug = 7,
}

impl LogLevel {
    pub const ALL: [LogLevel; 8] = [
        LogLevel::Emergency,
        LogLevel::Alert,
        LogLevel::Critical,
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Notice,
        LogLevel::Info,
        LogLevel::Debug,
    ];

    pub fn from_number(n: i64) -> Option<Self> {
        usize::try_from(n).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|level| level.name().eq_ignore_ascii_case(name))
    }

    pub fn name(self) -> &'static str {
        match self {
            LogLevel::Emergency => "emergency",
            LogLevel::Alert => "alert",
            LogLevel::Critical => "critical",
            LogLevel::Error => "error",
            LogLevel::Warning => "warning",
            LogLevel::Notice => "notice",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }

    pub fn as_number(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Severity as supplied by the caller: either a syslog number or a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordLevel {
    Numeric(i64),
    Symbolic(String),
}

impl RecordLevel {
    /// Numeric levels that name a known severity become that name; anything
    /// else is handed on unchanged.
    pub fn resolve_name(&self) -> String {
        match self {
            RecordLevel::Numeric(n) => match LogLevel::from_number(*n) {
                Some(level) => level.name().to_string(),
                None => n.to_string(),
            },
            RecordLevel::Symbolic(name) => name.clone(),
        }
    }
}

impl From<LogLevel> for RecordLevel {
    fn from(level: LogLevel) -> Self {
        RecordLevel::Symbolic(level.name().to_string())
    }
}

impl From<i64> for RecordLevel {
    fn from(n: i64) -> Self {
        RecordLevel::Numeric(n)
    }
}

impl From<i32> for RecordLevel {
    fn from(n: i32) -> Self {
        RecordLevel::Numeric(i64::from(n))
    }
}

impl From<&str> for RecordLevel {
    fn from(name: &str) -> Self {
        RecordLevel::Symbolic(name.to_string())
    }
}

// Command line input: "3" and "error" are both accepted
impl FromStr for RecordLevel {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse::<i64>() {
            Ok(n) => RecordLevel::Numeric(n),
            Err(_) => RecordLevel::Symbolic(s.to_string()),
        })
    }
}
