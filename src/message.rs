// GELF 1.1 message
//
// Wire format (one JSON object):
// {"version":"1.1","host":"web01","short_message":"disk full","full_message":"disk full",
//  "timestamp":1733235825.123456,"level":3,"_disk":"/var"}
//
// Additional fields are stored without the leading underscore and get it
// when the message is encoded.

use crate::error::TransportError;
use crate::level::LogLevel;
use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

pub const GELF_VERSION: &str = "1.1";

#[derive(Debug, Clone, PartialEq)]
pub struct GelfMessage {
    version: String,
    host: String,
    short_message: String,
    full_message: String,
    timestamp: DateTime<Utc>,
    level: String,
    additionals: Map<String, Value>,
}

impl Default for GelfMessage {
    fn default() -> Self {
        Self::new()
    }
}

impl GelfMessage {
    pub fn new() -> Self {
        Self {
            version: GELF_VERSION.to_string(),
            host: String::new(),
            short_message: String::new(),
            full_message: String::new(),
            timestamp: Utc::now(),
            level: LogLevel::Alert.name().to_string(),
            additionals: Map::new(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_short_message(mut self, message: impl Into<String>) -> Self {
        self.short_message = message.into();
        self
    }

    pub fn with_full_message(mut self, message: impl Into<String>) -> Self {
        self.full_message = message.into();
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Level as a name ("error") or as the decimal text of a syslog number.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn set_additional(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.additionals.insert(key.into(), value.into());
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn short_message(&self) -> &str {
        &self.short_message
    }

    pub fn full_message(&self) -> &str {
        &self.full_message
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn level(&self) -> &str {
        &self.level
    }

    /// Numeric severity for the wire, if the level is recognized.
    pub fn syslog_level(&self) -> Option<LogLevel> {
        LogLevel::from_name(&self.level).or_else(|| {
            self.level
                .parse::<i64>()
                .ok()
                .and_then(LogLevel::from_number)
        })
    }

    pub fn additional(&self, key: &str) -> Option<&Value> {
        self.additionals.get(key)
    }

    pub fn additionals(&self) -> &Map<String, Value> {
        &self.additionals
    }

    /// Checks the fields every GELF collector requires.
    pub fn validate(&self) -> Result<(), TransportError> {
        for (field, value) in [
            ("version", &self.version),
            ("host", &self.host),
            ("short_message", &self.short_message),
        ] {
            if value.is_empty() {
                return Err(TransportError::InvalidMessage(format!("{field} is empty")));
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<Vec<u8>, TransportError> {
        Ok(serde_json::to_vec(self)?)
    }

    fn timestamp_secs(&self) -> f64 {
        self.timestamp.timestamp_micros() as f64 / 1_000_000.0
    }
}

/// Value as it goes on the wire, or None if the field is left out.
///
/// GELF additional fields hold strings or numbers: nested values are sent as
/// their JSON text, null and empty strings are dropped, and `_id` is reserved
/// by the format.
fn wire_value(key: &str, value: &Value) -> Option<Value> {
    if key.is_empty() || key == "id" {
        return None;
    }
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::Array(_) | Value::Object(_) => Some(Value::String(value.to_string())),
        other => Some(other.clone()),
    }
}

impl Serialize for GelfMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("version", &self.version)?;
        map.serialize_entry("host", &self.host)?;
        map.serialize_entry("short_message", &self.short_message)?;
        if !self.full_message.is_empty() {
            map.serialize_entry("full_message", &self.full_message)?;
        }
        map.serialize_entry("timestamp", &self.timestamp_secs())?;
        if let Some(level) = self.syslog_level() {
            map.serialize_entry("level", &level.as_number())?;
        }
        for (key, value) in &self.additionals {
            if let Some(value) = wire_value(key, value) {
                map.serialize_entry(&format!("_{key}"), &value)?;
            }
        }
        map.end()
    }
}
