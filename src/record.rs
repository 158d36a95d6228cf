// Log record handed to the writer by the host application
//
// The writer only reads it; nothing is retained after write_log returns.

use crate::level::RecordLevel;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

#[derive(Debug, Clone)]
pub struct LogRecord {
    pub level: RecordLevel,
    pub message: String,
    pub data: Map<String, Value>,
    pub component: String,
    pub request_id: String,
    pub created: DateTime<Utc>,
}

impl LogRecord {
    pub fn new(level: impl Into<RecordLevel>, message: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            message: message.into(),
            data: Map::new(),
            component: String::new(),
            request_id: String::new(),
            created: Utc::now(),
        }
    }

    pub fn with_data(mut self, data: Map<String, Value>) -> Self {
        self.data = data;
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = component.into();
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self
    }
}
