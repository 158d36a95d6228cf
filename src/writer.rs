// GELF writer - turns log records into GELF messages and publishes them
//
// DESIGN: Logging is best effort. write_log never fails: delivery errors are
// dropped without being logged, because this writer may itself be the sink
// any such log would end up in. try_write_log is the same path with the
// error handed back, for callers that want to know (the CLI).

use crate::config::WriterConfig;
use crate::error::{ConfigurationError, TransportError};
use crate::message::GelfMessage;
use crate::publisher::Publisher;
use crate::record::LogRecord;
use crate::request::RequestContext;
use crate::transport::create_transport;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// What a host framework needs from a log writer
#[async_trait]
pub trait LogWriter: Send + Sync {
    fn configure(options: Map<String, Value>) -> Result<Self, ConfigurationError>
    where
        Self: Sized;

    async fn write_log(&self, record: &LogRecord, request: Option<&RequestContext>);
}

pub struct GelfWriter {
    config: WriterConfig,
    publisher: Publisher,
}

impl GelfWriter {
    pub fn new(config: WriterConfig) -> Result<Self, ConfigurationError> {
        let transport = create_transport(config.hostname(), config.port(), config.protocol())?;
        Ok(Self::with_publisher(config, Publisher::new(transport)))
    }

    pub fn with_publisher(config: WriterConfig, publisher: Publisher) -> Self {
        Self { config, publisher }
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    pub fn facility(&self) -> &str {
        self.config.facility()
    }

    pub fn publisher(&self) -> &Publisher {
        &self.publisher
    }

    pub fn build_message(
        &self,
        record: &LogRecord,
        request: Option<&RequestContext>,
    ) -> GelfMessage {
        let additionals = merge_additional(
            &record.data,
            &context_fields(record, request),
            self.config.additional_data(),
        );

        let mut message = GelfMessage::new()
            .with_host(local_hostname())
            .with_short_message(record.message.as_str())
            .with_full_message(record.message.as_str())
            .with_level(record.level.resolve_name())
            .with_timestamp(record.created);

        for (key, value) in additionals {
            message.set_additional(key, value);
        }
        message
    }

    pub async fn try_write_log(
        &self,
        record: &LogRecord,
        request: Option<&RequestContext>,
    ) -> Result<(), TransportError> {
        let message = self.build_message(record, request);
        self.publisher.publish(&message).await
    }
}

#[async_trait]
impl LogWriter for GelfWriter {
    fn configure(options: Map<String, Value>) -> Result<Self, ConfigurationError> {
        GelfWriter::new(WriterConfig::from_options(options)?)
    }

    async fn write_log(&self, record: &LogRecord, request: Option<&RequestContext>) {
        let _ = self.try_write_log(record, request).await;
    }
}

/// Name of the machine emitting the log
pub fn local_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Record-derived and request-derived fields
pub fn context_fields(record: &LogRecord, request: Option<&RequestContext>) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("component".to_string(), Value::from(record.component.as_str()));
    fields.insert("request_id".to_string(), Value::from(record.request_id.as_str()));
    for (key, value) in RequestContext::fields(request) {
        fields.insert(key.to_string(), value);
    }
    fields
}

/// Later maps overwrite earlier ones on key collision.
pub fn merge_additional(
    data: &Map<String, Value>,
    context: &Map<String, Value>,
    configured: &Map<String, Value>,
) -> Map<String, Value> {
    let mut merged = data.clone();
    merged.extend(context.clone());
    merged.extend(configured.clone());
    merged
}
