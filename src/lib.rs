// GELF log writer
//
// Builds GELF 1.1 messages from log records and ships them to a collector
// over TCP, UDP or HTTP. See GelfWriter for the entry point.

pub mod config;
pub mod error;
pub mod level;
pub mod message;
pub mod publisher;
pub mod record;
pub mod request;
pub mod transport;
pub mod writer;

pub use config::WriterConfig;
pub use error::{ConfigurationError, TransportError};
pub use level::{LogLevel, RecordLevel};
pub use message::GelfMessage;
pub use publisher::Publisher;
pub use record::LogRecord;
pub use request::RequestContext;
pub use transport::{Protocol, Transport, create_transport, default_transport};
pub use writer::{GelfWriter, LogWriter};
