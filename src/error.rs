// Error types for the GELF writer
//
// DESIGN: Two kinds of failure with two different owners.
// ConfigurationError is fatal and returned from writer construction.
// TransportError is per-publish and is swallowed by GelfWriter::write_log.

use thiserror::Error;

/// Construction-time failures. The writer cannot be built.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// `protocol` is not one of tcp, udp, http while a hostname is set
    #[error("Unknown GELF protocol: \"{0}\"")]
    UnknownProtocol(String),

    /// Options map or config file could not be turned into a WriterConfig
    #[error("invalid writer options: {0}")]
    InvalidOptions(String),

    /// The HTTP client could not be initialised
    #[error("cannot build HTTP client: {0}")]
    HttpClient(String),
}

/// Failures while delivering one message.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("cannot resolve {addr}: {source}")]
    Resolve {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("connection to {0} timed out")]
    ConnectTimeout(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot encode message: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// Payload needs more chunks than GELF allows
    #[error("message needs {count} chunks, at most {max} are allowed")]
    TooManyChunks { count: usize, max: usize },

    #[error("message is invalid: {0}")]
    InvalidMessage(String),
}
