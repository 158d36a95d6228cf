// GELF transports and the factory that picks one from configuration
//
// DESIGN: Each wire protocol is a separate module implementing the common
// Transport trait. The writer only ever sees a Box<dyn Transport>.

pub mod chunk;
pub mod http;
pub mod tcp;
pub mod udp;

#[cfg(test)]
pub(crate) mod mock;

use crate::error::{ConfigurationError, TransportError};
use crate::message::GelfMessage;
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

pub use chunk::{CHUNK_SIZE_LAN, CHUNK_SIZE_WAN};
pub use http::HttpTransport;
pub use tcp::TcpTransport;
pub use udp::UdpTransport;

/// Target of the fallback transport used when no hostname is configured
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 12201;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Tcp,
    Udp,
    Http,
}

impl Protocol {
    pub fn as_str(self) -> &'static str {
        match self {
            Protocol::Tcp => "tcp",
            Protocol::Udp => "udp",
            Protocol::Http => "http",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tcp" => Ok(Protocol::Tcp),
            "udp" => Ok(Protocol::Udp),
            "http" => Ok(Protocol::Http),
            other => Err(ConfigurationError::UnknownProtocol(other.to_string())),
        }
    }
}

/// Operations every wire transport supports
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver one message. Connection setup, if any, happens here.
    async fn send(&self, message: &GelfMessage) -> Result<(), TransportError>;

    fn protocol(&self) -> Protocol;

    /// `host:port` the transport delivers to
    fn target(&self) -> String;

    /// Datagram payload limit, for transports that chunk
    fn chunk_size(&self) -> Option<usize> {
        None
    }
}

/// Local UDP transport used when no collector is configured.
pub fn default_transport() -> Box<dyn Transport> {
    Box::new(UdpTransport::new(DEFAULT_HOST, DEFAULT_PORT, CHUNK_SIZE_WAN))
}

/// Factory function to create a transport from config
pub fn create_transport(
    hostname: &str,
    port: u16,
    protocol: &str,
) -> Result<Box<dyn Transport>, ConfigurationError> {
    if hostname.is_empty() {
        info!(
            collector = %join_host_port(DEFAULT_HOST, DEFAULT_PORT),
            "no GELF hostname configured, using local UDP transport"
        );
        return Ok(default_transport());
    }

    let transport: Box<dyn Transport> = match protocol.parse::<Protocol>()? {
        Protocol::Tcp => Box::new(TcpTransport::new(hostname, port)),
        Protocol::Udp => Box::new(UdpTransport::new(hostname, port, CHUNK_SIZE_LAN)),
        Protocol::Http => Box::new(HttpTransport::new(hostname, port)?),
    };

    debug!(
        protocol = %transport.protocol(),
        collector = %transport.target(),
        "created GELF transport"
    );

    Ok(transport)
}

// IPv6 literals need brackets once a port is appended
pub(crate) fn join_host_port(host: &str, port: u16) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_protocol_selects_its_transport() {
        for (name, expected) in [
            ("tcp", Protocol::Tcp),
            ("udp", Protocol::Udp),
            ("http", Protocol::Http),
        ] {
            let transport = create_transport("logs.example.com", 12201, name).unwrap();
            assert_eq!(transport.protocol(), expected);
            assert_eq!(transport.target(), "logs.example.com:12201");
        }
    }

    #[test]
    fn test_udp_uses_lan_chunks() {
        let transport = create_transport("logs.example.com", 5555, "udp").unwrap();
        assert_eq!(transport.chunk_size(), Some(CHUNK_SIZE_LAN));
        assert_eq!(transport.target(), "logs.example.com:5555");
    }

    #[test]
    fn test_empty_hostname_falls_back_to_local_udp() {
        for protocol in ["tcp", "udp", "http", "carrier-pigeon", ""] {
            let transport = create_transport("", 9999, protocol).unwrap();
            assert_eq!(transport.protocol(), Protocol::Udp);
            assert_eq!(transport.target(), "127.0.0.1:12201");
            assert_eq!(transport.chunk_size(), Some(CHUNK_SIZE_WAN));
        }
    }

    #[test]
    fn test_unknown_protocol_is_rejected() {
        let err = create_transport("logs.example.com", 12201, "amqp")
            .err()
            .expect("amqp should be rejected");
        assert!(matches!(err, ConfigurationError::UnknownProtocol(ref p) if p == "amqp"));
        assert!(err.to_string().contains("amqp"));
    }

    #[test]
    fn test_protocol_names_are_exact() {
        assert!("TCP".parse::<Protocol>().is_err());
        assert!(" udp".parse::<Protocol>().is_err());
        assert_eq!("http".parse::<Protocol>().unwrap().to_string(), "http");
    }

    #[test]
    fn test_join_host_port() {
        assert_eq!(join_host_port("10.0.0.5", 12201), "10.0.0.5:12201");
        assert_eq!(join_host_port("fe80::1", 12201), "[fe80::1]:12201");
        assert_eq!(join_host_port("[fe80::1]", 12201), "[fe80::1]:12201");
    }
}
