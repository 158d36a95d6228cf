// UDP transport - zlib-compressed GELF datagrams, chunked when oversized
//
// DESIGN: The socket is bound and connected on first use and kept for
// later sends. Resolution happens once, at that point.

use super::chunk;
use super::{Protocol, Transport};
use crate::error::TransportError;
use crate::message::GelfMessage;
use async_trait::async_trait;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use std::io::Write;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::UdpSocket;
use tokio::sync::Mutex;

pub struct UdpTransport {
    host: String,
    port: u16,
    chunk_size: usize,
    socket: Mutex<Option<UdpSocket>>,
}

impl UdpTransport {
    pub fn new(host: impl Into<String>, port: u16, chunk_size: usize) -> Self {
        Self {
            host: host.into(),
            port,
            chunk_size,
            socket: Mutex::new(None),
        }
    }

    async fn connect(&self) -> Result<UdpSocket, TransportError> {
        let target = self.target();
        let addr = tokio::net::lookup_host((self.host.as_str(), self.port))
            .await
            .map_err(|source| TransportError::Resolve {
                addr: target.clone(),
                source,
            })?
            .next()
            .ok_or_else(|| TransportError::Resolve {
                addr: target.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no addresses"),
            })?;

        let local = if addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        };
        let socket = UdpSocket::bind(local).await?;
        socket
            .connect(addr)
            .await
            .map_err(|source| TransportError::Connect {
                addr: target,
                source,
            })?;
        Ok(socket)
    }
}

pub(crate) fn compress(payload: &[u8]) -> Result<Vec<u8>, TransportError> {
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(payload.len() / 2), Compression::default());
    encoder.write_all(payload)?;
    Ok(encoder.finish()?)
}

#[async_trait]
impl Transport for UdpTransport {
    async fn send(&self, message: &GelfMessage) -> Result<(), TransportError> {
        let payload = compress(&message.to_json()?)?;
        let datagrams = chunk::split(&payload, self.chunk_size, chunk::message_id())?;

        let mut guard = self.socket.lock().await;
        let socket = match guard.take() {
            Some(socket) => socket,
            None => self.connect().await?,
        };

        for datagram in &datagrams {
            socket.send(datagram).await?;
        }

        *guard = Some(socket);
        Ok(())
    }

    fn protocol(&self) -> Protocol {
        Protocol::Udp
    }

    fn target(&self) -> String {
        super::join_host_port(&self.host, self.port)
    }

    fn chunk_size(&self) -> Option<usize> {
        Some(self.chunk_size)
    }
}
