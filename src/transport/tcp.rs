// TCP transport - NUL-delimited GELF JSON over one persistent stream
//
// Frame: <json bytes> 0x00
//
// DESIGN: Connect on first send and keep the stream. A failed connect or
// write drops the stream, so the next send starts a fresh connection.
// A kept stream is checked before reuse: once the collector has closed it,
// writes would still land in the kernel buffer and be lost.

use super::{Protocol, Transport};
use crate::error::TransportError;
use crate::message::GelfMessage;
use async_trait::async_trait;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio::time::timeout;

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct TcpTransport {
    host: String,
    port: u16,
    connect_timeout: Duration,
    stream: Mutex<Option<TcpStream>>,
}

impl TcpTransport {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            stream: Mutex::new(None),
        }
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    async fn connect(&self) -> Result<TcpStream, TransportError> {
        let target = self.target();
        let stream = timeout(
            self.connect_timeout,
            TcpStream::connect((self.host.as_str(), self.port)),
        )
        .await
        .map_err(|_| TransportError::ConnectTimeout(target.clone()))?
        .map_err(|source| TransportError::Connect {
            addr: target,
            source,
        })?;
        stream.set_nodelay(true)?;
        Ok(stream)
    }
}

// The collector never writes on a GELF stream, so anything but WouldBlock
// means the peer hung up or the socket is broken.
fn peer_closed(stream: &TcpStream) -> bool {
    let mut buf = [0u8; 1];
    match stream.try_read(&mut buf) {
        Ok(0) => true,
        Ok(_) => false,
        Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => false,
        Err(_) => true,
    }
}

#[async_trait]
impl Transport for TcpTransport {
    async fn send(&self, message: &GelfMessage) -> Result<(), TransportError> {
        let mut frame = message.to_json()?;
        frame.push(0);

        let mut guard = self.stream.lock().await;
        let mut stream = match guard.take() {
            Some(stream) if !peer_closed(&stream) => stream,
            _ => self.connect().await?,
        };

        stream.write_all(&frame).await?;
        stream.flush().await?;

        *guard = Some(stream);
        Ok(())
    }

    fn protocol(&self) -> Protocol {
        Protocol::Tcp
    }

    fn target(&self) -> String {
        super::join_host_port(&self.host, self.port)
    }
}
