// In-memory transports for publisher and writer tests

use super::{Protocol, Transport};
use crate::error::TransportError;
use crate::message::GelfMessage;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Records every message it is asked to send. Fails every send when
/// `failing` is set, after recording the attempt.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    pub sent: Arc<Mutex<Vec<GelfMessage>>>,
    pub failing: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn messages(&self) -> Vec<GelfMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, message: &GelfMessage) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(message.clone());
        if self.failing {
            return Err(TransportError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "collector unreachable",
            )));
        }
        Ok(())
    }

    fn protocol(&self) -> Protocol {
        Protocol::Udp
    }

    fn target(&self) -> String {
        "mock:0".to_string()
    }
}
