// Publisher - owns one transport and delivers messages through it
//
// Errors are returned to the caller untouched; no retry happens here.

use crate::error::TransportError;
use crate::message::GelfMessage;
use crate::transport::Transport;

pub struct Publisher {
    transport: Box<dyn Transport>,
}

impl Publisher {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Validate `message` and hand it to the transport.
    pub async fn publish(&self, message: &GelfMessage) -> Result<(), TransportError> {
        message.validate()?;
        self.transport.send(message).await
    }
}
