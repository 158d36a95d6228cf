// HTTP transport - POSTs each GELF message as a JSON body
//
// DESIGN: Graylog's GELF HTTP input listens on /gelf and answers 202.
// Any 2xx is accepted; everything else is a delivery failure.

use super::{Protocol, Transport};
use crate::error::{ConfigurationError, TransportError};
use crate::message::GelfMessage;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

pub const DEFAULT_PATH: &str = "/gelf";

/// Bound on a whole request, response included
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct HttpTransport {
    client: reqwest::Client,
    host: String,
    port: u16,
    url: String,
}

impl HttpTransport {
    pub fn new(host: impl Into<String>, port: u16) -> Result<Self, ConfigurationError> {
        Self::with_request_timeout(host, port, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_request_timeout(
        host: impl Into<String>,
        port: u16,
        request_timeout: Duration,
    ) -> Result<Self, ConfigurationError> {
        let client = reqwest::Client::builder()
            .connect_timeout(super::tcp::DEFAULT_CONNECT_TIMEOUT)
            .timeout(request_timeout)
            .build()
            .map_err(|e| ConfigurationError::HttpClient(e.to_string()))?;

        let host = host.into();
        let url = format!(
            "http://{}{}",
            super::join_host_port(&host, port),
            DEFAULT_PATH
        );

        Ok(Self {
            client,
            host,
            port,
            url,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, message: &GelfMessage) -> Result<(), TransportError> {
        let body = message.to_json()?;

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::HttpStatus {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        Ok(())
    }

    fn protocol(&self) -> Protocol {
        Protocol::Http
    }

    fn target(&self) -> String {
        super::join_host_port(&self.host, self.port)
    }
}
