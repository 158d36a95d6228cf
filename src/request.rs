// Inbound request metadata attached to log messages
//
// DESIGN: The caller passes the current request explicitly. Outside a
// request (background jobs, CLI) there is simply no context.

use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub host: Option<String>,
    pub url: Option<String>,
    pub method: Option<String>,
    pub query_string: Option<String>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_query_string(mut self, query_string: impl Into<String>) -> Self {
        self.query_string = Some(query_string.into());
        self
    }

    /// Fields in the order they are merged into a message. Missing values
    /// are null, which the wire encoding drops.
    pub fn fields(request: Option<&RequestContext>) -> [(&'static str, Value); 4] {
        let value = |field: Option<&String>| field.cloned().map(Value::String).unwrap_or(Value::Null);

        [
            ("request_host", value(request.and_then(|r| r.host.as_ref()))),
            ("request_url", value(request.and_then(|r| r.url.as_ref()))),
            ("request_method", value(request.and_then(|r| r.method.as_ref()))),
            ("query_string", value(request.and_then(|r| r.query_string.as_ref()))),
        ]
    }
}
