//! HTTP wire types and the transport seam.
//!
//! # Design
//! Requests and responses are described as plain data: the client builds
//! `HttpRequest` values and parses `HttpResponse` values, while the actual
//! round-trip goes through an injected `HttpTransport`. The transport is the
//! only place that touches the network, so everything above it can be tested
//! with a scripted implementation.
//!
//! A transport error and a non-2xx response are different things: the former
//! means no response was obtained at all, the latter comes back as an
//! ordinary `HttpResponse` and is interpreted by the client.

use crate::error::TransportError;

/// HTTP method for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// An HTTP request described as plain data.
///
/// Built by `ResourceClient::build_*` methods; `url` is the full URL
/// including the base prefix and endpoint path.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Produced by an `HttpTransport`, consumed by `ResourceClient::parse_*`
/// methods. Any status code may appear here; status interpretation is the
/// client's job.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Executes HTTP round-trips on behalf of a `ResourceClient`.
///
/// Implementations must return 4xx/5xx responses as `Ok(HttpResponse)` and
/// reserve `Err` for failures where no response was obtained (connection
/// refused, DNS, malformed request).
pub trait HttpTransport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Production transport over a `ureq::Agent`.
///
/// The agent is configured with `http_status_as_error(false)` so non-2xx
/// responses come back as data rather than transport errors. Bodies are
/// always sent as JSON, matching what `ResourceClient` builds.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = &request.url;
        let result = match (&request.method, request.body.as_deref()) {
            (HttpMethod::Get, _) => self.agent.get(url).call(),
            (HttpMethod::Delete, _) => self.agent.delete(url).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(url)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(url).send_empty(),
            (HttpMethod::Put, Some(body)) => self
                .agent
                .put(url)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => self.agent.put(url).send_empty(),
        };

        let mut response = result.map_err(TransportError::new)?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(TransportError::new)?;

        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}
