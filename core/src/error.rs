//! Error types for the resource data-access layer.
//!
//! # Design
//! The taxonomy keeps two failure classes strictly apart: `Request` means the
//! server was reached and answered with a non-2xx status, `Transport` means
//! no response was obtained at all. Callers may want to retry a transport
//! failure but not a 4xx application failure, so the two must never be
//! conflated. `Request` is constructed uniformly regardless of which verb
//! failed; a 404 and a 500 are told apart by the carried status code.

use thiserror::Error;

/// The server was unreachable or the request failed before a response was
/// obtained. Wraps the underlying cause.
#[derive(Debug, Error)]
#[error("transport failure: {0}")]
pub struct TransportError(Box<dyn std::error::Error + Send + Sync>);

impl TransportError {
    pub fn new(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(cause.into())
    }

    /// The underlying transport-level cause.
    pub fn cause(&self) -> &(dyn std::error::Error + Send + Sync) {
        self.0.as_ref()
    }
}

/// Errors surfaced by `ResourceClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server responded with a non-2xx status.
    #[error("HTTP {status} from {endpoint}")]
    Request { status: u16, endpoint: String },

    /// No response was obtained from the server.
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        source: TransportError,
    },

    /// The request payload could not be encoded to JSON.
    #[error("failed to encode request body: {0}")]
    Serialize(String),

    /// The response body could not be decoded into the expected type.
    #[error("failed to decode response from {endpoint}: {detail}")]
    Deserialize { endpoint: String, detail: String },
}

impl ApiError {
    /// True when the failure happened below the HTTP layer and a retry may
    /// succeed without any change to the request.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport { .. })
    }

    /// The HTTP status code, when the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}
