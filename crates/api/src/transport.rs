use async_trait::async_trait;
use formrun_types::{Payload, ResponseEnvelope};
use thiserror::Error;

/// Sends one form payload and returns the service's envelope.
///
/// Implementations must issue exactly one request per call. A response with
/// any status is `Ok`; `Err` is reserved for failures where no usable
/// envelope exists.
#[async_trait]
pub trait WorkflowTransport: Send + Sync {
    /// POST `payload` as a JSON body to the API-relative `path`.
    async fn post_json(&self, path: &str, payload: &Payload) -> Result<TransportResponse, TransportError>;
}

/// A response that arrived and parsed as an envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub envelope: ResponseEnvelope,
}

impl TransportResponse {
    pub fn new(status: u16, envelope: ResponseEnvelope) -> Self {
        Self { status, envelope }
    }

    /// 2xx statuses take the success branch; everything else is an error.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure before a usable envelope was obtained.
///
/// `Display` is the bare failure message; the handler renders it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request could not be sent or the body could not be read.
    #[error("{0}")]
    Network(String),
    /// The body was not JSON.
    #[error("{0}")]
    Decode(String),
    /// A non-JSON endpoint (health) answered with a non-2xx status.
    #[error("HTTP {0}")]
    Status(u16),
}

/// Parse a response body into an envelope.
///
/// Any JSON value is accepted; fields of the wrong shape are read leniently
/// by [`ResponseEnvelope::from_value`].
///
/// # Errors
/// Returns [`TransportError::Decode`] when the body is empty or not JSON.
pub fn parse_envelope(text: &str) -> Result<ResponseEnvelope, TransportError> {
    if text.trim().is_empty() {
        return Err(TransportError::Decode("Unexpected end of JSON input".to_string()));
    }
    serde_json::from_str::<serde_json::Value>(text)
        .map(ResponseEnvelope::from_value)
        .map_err(|error| TransportError::Decode(format!("Invalid JSON response: {error}")))
}
