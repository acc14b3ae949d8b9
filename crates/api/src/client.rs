use std::env;

use async_trait::async_trait;
use formrun_types::Payload;
use reqwest::{Client, RequestBuilder, header};
use serde::Deserialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::transport::{TransportError, TransportResponse, WorkflowTransport, parse_envelope};

const HEALTH_PATH: &str = "/api/health";

#[derive(Debug, Clone)]
/// Thin wrapper around a configured `reqwest::Client` for the workflow service.
///
/// Requests are resolved relative to the validated base URL and carry a
/// consistent User-Agent and `Accept: application/json`. No request timeout
/// is applied; only connecting is bounded.
pub struct FormrunClient {
    pub base_url: String,
    pub http: Client,
    pub user_agent: String,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

impl FormrunClient {
    pub fn new(config: ClientConfig) -> Result<Self, TransportError> {
        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(default_headers)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|error| TransportError::Network(format!("could not build the HTTP client: {error}")))?;

        Ok(Self {
            base_url: config.base_url,
            http,
            user_agent: format!("formrun/{}; {}", env!("CARGO_PKG_VERSION"), env::consts::OS),
        })
    }

    /// Build a `reqwest::RequestBuilder` for a method and API-relative path.
    pub fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, %method, "building request");

        self.http
            .request(method, url)
            .header(header::USER_AGENT, &self.user_agent)
    }

    /// Query the service's health endpoint.
    pub async fn health(&self) -> Result<HealthStatus, TransportError> {
        let response = self
            .request(reqwest::Method::GET, HEALTH_PATH)
            .send()
            .await
            .map_err(|error| TransportError::Network(error.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }
        let text = response
            .text()
            .await
            .map_err(|error| TransportError::Network(error.to_string()))?;
        serde_json::from_str::<HealthStatus>(&text)
            .map_err(|error| TransportError::Decode(format!("Invalid JSON response: {error}")))
    }
}

#[async_trait]
impl WorkflowTransport for FormrunClient {
    async fn post_json(&self, path: &str, payload: &Payload) -> Result<TransportResponse, TransportError> {
        let response = self
            .request(reqwest::Method::POST, path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(payload.to_json())
            .send()
            .await
            .map_err(|error| TransportError::Network(error.to_string()))?;

        let status = response.status();
        debug!(%path, status = status.as_u16(), "received response");

        let text = response
            .text()
            .await
            .map_err(|error| TransportError::Network(error.to_string()))?;
        let envelope = parse_envelope(&text)?;

        Ok(TransportResponse::new(status.as_u16(), envelope))
    }
}
