//! Formrun workflow service client.
//!
//! This crate owns the one network seam of the form handler. It provides:
//!
//! - [`WorkflowTransport`], the request-in, envelope-or-failure-out interface
//!   the handler posts through, so tests can substitute a fake
//! - [`FormrunClient`], the `reqwest` implementation used by real hosts
//! - [`ClientConfig`], read from `FORMRUN_*` environment variables and
//!   validated before any request is built
//!
//! # Example
//!
//! ```ignore
//! use formrun_api::{ClientConfig, FormrunClient, WorkflowTransport};
//! use formrun_types::Payload;
//!
//! async fn run() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FormrunClient::new(ClientConfig::from_env()?)?;
//!     let response = client
//!         .post_json("/api/run-test", &Payload::single_name("Ada"))
//!         .await?;
//!     println!("status: {}", response.status);
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod transport;

pub use client::{FormrunClient, HealthStatus};
pub use config::{
    ALLOW_INSECURE_ENV, API_BASE_ENV, CONNECT_TIMEOUT_ENV, ClientConfig, ConfigError, DEFAULT_API_BASE,
    DEFAULT_CONNECT_TIMEOUT_SECS,
};
pub use transport::{TransportError, TransportResponse, WorkflowTransport, parse_envelope};
