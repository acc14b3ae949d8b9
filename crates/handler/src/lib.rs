//! # Formrun Handler
//!
//! Binds a page's forms to the workflow service: on submit, a handler reads
//! the form's fields, posts them as JSON through a [`WorkflowTransport`], and
//! renders the service's answer into the form's result panel, bracketing the
//! request with a loading state.
//!
//! Two independent variants exist:
//!
//! - **single** ([`SingleFormHandler`]): `#workflowForm` posting
//!   `{ "name": ... }` to `/api/run-test`
//! - **workflow** ([`WorkflowFormHandler`]): each `.workflow-form` card
//!   posting its non-blank fields to `/api/workflows/{id}/run`
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use formrun_api::{TransportError, TransportResponse, WorkflowTransport};
//! use formrun_handler::{PageMarkup, bind_page, find_form, shared};
//! use formrun_types::{Payload, ResponseEnvelope};
//!
//! struct Echo;
//!
//! #[async_trait]
//! impl WorkflowTransport for Echo {
//!     async fn post_json(&self, _path: &str, payload: &Payload) -> Result<TransportResponse, TransportError> {
//!         let name = payload.get("name").unwrap_or_default();
//!         Ok(TransportResponse::new(200, ResponseEnvelope::success(format!("Hello, {name}!"))))
//!     }
//! }
//!
//! # tokio_test_block(async {
//! let markup = PageMarkup::from_yaml_str(r#"
//! elements:
//!   - tag: form
//!     id: workflowForm
//!     children:
//!       - { tag: input, id: name, name: name }
//!       - { tag: button, id: submitBtn, text: Run }
//!   - { tag: div, id: result, class: result }
//! "#)?;
//! let document = shared(markup.to_document());
//! let bindings = bind_page(&document, Arc::new(Echo));
//! let form = find_form(&document, "workflowForm").expect("form on page");
//! let dispatch = bindings.submit(form).await;
//! assert!(dispatch.event.default_prevented());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! # });
//! # fn tokio_test_block<F: std::future::Future>(future: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(future)
//! # }
//! ```

pub mod bindings;
pub mod dom;
pub mod markup;
pub mod render;
pub mod single;
pub mod submission;
pub mod workflow;

pub use bindings::{Bindings, SubmitDispatch, bind_page, find_form};
pub use dom::{Document, Element, NodeId};
pub use formrun_api::WorkflowTransport;
pub use markup::{ElementMarkup, MarkupError, PageMarkup};
pub use render::{PanelKind, ResultPanel};
pub use single::SingleFormHandler;
pub use submission::{SharedDocument, SubmitEvent, SubmitHandler, shared};
pub use workflow::WorkflowFormHandler;
