#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use formrun_api::{TransportError, TransportResponse, WorkflowTransport};
use formrun_handler::{Document, PageMarkup, SharedDocument, shared};
use formrun_types::{Payload, ResponseEnvelope};
use tokio::sync::oneshot;

/// A request the fake transport received.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub path: String,
    pub body: String,
}

type Reply = Result<TransportResponse, TransportError>;

struct Scripted {
    /// Only answer requests for this path; `None` answers any.
    path: Option<String>,
    gate: Option<oneshot::Receiver<()>>,
    reply: Reply,
}

/// Scripted transport: answers requests in order and records each one.
///
/// A reply may be gated on a oneshot so tests can observe the page while
/// the request is pending.
#[derive(Default)]
pub struct FakeTransport {
    requests: Mutex<Vec<RecordedRequest>>,
    replies: Mutex<VecDeque<Scripted>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(self: &Arc<Self>, status: u16, envelope: ResponseEnvelope) -> Arc<Self> {
        self.push(None, None, Ok(TransportResponse::new(status, envelope)));
        Arc::clone(self)
    }

    pub fn fail(self: &Arc<Self>, error: TransportError) -> Arc<Self> {
        self.push(None, None, Err(error));
        Arc::clone(self)
    }

    /// Queue a reply that is held until the returned sender fires.
    pub fn gated_reply(self: &Arc<Self>, status: u16, envelope: ResponseEnvelope) -> oneshot::Sender<()> {
        let (release_tx, release_rx) = oneshot::channel();
        self.push(None, Some(release_rx), Ok(TransportResponse::new(status, envelope)));
        release_tx
    }

    /// Like [`FakeTransport::gated_reply`], but only for requests to `path`.
    pub fn gated_reply_for(self: &Arc<Self>, path: &str, status: u16, envelope: ResponseEnvelope) -> oneshot::Sender<()> {
        let (release_tx, release_rx) = oneshot::channel();
        self.push(Some(path.to_string()), Some(release_rx), Ok(TransportResponse::new(status, envelope)));
        release_tx
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    fn push(&self, path: Option<String>, gate: Option<oneshot::Receiver<()>>, reply: Reply) {
        self.replies.lock().expect("replies lock").push_back(Scripted { path, gate, reply });
    }
}

#[async_trait]
impl WorkflowTransport for FakeTransport {
    async fn post_json(&self, path: &str, payload: &Payload) -> Result<TransportResponse, TransportError> {
        self.requests.lock().expect("requests lock").push(RecordedRequest {
            path: path.to_string(),
            body: payload.to_json(),
        });
        let next = {
            let mut replies = self.replies.lock().expect("replies lock");
            let position = replies
                .iter()
                .position(|scripted| scripted.path.as_deref().is_none_or(|expected| expected == path));
            position.and_then(|index| replies.remove(index))
        };
        let scripted = next.expect("fake transport has no scripted reply left");
        if let Some(gate) = scripted.gate {
            let _ = gate.await;
        }
        scripted.reply
    }
}

pub const SINGLE_PAGE: &str = r#"
elements:
  - tag: form
    id: workflowForm
    children:
      - { tag: input, id: name, name: name }
      - { tag: button, id: submitBtn, text: Run Workflow }
  - { tag: div, id: loading, class: loading }
  - { tag: div, id: result, class: result, display: none }
"#;

pub const CARDS_PAGE: &str = r#"
elements:
  - tag: div
    class: workflow-card
    children:
      - { tag: h3, class: workflow-name, text: Greeting }
      - tag: form
        class: workflow-form
        attributes: { data-workflow-id: abc123 }
        children:
          - { tag: input, name: foo, value: bar }
          - { tag: input, name: baz, value: "" }
          - { tag: button, class: run-workflow-btn, text: Run }
      - { tag: div, class: loading }
      - { tag: div, id: result-abc123, class: result }
  - tag: div
    class: workflow-card
    children:
      - { tag: h3, class: workflow-name, text: Report }
      - tag: form
        class: workflow-form
        attributes: { data-workflow-id: report }
        children:
          - { tag: input, name: period, value: "  weekly  " }
          - { tag: button, class: run-workflow-btn, text: Generate }
      - { tag: div, id: result-report, class: result }
"#;

pub fn page(markup: &str) -> SharedDocument {
    shared(PageMarkup::from_yaml_str(markup).expect("valid markup").to_document())
}

/// Snapshot the element with `id`.
pub fn element(document: &SharedDocument, id: &str) -> formrun_handler::Element {
    let page = document.lock().expect("document lock");
    let node = page.get_element_by_id(id).expect("element on page");
    page.get(node).cloned().expect("element data")
}

pub fn text(document: &SharedDocument, id: &str) -> String {
    let page = document.lock().expect("document lock");
    let node = page.get_element_by_id(id).expect("element on page");
    page.text_content(node)
}

pub fn with_page<R>(document: &SharedDocument, f: impl FnOnce(&mut Document) -> R) -> R {
    let mut page = document.lock().expect("document lock");
    f(&mut page)
}
