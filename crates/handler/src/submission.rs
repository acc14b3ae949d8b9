//! The submit cycle shared by both handler variants.
//!
//! A submission runs capture, pre-request UI, dispatch, classification, and
//! the post-request UI update. Only the dispatch awaits; every document
//! access takes the lock briefly and never across an `.await`.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use formrun_api::WorkflowTransport;
use formrun_types::{FormVariant, Payload, SubmitOutcome, UiState};
use tracing::debug;

use crate::dom::{Document, NodeId};
use crate::render::{RESULT_CLASS, ResultPanel};

/// A page shared between its bound handlers.
pub type SharedDocument = Arc<Mutex<Document>>;

/// Label shown on the submit control while a request is pending.
pub const SUBMITTING_LABEL: &str = "⏳ Running...";
/// Class toggled on the loading indicator.
pub const LOADING_SHOW_CLASS: &str = "show";

pub fn shared(document: Document) -> SharedDocument {
    Arc::new(Mutex::new(document))
}

pub(crate) fn lock(document: &SharedDocument) -> MutexGuard<'_, Document> {
    document.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// The submit event delivered to a form's listeners.
#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the browser's native navigation for this submit.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// A listener bound to one form.
#[async_trait]
pub trait SubmitHandler: Send + Sync {
    fn form(&self) -> NodeId;

    fn variant(&self) -> &FormVariant;

    fn ui_state(&self) -> UiState;

    /// Handle one submit: prevent the native action, then run the full cycle.
    async fn handle_submit(&self, event: &mut SubmitEvent) -> SubmitOutcome;
}

/// Elements a handler drives, resolved once at bind time.
#[derive(Debug, Clone)]
pub(crate) struct FormControls {
    pub form: NodeId,
    pub submit: NodeId,
    pub loading: Option<NodeId>,
    pub result: NodeId,
    /// Submit label captured at bind time and restored after every request.
    pub original_label: String,
}

impl FormControls {
    pub fn new(document: &Document, form: NodeId, submit: NodeId, loading: Option<NodeId>, result: NodeId) -> Self {
        let original_label = document.get(submit).map(|element| element.text.clone()).unwrap_or_default();
        Self {
            form,
            submit,
            loading,
            result,
            original_label,
        }
    }
}

/// Per-form state and collaborators for running submissions.
pub(crate) struct SubmissionCycle {
    pub document: SharedDocument,
    pub controls: FormControls,
    pub variant: FormVariant,
    pub transport: Arc<dyn WorkflowTransport>,
    state: Mutex<UiState>,
}

impl SubmissionCycle {
    pub fn new(
        document: SharedDocument,
        controls: FormControls,
        variant: FormVariant,
        transport: Arc<dyn WorkflowTransport>,
    ) -> Self {
        Self {
            document,
            controls,
            variant,
            transport,
            state: Mutex::new(UiState::Idle),
        }
    }

    pub fn ui_state(&self) -> UiState {
        *self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn set_state(&self, state: UiState) {
        *self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = state;
    }

    /// Run steps 2-5 for an already captured payload.
    ///
    /// A second call while one is pending is not rejected; whichever request
    /// settles last owns the result panel.
    pub async fn run(&self, payload: Payload, workflow_name: Option<String>) -> SubmitOutcome {
        self.begin();

        let path = self.variant.endpoint_path();
        debug!(
            %path,
            workflow_id = self.variant.workflow_id().unwrap_or_default(),
            fields = payload.len(),
            "dispatching form submission"
        );
        let outcome = classify(self.transport.post_json(&path, &payload).await);

        self.settle(&outcome, workflow_name.as_deref());
        debug!(%path, state = %self.ui_state(), "form submission settled");
        outcome
    }

    fn begin(&self) {
        {
            let mut document = lock(&self.document);
            if let Some(submit) = document.get_mut(self.controls.submit) {
                submit.disabled = true;
                submit.text = SUBMITTING_LABEL.to_string();
            }
            if let Some(loading) = self.controls.loading.and_then(|node| document.get_mut(node)) {
                loading.add_class(LOADING_SHOW_CLASS);
            }
            if let Some(result) = document.get_mut(self.controls.result) {
                result.set_class_name(RESULT_CLASS);
                result.inner_html.clear();
                result.display = Some("none".to_string());
            }
        }
        self.set_state(UiState::Submitting);
    }

    fn settle(&self, outcome: &SubmitOutcome, workflow_name: Option<&str>) {
        let panel = ResultPanel::from_outcome(outcome, workflow_name);
        {
            let mut document = lock(&self.document);
            if let Some(submit) = document.get_mut(self.controls.submit) {
                submit.disabled = false;
                submit.text = self.controls.original_label.clone();
            }
            if let Some(loading) = self.controls.loading.and_then(|node| document.get_mut(node)) {
                loading.remove_class(LOADING_SHOW_CLASS);
            }
            if let Some(result) = document.get_mut(self.controls.result) {
                result.set_class_name(&panel.class_name());
                result.inner_html = panel.to_html();
                result.display = Some("block".to_string());
            }
        }
        self.set_state(outcome.ui_state());
    }
}

/// Sort a transport result into the three outcome branches.
pub(crate) fn classify(
    response: Result<formrun_api::TransportResponse, formrun_api::TransportError>,
) -> SubmitOutcome {
    match response {
        Ok(response) if response.is_success() => SubmitOutcome::Success {
            result: response.envelope.result_text(),
            workflow_id: response.envelope.workflow_id,
        },
        Ok(response) => SubmitOutcome::ServerError {
            status: response.status,
            message: response.envelope.error_text(),
        },
        Err(error) => SubmitOutcome::Failure {
            message: error.to_string(),
        },
    }
}
