//! Handler for workflow cards (`.workflow-form`), one per form.

use std::sync::Arc;

use async_trait::async_trait;
use formrun_api::WorkflowTransport;
use formrun_types::{FormVariant, Payload, SubmitOutcome, UiState};
use tracing::debug;

use crate::dom::{Document, NodeId};
use crate::submission::{FormControls, SharedDocument, SubmissionCycle, SubmitEvent, SubmitHandler, lock};

pub const FORM_CLASS: &str = "workflow-form";
pub const SUBMIT_BUTTON_CLASS: &str = "run-workflow-btn";
pub const CARD_CLASS: &str = "workflow-card";
pub const NAME_CLASS: &str = "workflow-name";
pub const LOADING_CLASS: &str = "loading";
pub const WORKFLOW_ID_ATTRIBUTE: &str = "data-workflow-id";
/// Result containers are `#result-{workflow id}`.
pub const RESULT_ID_PREFIX: &str = "result-";

/// Posts a card's non-blank fields to `/api/workflows/{id}/run`.
pub struct WorkflowFormHandler {
    cycle: SubmissionCycle,
}

impl WorkflowFormHandler {
    /// Bind every `.workflow-form` on the page that has what it needs.
    ///
    /// A form is skipped when it lacks a non-empty `data-workflow-id` (or the
    /// id is `.` or `..`), a `.run-workflow-btn`, or a `#result-{id}`
    /// container. The loading
    /// indicator is the first `.loading` in the form's card (or the form
    /// itself when there is no card) and is optional.
    pub fn bind_all(document: &SharedDocument, transport: Arc<dyn WorkflowTransport>) -> Vec<Self> {
        let bound: Vec<(FormControls, String)> = {
            let page = lock(document);
            page.query_class(FORM_CLASS)
                .into_iter()
                .filter_map(|form| resolve_controls(&page, form))
                .collect()
        };

        bound
            .into_iter()
            .map(|(controls, workflow_id)| Self {
                cycle: SubmissionCycle::new(
                    document.clone(),
                    controls,
                    FormVariant::Workflow { workflow_id },
                    Arc::clone(&transport),
                ),
            })
            .collect()
    }

    fn capture(&self) -> (Payload, Option<String>) {
        let page = lock(&self.cycle.document);
        let form = self.cycle.controls.form;
        let payload = Payload::from_fields(page.form_fields(form));
        let workflow_name = page
            .closest_by_class(form, CARD_CLASS)
            .and_then(|card| page.find_descendant_by_class(card, NAME_CLASS))
            .map(|name| page.text_content(name))
            .filter(|name| !name.is_empty());
        (payload, workflow_name)
    }
}

fn resolve_controls(page: &Document, form: NodeId) -> Option<(FormControls, String)> {
    let workflow_id = page
        .get(form)?
        .attribute(WORKFLOW_ID_ATTRIBUTE)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string);
    let Some(workflow_id) = workflow_id else {
        debug!("workflow form without {WORKFLOW_ID_ATTRIBUTE}; not bound");
        return None;
    };
    // URL normalization would resolve these out of the workflow path.
    if workflow_id == "." || workflow_id == ".." {
        debug!(%workflow_id, "workflow id is a dot segment; not bound");
        return None;
    }

    let Some(submit) = page.find_descendant_by_class(form, SUBMIT_BUTTON_CLASS) else {
        debug!(%workflow_id, "workflow form without .{SUBMIT_BUTTON_CLASS}; not bound");
        return None;
    };
    let Some(result) = page.get_element_by_id(&format!("{RESULT_ID_PREFIX}{workflow_id}")) else {
        debug!(%workflow_id, "no #{RESULT_ID_PREFIX}{workflow_id} container; not bound");
        return None;
    };

    let scope = page.closest_by_class(form, CARD_CLASS).unwrap_or(form);
    let loading = page.find_descendant_by_class(scope, LOADING_CLASS);

    debug!(%workflow_id, has_loading = loading.is_some(), "bound workflow form");
    Some((FormControls::new(page, form, submit, loading, result), workflow_id))
}

#[async_trait]
impl SubmitHandler for WorkflowFormHandler {
    fn form(&self) -> NodeId {
        self.cycle.controls.form
    }

    fn variant(&self) -> &FormVariant {
        &self.cycle.variant
    }

    fn ui_state(&self) -> UiState {
        self.cycle.ui_state()
    }

    async fn handle_submit(&self, event: &mut SubmitEvent) -> SubmitOutcome {
        event.prevent_default();
        let (payload, workflow_name) = self.capture();
        self.cycle.run(payload, workflow_name).await
    }
}
