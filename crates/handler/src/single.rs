//! Handler for the single test form (`#workflowForm`).

use std::sync::Arc;

use async_trait::async_trait;
use formrun_api::WorkflowTransport;
use formrun_types::{FormVariant, Payload, SubmitOutcome, UiState};
use tracing::debug;

use crate::dom::NodeId;
use crate::submission::{FormControls, SharedDocument, SubmissionCycle, SubmitEvent, SubmitHandler, lock};

pub const FORM_ID: &str = "workflowForm";
pub const NAME_INPUT_ID: &str = "name";
pub const SUBMIT_BUTTON_ID: &str = "submitBtn";
pub const LOADING_ID: &str = "loading";
pub const RESULT_ID: &str = "result";

/// Posts `{ "name": ... }` to `/api/run-test`.
pub struct SingleFormHandler {
    cycle: SubmissionCycle,
    name_input: NodeId,
}

impl SingleFormHandler {
    /// Bind to the page's `#workflowForm`.
    ///
    /// Returns `None` when the form, `#name`, `#submitBtn`, or `#result` is
    /// missing. `#loading` is optional.
    pub fn bind(document: &SharedDocument, transport: Arc<dyn WorkflowTransport>) -> Option<Self> {
        let (controls, name_input) = {
            let page = lock(document);
            let Some(form) = page.get_element_by_id(FORM_ID) else {
                debug!("no #{FORM_ID} on page; single-form handler not bound");
                return None;
            };
            let (Some(name_input), Some(submit), Some(result)) = (
                page.get_element_by_id(NAME_INPUT_ID),
                page.get_element_by_id(SUBMIT_BUTTON_ID),
                page.get_element_by_id(RESULT_ID),
            ) else {
                debug!("#{FORM_ID} is missing #{NAME_INPUT_ID}, #{SUBMIT_BUTTON_ID}, or #{RESULT_ID}; not bound");
                return None;
            };
            let loading = page.get_element_by_id(LOADING_ID);
            (FormControls::new(&page, form, submit, loading, result), name_input)
        };

        Some(Self {
            cycle: SubmissionCycle::new(document.clone(), controls, FormVariant::Single, transport),
            name_input,
        })
    }

    fn capture(&self) -> Payload {
        let page = lock(&self.cycle.document);
        let raw = page.get(self.name_input).map(|element| element.value.as_str()).unwrap_or_default();
        Payload::single_name(raw)
    }
}

#[async_trait]
impl SubmitHandler for SingleFormHandler {
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
        let payload = self.capture();
        self.cycle.run(payload, None).await
    }
}
