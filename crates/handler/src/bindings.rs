//! Page-ready registration of submit listeners.

use std::sync::Arc;

use formrun_api::WorkflowTransport;
use formrun_types::SubmitOutcome;
use tracing::debug;

use crate::dom::NodeId;
use crate::single::SingleFormHandler;
use crate::submission::{SharedDocument, SubmitEvent, SubmitHandler, lock};
use crate::workflow::{FORM_CLASS, WORKFLOW_ID_ATTRIBUTE, WorkflowFormHandler};

/// Result of delivering one submit event to a form.
#[derive(Debug)]
pub struct SubmitDispatch {
    pub event: SubmitEvent,
    /// One outcome per listener bound to the form, in registration order.
    pub outcomes: Vec<SubmitOutcome>,
}

impl SubmitDispatch {
    /// The outcome of the last listener, which owns what the page shows.
    pub fn last_outcome(&self) -> Option<&SubmitOutcome> {
        self.outcomes.last()
    }
}

/// Every listener registered on a page.
#[derive(Default)]
pub struct Bindings {
    handlers: Vec<Arc<dyn SubmitHandler>>,
}

impl Bindings {
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn handlers(&self) -> &[Arc<dyn SubmitHandler>] {
        &self.handlers
    }

    /// Listeners bound to `form`, in registration order.
    pub fn handlers_for(&self, form: NodeId) -> Vec<Arc<dyn SubmitHandler>> {
        self.handlers
            .iter()
            .filter(|handler| handler.form() == form)
            .cloned()
            .collect()
    }

    /// Deliver a submit event to `form`, awaiting each listener in turn.
    ///
    /// Each listener runs to completion before the next starts, so a second
    /// listener captures fields and updates controls only after the first
    /// request has settled. A browser instead runs every listener's capture
    /// and pre-request update before any of them awaits.
    ///
    /// A form with no listener keeps its native behavior: the returned event
    /// is not default-prevented and no request is made.
    pub async fn submit(&self, form: NodeId) -> SubmitDispatch {
        let mut event = SubmitEvent::new();
        let mut outcomes = Vec::new();
        for handler in self.handlers_for(form) {
            outcomes.push(handler.handle_submit(&mut event).await);
        }
        if outcomes.is_empty() {
            debug!(?form, "submit on form without listeners");
        }
        SubmitDispatch { event, outcomes }
    }
}

/// Bind both handler variants to `document`.
///
/// Forms missing required elements are skipped silently; a page without any
/// matching form yields empty [`Bindings`].
pub fn bind_page(document: &SharedDocument, transport: Arc<dyn WorkflowTransport>) -> Bindings {
    let mut handlers: Vec<Arc<dyn SubmitHandler>> = Vec::new();
    if let Some(handler) = SingleFormHandler::bind(document, Arc::clone(&transport)) {
        handlers.push(Arc::new(handler));
    }
    for handler in WorkflowFormHandler::bind_all(document, transport) {
        handlers.push(Arc::new(handler));
    }
    debug!(listeners = handlers.len(), "page bindings registered");
    Bindings { handlers }
}

/// Find a form by element id, falling back to a workflow card's `data-workflow-id`.
pub fn find_form(document: &SharedDocument, key: &str) -> Option<NodeId> {
    let page = lock(document);
    page.get_element_by_id(key).or_else(|| {
        page.query_class(FORM_CLASS).into_iter().find(|form| {
            page.get(*form)
                .and_then(|element| element.attribute(WORKFLOW_ID_ATTRIBUTE))
                .is_some_and(|id| id.trim() == key)
        })
    })
}
