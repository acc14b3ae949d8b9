//! Result panel rendering.
//!
//! Every string that came from the network or the page is escaped with
//! `html-escape` before it is placed in markup.

use formrun_types::SubmitOutcome;
use html_escape::encode_text;

pub const RESULT_CLASS: &str = "result";
pub const SUCCESS_CLASS: &str = "success";
pub const ERROR_CLASS: &str = "error";

pub const SUCCESS_HEADING: &str = "✅ Success!";
pub const ERROR_HEADING: &str = "❌ Error:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPanel {
    pub kind: PanelKind,
    pub heading: String,
    pub message: String,
    /// Workflow identifier echoed by the service, if any.
    pub workflow_id: Option<String>,
}

impl ResultPanel {
    /// Build the panel for `outcome`.
    ///
    /// `workflow_name` customizes the success heading for workflow cards.
    pub fn from_outcome(outcome: &SubmitOutcome, workflow_name: Option<&str>) -> Self {
        match outcome {
            SubmitOutcome::Success { result, workflow_id } => Self {
                kind: PanelKind::Success,
                heading: success_heading(workflow_name),
                message: result.clone(),
                workflow_id: workflow_id.clone().filter(|id| !id.is_empty()),
            },
            SubmitOutcome::ServerError { message, .. } | SubmitOutcome::Failure { message } => Self {
                kind: PanelKind::Error,
                heading: ERROR_HEADING.to_string(),
                message: message.clone(),
                workflow_id: None,
            },
        }
    }

    /// Class list for the result container, e.g. `result success`.
    pub fn class_name(&self) -> String {
        let modifier = match self.kind {
            PanelKind::Success => SUCCESS_CLASS,
            PanelKind::Error => ERROR_CLASS,
        };
        format!("{RESULT_CLASS} {modifier}")
    }

    pub fn to_html(&self) -> String {
        let mut html = format!(
            "<strong>{}</strong><br>{}",
            encode_text(&self.heading),
            encode_text(&self.message)
        );
        if let Some(workflow_id) = &self.workflow_id {
            html.push_str(&format!(
                "<br><small class=\"workflow-id\">Workflow ID: {}</small>",
                encode_text(workflow_id)
            ));
        }
        html
    }
}

fn success_heading(workflow_name: Option<&str>) -> String {
    match workflow_name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => format!("✅ {name} completed!"),
        None => SUCCESS_HEADING.to_string(),
    }
}
