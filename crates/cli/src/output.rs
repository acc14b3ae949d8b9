use clap::ValueEnum;
use formrun_handler::{NodeId, SharedDocument};
use formrun_types::{SubmitOutcome, UiState};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Result panel markup.
    #[default]
    Html,
    /// What a reader sees in the panel.
    Text,
    /// Panel, state, and outcome as JSON.
    Json,
}

/// What a submission left on the page.
#[derive(Debug, Clone, Serialize)]
pub struct PanelReport {
    pub state: UiState,
    pub class: String,
    pub html: String,
    pub text: String,
    pub outcome: Option<SubmitOutcome>,
}

impl PanelReport {
    pub fn capture(document: &SharedDocument, result: NodeId, state: UiState, outcome: Option<SubmitOutcome>) -> Self {
        let page = document.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let (class, html) = page
            .get(result)
            .map(|element| (element.class_name(), element.inner_html.clone()))
            .unwrap_or_default();
        Self {
            state,
            class,
            html,
            text: page.text_content(result),
            outcome,
        }
    }

    pub fn render(&self, format: OutputFormat) -> anyhow::Result<String> {
        Ok(match format {
            OutputFormat::Html => format!("<!-- {} ({}) -->\n{}", self.state, self.class, self.html),
            OutputFormat::Text => self.text.clone(),
            OutputFormat::Json => serde_json::to_string_pretty(self)?,
        })
    }
}
