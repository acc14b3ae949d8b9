//! Per-form UI state and classified submission outcomes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Visible state of one form instance.
///
/// Transitions are `Idle -> Submitting -> DisplayingSuccess | DisplayingError`,
/// and a displaying state may move back to `Submitting` on the next submit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UiState {
    #[default]
    Idle,
    Submitting,
    DisplayingSuccess,
    DisplayingError,
}

impl UiState {
    /// Whether a request started from this state is still pending.
    pub fn is_submitting(self) -> bool {
        matches!(self, Self::Submitting)
    }
}

impl fmt::Display for UiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::DisplayingSuccess => "displaying-success",
            Self::DisplayingError => "displaying-error",
        };
        f.write_str(label)
    }
}

/// How a single submission settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// 2xx response.
    Success { result: String, workflow_id: Option<String> },
    /// Non-2xx response; `message` is the envelope's `error` or the fallback.
    ServerError { status: u16, message: String },
    /// No usable response: the request failed or the body was not JSON.
    Failure { message: String },
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The state a form settles into after this outcome is rendered.
    pub fn ui_state(&self) -> UiState {
        if self.is_success() {
            UiState::DisplayingSuccess
        } else {
            UiState::DisplayingError
        }
    }
}
