//! The two independent handler flavors and their endpoints.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::{Deserialize, Serialize};

/// Endpoint of the single-form variant.
pub const RUN_TEST_PATH: &str = "/api/run-test";

/// Characters escaped when a workflow id is placed in a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum FormVariant {
    /// `#workflowForm`, posting `{ "name": ... }` to `/api/run-test`.
    Single,
    /// A `.workflow-form` card posting its fields to the workflow's run endpoint.
    Workflow { workflow_id: String },
}

impl FormVariant {
    /// API-relative path the form posts to.
    ///
    /// # Example
    /// ```rust
    /// use formrun_types::FormVariant;
    ///
    /// assert_eq!(FormVariant::Single.endpoint_path(), "/api/run-test");
    /// let workflow = FormVariant::Workflow { workflow_id: "abc123".into() };
    /// assert_eq!(workflow.endpoint_path(), "/api/workflows/abc123/run");
    /// ```
    pub fn endpoint_path(&self) -> String {
        match self {
            Self::Single => RUN_TEST_PATH.to_string(),
            Self::Workflow { workflow_id } => {
                format!("/api/workflows/{}/run", utf8_percent_encode(workflow_id, PATH_SEGMENT))
            }
        }
    }

    pub fn workflow_id(&self) -> Option<&str> {
        match self {
            Self::Single => None,
            Self::Workflow { workflow_id } => Some(workflow_id),
        }
    }
}
