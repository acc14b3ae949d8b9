//! The JSON envelope returned by the workflow service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Text shown when a failed response carries no `error` field.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Response body of both endpoints.
///
/// Success bodies carry `result` (and `workflow_id` on the multi-form
/// endpoint); failure bodies may carry `error`. Unknown keys such as the
/// service's `success` flag are ignored. Whether a body is a success is
/// decided by the HTTP status, never by which keys are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResponseEnvelope {
    pub fn success(result: impl Into<String>) -> Self {
        Self {
            result: Some(Value::String(result.into())),
            ..Self::default()
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn with_workflow_id(mut self, workflow_id: impl Into<String>) -> Self {
        self.workflow_id = Some(workflow_id.into());
        self
    }

    /// Read an envelope out of any JSON value.
    ///
    /// A body that is not an object yields an empty envelope. A non-string
    /// `error` is dropped, so [`ResponseEnvelope::error_text`] falls back to
    /// [`UNKNOWN_ERROR`]. A numeric or boolean `workflow_id` is kept as its
    /// JSON text; any other non-string id is dropped.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut fields) = value else {
            return Self::default();
        };
        let workflow_id = match fields.remove("workflow_id") {
            Some(Value::String(id)) => Some(id),
            Some(id @ (Value::Number(_) | Value::Bool(_))) => Some(id.to_string()),
            _ => None,
        };
        let error = match fields.remove("error") {
            Some(Value::String(message)) => Some(message),
            _ => None,
        };
        Self {
            result: fields.remove("result"),
            workflow_id,
            error,
        }
    }

    /// Text of the `result` field.
    ///
    /// Strings are returned verbatim, other JSON values as compact JSON, and
    /// a missing or `null` result as an empty string.
    pub fn result_text(&self) -> String {
        match &self.result {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Text of the `error` field, or [`UNKNOWN_ERROR`] when absent or empty.
    pub fn error_text(&self) -> String {
        match self.error.as_deref() {
            Some(message) if !message.is_empty() => message.to_string(),
            _ => UNKNOWN_ERROR.to_string(),
        }
    }
}
