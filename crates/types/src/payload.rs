//! Request payloads built from form fields at submit time.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Field read by the single-form variant.
pub const NAME_FIELD: &str = "name";

/// Value sent for [`NAME_FIELD`] when the user leaves it blank.
pub const DEFAULT_NAME: &str = "World";

/// Mapping from field name to trimmed string value.
///
/// Serializes as a flat JSON object in insertion order, which is the body
/// posted to the workflow service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload {
    fields: IndexMap<String, String>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a payload from raw `(name, value)` pairs.
    ///
    /// Values are trimmed; pairs whose value is empty after trimming are
    /// skipped. A repeated name keeps its first position and last value.
    ///
    /// # Example
    /// ```rust
    /// use formrun_types::Payload;
    ///
    /// let payload = Payload::from_fields([("foo", " bar "), ("baz", "   ")]);
    /// assert_eq!(payload.get("foo"), Some("bar"));
    /// assert!(payload.get("baz").is_none());
    /// ```
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut payload = Self::new();
        for (name, value) in fields {
            let trimmed = value.as_ref().trim();
            if trimmed.is_empty() {
                continue;
            }
            payload.fields.insert(name.into(), trimmed.to_string());
        }
        payload
    }

    /// Payload for the single-form variant: `{ "name": <trimmed or "World"> }`.
    pub fn single_name(raw: &str) -> Self {
        let trimmed = raw.trim();
        let name = if trimmed.is_empty() { DEFAULT_NAME } else { trimmed };
        let mut payload = Self::new();
        payload.fields.insert(NAME_FIELD.to_string(), name.to_string());
        payload
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Serialize to the JSON body text.
    pub fn to_json(&self) -> String {
        // A map of strings always serializes.
        serde_json::to_string(&self.fields).unwrap_or_else(|_| "{}".to_string())
    }
}
