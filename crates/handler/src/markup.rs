//! Serde description of host page markup.
//!
//! Pages are written as a tree of element nodes in YAML or JSON:
//!
//! ```yaml
//! elements:
//!   - tag: form
//!     id: workflowForm
//!     children:
//!       - { tag: input, id: name, name: name }
//!       - { tag: button, id: submitBtn, text: Run }
//!   - { tag: div, id: loading, class: loading }
//!   - { tag: div, id: result, class: result }
//! ```

use std::{fs, path::Path};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dom::{Document, Element, NodeId};

#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("markup I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("markup YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("markup JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMarkup {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub elements: Vec<ElementMarkup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementMarkup {
    pub tag: String,
    #[serde(default)]
    pub id: Option<String>,
    /// Whitespace-separated class list.
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default)]
    pub children: Vec<ElementMarkup>,
}

impl PageMarkup {
    pub fn from_yaml_str(content: &str) -> Result<Self, MarkupError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self, MarkupError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load markup from a file; `.json` files are read as JSON, anything else as YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MarkupError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    pub fn to_document(&self) -> Document {
        let mut document = Document::new();
        let root = document.root();
        for element in &self.elements {
            append_markup(&mut document, root, element);
        }
        document
    }
}

fn append_markup(document: &mut Document, parent: NodeId, markup: &ElementMarkup) {
    let mut element = Element::new(&markup.tag);
    element.id = markup.id.clone();
    if let Some(class) = &markup.class {
        element = element.with_class(class);
    }
    element.attributes = markup.attributes.clone();
    element.name = markup.name.clone();
    element.value = markup.value.clone().unwrap_or_default();
    element.text = markup.text.clone().unwrap_or_default();
    element.disabled = markup.disabled;
    element.display = markup.display.clone();

    let node = document.append(parent, element);
    for child in &markup.children {
        append_markup(document, node, child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SINGLE_PAGE: &str = r#"
title: Test workflow
elements:
  - tag: form
    id: workflowForm
    children:
      - { tag: input, id: name, name: name, value: Ada }
      - { tag: button, id: submitBtn, text: Run Workflow }
  - { tag: div, id: loading, class: loading }
  - { tag: div, id: result, class: result, display: none }
"#;

    #[test]
    fn yaml_markup_builds_nested_document() {
        let document = PageMarkup::from_yaml_str(SINGLE_PAGE).expect("parse markup").to_document();
        let form = document.get_element_by_id("workflowForm").expect("form");
        let name = document.get_element_by_id("name").expect("name field");
        assert_eq!(document.parent(name), Some(form));
        assert_eq!(document.form_fields(form), vec![("name".to_string(), "Ada".to_string())]);

        let result = document.get_element_by_id("result").and_then(|node| document.get(node)).expect("result");
        assert!(result.is_hidden());
        assert!(result.has_class("result"));
    }

    #[test]
    fn load_detects_json_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().expect("tempfile");
        write!(
            file,
            r#"{{"elements": [{{"tag": "form", "class": "workflow-form", "attributes": {{"data-workflow-id": "abc123"}}}}]}}"#
        )
        .expect("write markup");

        let document = PageMarkup::load(file.path()).expect("load markup").to_document();
        let forms = document.query_class("workflow-form");
        assert_eq!(forms.len(), 1);
        let form = document.get(forms[0]).expect("form element");
        assert_eq!(form.attribute("data-workflow-id"), Some("abc123"));
    }

    #[test]
    fn malformed_yaml_is_reported() {
        let error = PageMarkup::from_yaml_str("elements: [tag: ").expect_err("malformed");
        assert!(matches!(error, MarkupError::Yaml(_)));
    }
}
