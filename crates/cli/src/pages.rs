//! Built-in pages for the `run-test` and `run` commands.
//!
//! Both commands drive the same handlers a browser page would, so they build
//! the matching markup and go through the normal bind-and-submit path.

use formrun_handler::{Document, Element, single, workflow};

pub fn single_form_page(name: &str) -> Document {
    let mut document = Document::new();
    let root = document.root();
    let form = document.append(root, Element::new("form").with_id(single::FORM_ID));
    document.append(
        form,
        Element::new("input")
            .with_id(single::NAME_INPUT_ID)
            .with_name(formrun_types::NAME_FIELD)
            .with_value(name),
    );
    document.append(
        form,
        Element::new("button")
            .with_id(single::SUBMIT_BUTTON_ID)
            .with_attribute("type", "submit")
            .with_text("Run Workflow"),
    );
    document.append(root, Element::new("div").with_id(single::LOADING_ID).with_class("loading"));
    document.append(root, Element::new("div").with_id(single::RESULT_ID).with_class("result"));
    document
}

pub fn workflow_card_page(workflow_id: &str, title: Option<&str>, fields: &[(String, String)]) -> Document {
    let mut document = Document::new();
    let root = document.root();
    let card = document.append(root, Element::new("div").with_class(workflow::CARD_CLASS));
    if let Some(title) = title {
        document.append(card, Element::new("h3").with_class(workflow::NAME_CLASS).with_text(title));
    }
    let form = document.append(
        card,
        Element::new("form")
            .with_class(workflow::FORM_CLASS)
            .with_attribute(workflow::WORKFLOW_ID_ATTRIBUTE, workflow_id),
    );
    for (name, value) in fields {
        document.append(form, Element::new("input").with_name(name.as_str()).with_value(value.as_str()));
    }
    document.append(
        form,
        Element::new("button")
            .with_class(workflow::SUBMIT_BUTTON_CLASS)
            .with_attribute("type", "submit")
            .with_text("Run"),
    );
    document.append(card, Element::new("div").with_class(workflow::LOADING_CLASS));
    document.append(
        card,
        Element::new("div")
            .with_id(format!("{}{workflow_id}", workflow::RESULT_ID_PREFIX))
            .with_class("result"),
    );
    document
}
