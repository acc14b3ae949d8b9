//! In-memory host page.
//!
//! The handler reads and writes the page only through [`Document`]: element
//! lookup by id or class, form field values, the disabled flag, labels,
//! class lists, inline `display`, and inner HTML. Elements live in an arena
//! and are addressed by [`NodeId`]; queries walk the tree in document order.

use indexmap::{IndexMap, IndexSet};

/// Handle to an element of one [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Tags whose `name`/`value` are submitted with a form.
const FIELD_TAGS: &[&str] = &["input", "textarea", "select"];
/// `input` types that never carry a submitted value.
const NON_VALUE_INPUT_TYPES: &[&str] = &["submit", "button", "reset", "image", "file"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: IndexSet<String>,
    pub attributes: IndexMap<String, String>,
    pub name: Option<String>,
    pub value: String,
    /// Plain text content (labels, headings, button captions).
    pub text: String,
    /// Markup written by the handler; replaces [`Element::text`] when non-empty.
    pub inner_html: String,
    pub disabled: bool,
    /// Inline `style.display`; `None` means not set.
    pub display: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        let tag: String = tag.into();
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add every whitespace-separated class in `classes`.
    pub fn with_class(mut self, classes: &str) -> Self {
        self.classes.extend(classes.split_whitespace().map(str::to_string));
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.shift_remove(class);
    }

    /// Space-joined class list, like `element.className`.
    pub fn class_name(&self) -> String {
        self.classes.iter().map(String::as_str).collect::<Vec<_>>().join(" ")
    }

    /// Replace the whole class list, like assigning `element.className`.
    pub fn set_class_name(&mut self, class_name: &str) {
        self.classes = class_name.split_whitespace().map(str::to_string).collect();
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Whether the element is hidden by its own inline style.
    pub fn is_hidden(&self) -> bool {
        self.display.as_deref() == Some("none")
    }

    fn is_submittable_field(&self) -> bool {
        if self.disabled || self.name.as_deref().is_none_or(str::is_empty) {
            return false;
        }
        if !FIELD_TAGS.contains(&self.tag.as_str()) {
            return false;
        }
        if self.tag != "input" {
            return true;
        }
        let input_type = self.attribute("type").unwrap_or("text").to_ascii_lowercase();
        match input_type.as_str() {
            kind if NON_VALUE_INPUT_TYPES.contains(&kind) => false,
            "checkbox" | "radio" => self.attributes.contains_key("checked"),
            _ => true,
        }
    }
}

/// A page: a tree of [`Element`]s under a `body` root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Element>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Element::new("body")],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append `element` as the last child of `parent`.
    ///
    /// An unknown `parent` attaches the element to the root.
    pub fn append(&mut self, parent: NodeId, mut element: Element) -> NodeId {
        let parent = if parent.0 < self.nodes.len() { parent } else { self.root() };
        let node = NodeId(self.nodes.len());
        element.parent = Some(parent);
        element.children.clear();
        self.nodes.push(element);
        self.nodes[parent.0].children.push(node);
        node
    }

    pub fn get(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0)
    }

    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(node.0)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).and_then(|element| element.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.get(node).map(|element| element.children.as_slice()).unwrap_or(&[])
    }

    /// Descendants of `node` in document order, excluding `node` itself.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut ordered = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            ordered.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        ordered
    }

    /// First element in document order whose id is `id`.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        std::iter::once(self.root())
            .chain(self.descendants(self.root()))
            .find(|node| self.get(*node).and_then(|element| element.id.as_deref()) == Some(id))
    }

    /// Every element carrying `class`, in document order.
    pub fn query_class(&self, class: &str) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|node| self.get(*node).is_some_and(|element| element.has_class(class)))
            .collect()
    }

    /// First descendant of `node` carrying `class`.
    pub fn find_descendant_by_class(&self, node: NodeId, class: &str) -> Option<NodeId> {
        self.descendants(node)
            .into_iter()
            .find(|candidate| self.get(*candidate).is_some_and(|element| element.has_class(class)))
    }

    /// `node` or its nearest ancestor carrying `class`.
    pub fn closest_by_class(&self, node: NodeId, class: &str) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if self.get(candidate)?.has_class(class) {
                return Some(candidate);
            }
            current = self.parent(candidate);
        }
        None
    }

    /// `(name, value)` of every submittable field inside `form`, in document order.
    ///
    /// Values are raw; trimming and blank filtering belong to the payload.
    pub fn form_fields(&self, form: NodeId) -> Vec<(String, String)> {
        self.descendants(form)
            .into_iter()
            .filter_map(|node| self.get(node))
            .filter(|element| element.is_submittable_field())
            .filter_map(|element| Some((element.name.clone()?, element.value.clone())))
            .collect()
    }

    /// Set the value of the element with `id`. Returns `false` when absent.
    pub fn set_value_by_id(&mut self, id: &str, value: impl Into<String>) -> bool {
        match self.get_element_by_id(id).and_then(|node| self.get_mut(node)) {
            Some(element) => {
                element.value = value.into();
                true
            }
            None => false,
        }
    }

    /// The text a user reads inside `node`: markup stripped, entities
    /// decoded, whitespace collapsed.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut raw = String::new();
        self.collect_text(node, &mut raw);
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        let Some(element) = self.get(node) else {
            return;
        };
        if !element.inner_html.is_empty() {
            out.push_str(&strip_markup(&element.inner_html));
            out.push(' ');
            return;
        }
        out.push_str(&element.text);
        out.push(' ');
        for child in &element.children {
            self.collect_text(*child, out);
        }
    }
}

/// Drop tags (a `<br>` becomes a space) and decode entities.
fn strip_markup(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                text.push(' ');
            }
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    html_escape::decode_html_entities(&text).into_owned()
}
