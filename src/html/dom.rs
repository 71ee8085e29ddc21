use std::fmt;

use crate::i18n::{Document, TRANSLATION_ATTRIBUTE};

const VOID_TAGS: [&str; 6] = ["br", "hr", "img", "input", "link", "meta"];

/// Handle to an element of a [`StaticDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Child {
    /// Escaped on output.
    Text(String),
    /// Written verbatim.
    Markup(String),
    Element(NodeId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Child>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_owned(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        if let Some((_, existing)) = self.attributes.iter_mut().find(|(key, _)| key == name) {
            value.clone_into(existing);
            return;
        }
        self.attributes.push((name.to_owned(), value.to_owned()));
    }

    fn remove_attribute(&mut self, name: &str) {
        self.attributes.retain(|(key, _)| key != name);
    }
}

/// In-memory HTML tree the report page is assembled in.
///
/// Elements live in an arena and are addressed by [`NodeId`]; the tree is
/// rooted at `<html>` with a `<head>` and a `<body>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticDocument {
    nodes: Vec<Element>,
    head: NodeId,
    body: NodeId,
}

impl Default for StaticDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticDocument {
    #[must_use]
    pub fn new() -> Self {
        let mut root = Element::new("html");
        root.children = vec![Child::Element(NodeId(1)), Child::Element(NodeId(2))];
        Self {
            nodes: vec![root, Element::new("head"), Element::new("body")],
            head: NodeId(1),
            body: NodeId(2),
        }
    }

    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[must_use]
    pub const fn head(&self) -> NodeId {
        self.head
    }

    #[must_use]
    pub const fn body(&self) -> NodeId {
        self.body
    }

    /// Appends a new `tag` element to `parent` and returns a builder for it.
    pub fn append(&mut self, parent: NodeId, tag: &str) -> NodeMut<'_> {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Element::new(tag));
        if let Some(parent) = self.nodes.get_mut(parent.0) {
            parent.children.push(Child::Element(id));
        }
        NodeMut { document: self, id }
    }

    /// Builder for an existing element.
    pub const fn node(&mut self, id: NodeId) -> NodeMut<'_> {
        NodeMut { document: self, id }
    }

    /// Concatenated text and markup of the element's subtree.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(element) = self.nodes.get(id.0) else {
            return;
        };
        for child in &element.children {
            match child {
                Child::Text(text) | Child::Markup(text) => out.push_str(text),
                Child::Element(nested) => self.collect_text(*nested, out),
            }
        }
    }

    #[must_use]
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.nodes
            .get(id.0)
            .and_then(|element| element.attribute("class"))
            .is_some_and(|classes| classes.split_whitespace().any(|name| name == class))
    }

    fn preorder(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        let Some(element) = self.nodes.get(id.0) else {
            return;
        };
        for child in &element.children {
            if let Child::Element(nested) = child {
                self.preorder(*nested, out);
            }
        }
    }

    fn write_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId) -> fmt::Result {
        let Some(element) = self.nodes.get(id.0) else {
            return Ok(());
        };
        write!(f, "<{}", element.tag)?;
        for (name, value) in &element.attributes {
            write!(f, " {}=\"{}\"", name, escape_attribute(value))?;
        }
        f.write_str(">")?;
        if VOID_TAGS.contains(&element.tag.as_str()) {
            return Ok(());
        }
        for child in &element.children {
            match child {
                Child::Text(text) => f.write_str(&escape_text(text))?,
                Child::Markup(markup) => f.write_str(markup)?,
                Child::Element(nested) => self.write_node(f, *nested)?,
            }
        }
        write!(f, "</{}>", element.tag)
    }
}

impl fmt::Display for StaticDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<!DOCTYPE html>\n")?;
        self.write_node(f, self.root())?;
        f.write_str("\n")
    }
}

impl Document for StaticDocument {
    type Element = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.elements_with_attribute("id")
            .into_iter()
            .find(|node| self.attribute(*node, "id") == Some(id))
    }

    fn elements_with_attribute(&self, name: &str) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        self.preorder(self.root(), &mut order);
        order.retain(|node| self.attribute(*node, name).is_some());
        order
    }

    fn attribute(&self, element: NodeId, name: &str) -> Option<&str> {
        self.nodes
            .get(element.0)
            .and_then(|element| element.attribute(name))
    }

    fn tag_name(&self, element: NodeId) -> &str {
        self.nodes
            .get(element.0)
            .map_or("", |element| element.tag.as_str())
    }

    fn set_text(&mut self, element: NodeId, text: &str) {
        if let Some(element) = self.nodes.get_mut(element.0) {
            element.children = vec![Child::Text(text.to_owned())];
        }
    }

    fn set_markup(&mut self, element: NodeId, markup: &str) {
        if let Some(element) = self.nodes.get_mut(element.0) {
            element.children = vec![Child::Markup(markup.to_owned())];
        }
    }

    fn toggle_class(&mut self, element: NodeId, class: &str, enabled: bool) {
        let Some(element) = self.nodes.get_mut(element.0) else {
            return;
        };
        let mut classes: Vec<&str> = element
            .attribute("class")
            .map(|value| value.split_whitespace().collect())
            .unwrap_or_default();
        classes.retain(|name| *name != class);
        if enabled {
            classes.push(class);
        }
        let joined = classes.join(" ");
        if joined.is_empty() {
            element.remove_attribute("class");
        } else {
            element.set_attribute("class", &joined);
        }
    }

    fn set_document_title(&mut self, title: &str) {
        let head = self.head;
        let existing = self.nodes.get(head.0).and_then(|element| {
            element.children.iter().find_map(|child| match child {
                Child::Element(id) if self.tag_name(*id) == "title" => Some(*id),
                Child::Element(_) | Child::Text(_) | Child::Markup(_) => None,
            })
        });
        let id = existing.unwrap_or_else(|| self.append(head, "title").id());
        self.set_text(id, title);
    }
}

/// Fluent access to one element while the page is assembled.
#[derive(Debug)]
pub struct NodeMut<'doc> {
    document: &'doc mut StaticDocument,
    id: NodeId,
}

impl NodeMut<'_> {
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    pub fn attr(&mut self, name: &str, value: &str) -> &mut Self {
        if let Some(element) = self.document.nodes.get_mut(self.id.0) {
            element.set_attribute(name, value);
        }
        self
    }

    pub fn class(&mut self, class: &str) -> &mut Self {
        self.document.toggle_class(self.id, class, true);
        self
    }

    pub fn text(&mut self, text: &str) -> &mut Self {
        self.push(Child::Text(text.to_owned()))
    }

    /// Appends trusted markup, written out verbatim.
    pub fn markup(&mut self, markup: &str) -> &mut Self {
        self.push(Child::Markup(markup.to_owned()))
    }

    /// Tags the element with a translation key and authors its fallback
    /// text. The switcher replaces the fallback on every language change.
    pub fn i18n(&mut self, key: &str, fallback: &str) -> &mut Self {
        self.attr(TRANSLATION_ATTRIBUTE, key).text(fallback)
    }

    fn push(&mut self, child: Child) -> &mut Self {
        if let Some(element) = self.document.nodes.get_mut(self.id.0) {
            element.children.push(child);
        }
        self
    }
}

fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}

fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
