//! Document shell and the element tree it is made of
//!
//! The shell is the outer `<html>` skeleton every rendered page is inserted
//! into. It comes either from the built-in default or from the default export
//! of `_document.js`, which the page runtime hands over as a serialized tree.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{DhowError, DhowResult};

/// Elements serialized without a closing tag
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Id of the element that receives page markup, when present
pub const ENTRY_ID: &str = "dhow";

/// A node in the element tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    Element(Element),
    /// Escaped on output
    Text { value: String },
    /// Already serialized markup, written verbatim
    Raw { value: String },
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text {
            value: value.into(),
        }
    }

    pub fn raw(value: impl Into<String>) -> Self {
        Node::Raw {
            value: value.into(),
        }
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Element(element) => element.write_html(out),
            Node::Text { value } => out.push_str(&escape_text(value)),
            Node::Raw { value } => out.push_str(value),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// An HTML element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.attributes.get("id").map(String::as_str)
    }

    /// First element (self included, depth-first) matching `predicate`
    pub fn find(&self, predicate: &impl Fn(&Element) -> bool) -> Option<&Element> {
        if predicate(self) {
            return Some(self);
        }
        self.children.iter().find_map(|child| match child {
            Node::Element(element) => element.find(predicate),
            _ => None,
        })
    }

    /// Mutable variant of [`Element::find`]
    pub fn find_mut(&mut self, predicate: &impl Fn(&Element) -> bool) -> Option<&mut Element> {
        if predicate(self) {
            return Some(self);
        }
        for child in &mut self.children {
            if let Node::Element(element) = child {
                if let Some(found) = element.find_mut(predicate) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Serialize to an HTML string
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attribute(value));
            out.push('"');
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return;
        }

        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

fn is_entry(element: &Element) -> bool {
    element.id() == Some(ENTRY_ID)
}

fn is_body(element: &Element) -> bool {
    element.tag == "body"
}

fn is_head(element: &Element) -> bool {
    element.tag == "head"
}

/// A validated document shell with a known entry point and head
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentShell {
    root: Element,
    entry_by_id: bool,
}

impl DocumentShell {
    /// Validate `root`: it must contain an entry point (`#dhow` or `<body>`) and a `<head>`
    pub fn new(root: Element) -> DhowResult<Self> {
        let entry_by_id = root.find(&is_entry).is_some();
        if !entry_by_id && root.find(&is_body).is_none() {
            return Err(DhowError::MissingDocumentStructure {
                missing: "entry point",
            });
        }
        if root.find(&is_head).is_none() {
            return Err(DhowError::MissingDocumentStructure { missing: "head" });
        }
        Ok(Self { root, entry_by_id })
    }

    /// `<html lang="en"><head><meta charset="utf-8"></head><body></body></html>`
    pub fn builtin() -> Self {
        let root = Element::new("html")
            .attr("lang", "en")
            .child(Element::new("head").child(Element::new("meta").attr("charset", "utf-8")))
            .child(Element::new("body"));
        Self {
            root,
            entry_by_id: false,
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Insert page markup and head elements into a fresh copy of the shell
    pub fn compose(&self, markup: &str, head: &[String]) -> DhowResult<String> {
        let mut document = self.root.clone();

        let entry = if self.entry_by_id {
            document.find_mut(&is_entry)
        } else {
            document.find_mut(&is_body)
        }
        .ok_or(DhowError::MissingDocumentStructure {
            missing: "entry point",
        })?;
        entry.children = vec![Node::raw(markup)];

        let head_element = document
            .find_mut(&is_head)
            .ok_or(DhowError::MissingDocumentStructure { missing: "head" })?;
        head_element
            .children
            .extend(head.iter().map(|h| Node::raw(h.as_str())));

        Ok(format!("<!DOCTYPE html>{}", document.to_html()))
    }
}
