//! Generic XML tree for OOXML parts.
//!
//! Wraps [`quick-xml`] to turn a part into a tree of [`XmlElement`]s and back.
//! Element and attribute names keep their namespace prefix separately from
//! the local name, so lookups work on local names (`p`, `r`, `t`) while
//! serialization reproduces the original qualified names (`w:p`).

mod error;
mod parser;
mod writer;

pub use error::XmlError;
pub use parser::parse;
pub use writer::{write, write_element};

/// A parsed XML part.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    /// The root element of the part.
    pub root: XmlElement,
}

/// An XML element with its attributes and ordered children.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    /// The local name of the element (without namespace prefix).
    pub name: String,

    /// Namespace prefix, if any (e.g., "w" in `<w:p>`).
    pub prefix: Option<String>,

    /// Attributes in source order.
    pub attributes: Vec<XmlAttribute>,

    /// Child elements and text in source order.
    pub children: Vec<XmlChild>,
}

/// An XML attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlAttribute {
    /// The local name of the attribute (without namespace prefix).
    pub name: String,

    /// Namespace prefix, if any.
    pub prefix: Option<String>,

    /// The attribute value (after unescaping XML entities).
    pub value: String,
}

/// A single child node.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlChild {
    /// A child element.
    Element(XmlElement),

    /// Text content (after unescaping XML entities).
    Text(String),
}

/// Split a qualified name into `(local, prefix)`.
fn split_qualified(qualified: &str) -> (String, Option<String>) {
    match qualified.split_once(':') {
        Some((prefix, local)) => (local.to_string(), Some(prefix.to_string())),
        None => (qualified.to_string(), None),
    }
}

fn join_qualified(prefix: Option<&str>, local: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}:{}", prefix, local),
        None => local.to_string(),
    }
}

impl XmlDocument {
    pub fn new(root: XmlElement) -> Self {
        Self { root }
    }
}

impl XmlElement {
    /// Create an empty element from a qualified name such as `w:p`.
    pub fn new(qualified_name: &str) -> Self {
        let (name, prefix) = split_qualified(qualified_name);
        Self {
            name,
            prefix,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create an empty element sharing `prefix`.
    pub fn with_prefix(prefix: Option<&str>, local_name: &str) -> Self {
        Self {
            name: local_name.to_string(),
            prefix: prefix.map(str::to_string),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// The name as written in the source, including the prefix.
    pub fn qualified_name(&self) -> String {
        join_qualified(self.prefix.as_deref(), &self.name)
    }

    /// Check the local name of this element.
    pub fn is(&self, local_name: &str) -> bool {
        self.name == local_name
    }

    /// Get an attribute value by local name.
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Set an attribute by qualified name, replacing an existing one.
    pub fn set_attribute(&mut self, qualified_name: &str, value: &str) {
        let (name, prefix) = split_qualified(qualified_name);
        if let Some(existing) = self
            .attributes
            .iter_mut()
            .find(|a| a.name == name && a.prefix == prefix)
        {
            existing.value = value.to_string();
        } else {
            self.attributes.push(XmlAttribute {
                name,
                prefix,
                value: value.to_string(),
            });
        }
    }

    /// Builder form of [`XmlElement::set_attribute`].
    pub fn attr(mut self, qualified_name: &str, value: &str) -> Self {
        self.set_attribute(qualified_name, value);
        self
    }

    /// Builder form of [`XmlElement::push_element`].
    pub fn child_element(mut self, element: XmlElement) -> Self {
        self.push_element(element);
        self
    }

    pub fn push_element(&mut self, element: XmlElement) {
        self.children.push(XmlChild::Element(element));
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        self.children.push(XmlChild::Text(text.into()));
    }

    /// Iterate over child elements, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|c| match c {
            XmlChild::Element(e) => Some(e),
            XmlChild::Text(_) => None,
        })
    }

    /// Mutable form of [`XmlElement::elements`].
    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut XmlElement> {
        self.children.iter_mut().filter_map(|c| match c {
            XmlChild::Element(e) => Some(e),
            XmlChild::Text(_) => None,
        })
    }

    /// First child element with the given local name.
    pub fn child(&self, local_name: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.is(local_name))
    }

    /// Mutable form of [`XmlElement::child`].
    pub fn child_mut(&mut self, local_name: &str) -> Option<&mut XmlElement> {
        self.elements_mut().find(|e| e.is(local_name))
    }

    /// All child elements with the given local name.
    pub fn children_named<'a>(
        &'a self,
        local_name: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.elements().filter(move |e| e.is(local_name))
    }

    /// Concatenated direct text children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|c| match c {
                XmlChild::Text(t) => Some(t.as_str()),
                XmlChild::Element(_) => None,
            })
            .collect()
    }

    /// Replace all children with a single text node (or nothing, if empty).
    pub fn set_text(&mut self, text: &str) {
        self.children.clear();
        if !text.is_empty() {
            self.children.push(XmlChild::Text(text.to_string()));
        }
    }
}

impl XmlAttribute {
    pub fn qualified_name(&self) -> String {
        join_qualified(self.prefix.as_deref(), &self.name)
    }
}
