//! # XML Node
//!
//! A neutral attributed tree used for both XSD and WSDL output.
//! Tags carry their namespace prefix verbatim (e.g. `xs:element`).

use indexmap::IndexMap;

/// One element of an XML document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlNode {
    /// Qualified tag name, prefix included.
    pub tag: String,
    /// Attributes in insertion order.
    pub attributes: IndexMap<String, String>,
    /// Child elements in document order.
    pub children: Vec<XmlNode>,
    /// Text content preceding the children, if any.
    pub text: Option<String>,
}

impl XmlNode {
    /// Creates an empty element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Builder form of [`XmlNode::set_attr`].
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Sets the element text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Appends a child, builder style.
    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    /// Appends several children, builder style.
    pub fn with_children(mut self, children: impl IntoIterator<Item = XmlNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Inserts or replaces an attribute. Replacing keeps the original position.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Returns an attribute value.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Appends a child and returns a handle to it.
    pub fn push(&mut self, child: XmlNode) -> &mut XmlNode {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Iterates over direct children with the given tag.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// First direct child with the given tag.
    pub fn child(&self, tag: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// First direct child with the given tag and `name` attribute.
    pub fn child_by_name(&self, tag: &str, name: &str) -> Option<&XmlNode> {
        self.children
            .iter()
            .find(|c| c.tag == tag && c.attr("name") == Some(name))
    }

    /// Whether the element has neither children nor (non-empty) text.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.text.as_deref().map_or(true, str::is_empty)
    }
}
