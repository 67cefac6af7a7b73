//! # XML Reader
//!
//! Parses XML text back into an [`XmlNode`] tree. Whitespace-only text
//! between elements is dropped, so compact and pretty output read back the same.
//! A leaf element keeps its text verbatim, whitespace included.

use crate::error::{AppError, AppResult};
use crate::xml::XmlNode;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Parses a document and returns its root element.
pub fn parse_xml(xml: &str) -> AppResult<XmlNode> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => stack.push(start_node(&e)?),
            Ok(Event::Empty(e)) => {
                let node = start_node(&e)?;
                attach(node, &mut stack, &mut root)?;
            }
            Ok(Event::End(_)) => {
                let mut node = stack
                    .pop()
                    .ok_or_else(|| AppError::Xml("Unbalanced closing tag".into()))?;
                drop_layout_text(&mut node);
                attach(node, &mut stack, &mut root)?;
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| AppError::Xml(format!("Invalid text content: {}", e)))?;
                append_text(&mut stack, &text);
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(e.as_ref()).to_string();
                append_text(&mut stack, &text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(AppError::Xml(format!(
                    "XML parse error at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            // Declarations, comments, processing instructions
            _ => {}
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(AppError::Xml("Unclosed element at end of input".into()));
    }
    root.ok_or_else(|| AppError::Xml("Document has no root element".into()))
}

fn start_node(e: &BytesStart<'_>) -> AppResult<XmlNode> {
    let mut node = XmlNode::new(String::from_utf8_lossy(e.name().as_ref()).to_string());
    for attr in e.attributes() {
        let attr = attr.map_err(|e| AppError::Xml(format!("Invalid attribute: {}", e)))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| AppError::Xml(format!("Invalid attribute value: {}", e)))?;
        node.set_attr(key, value.to_string());
    }
    Ok(node)
}

fn attach(node: XmlNode, stack: &mut [XmlNode], root: &mut Option<XmlNode>) -> AppResult<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_none() => *root = Some(node),
        None => return Err(AppError::Xml("Multiple root elements".into())),
    }
    Ok(())
}

fn append_text(stack: &mut [XmlNode], text: &str) {
    let Some(current) = stack.last_mut() else {
        return;
    };
    // Whitespace after a child element is indentation
    if !current.children.is_empty() && text.trim().is_empty() {
        return;
    }
    current.text.get_or_insert_with(String::new).push_str(text);
}

/// Whitespace-only text in an element with children is indentation; in a leaf it is content.
fn drop_layout_text(node: &mut XmlNode) {
    let layout_only = node.text.as_deref().is_some_and(|t| t.trim().is_empty());
    if layout_only && !node.children.is_empty() {
        node.text = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{to_xml_string, to_xml_string_pretty};

    #[test]
    fn test_parse_nested_with_attributes() {
        let xml = r#"<a x="1" y="2"><b/><c z="&amp;">hi</c></a>"#;
        let root = parse_xml(xml).unwrap();
        assert_eq!(root.tag, "a");
        assert_eq!(root.attr("y"), Some("2"));
        assert_eq!(root.children.len(), 2);
        let c = root.child("c").unwrap();
        assert_eq!(c.attr("z"), Some("&"));
        assert_eq!(c.text.as_deref(), Some("hi"));
    }

    #[test]
    fn test_prefixed_tags_kept() {
        let root = parse_xml(r#"<xs:schema xmlns:xs="urn:x"><xs:element name="A"/></xs:schema>"#)
            .unwrap();
        assert_eq!(root.tag, "xs:schema");
        assert_eq!(root.attr("xmlns:xs"), Some("urn:x"));
        assert_eq!(root.children[0].tag, "xs:element");
    }

    #[test]
    fn test_round_trip_compact_and_pretty() {
        let tree = XmlNode::new("wsdl:definitions")
            .with_attr("name", "Svc")
            .with_child(XmlNode::new("wsdl:documentation").with_text("Docs & more"))
            .with_child(XmlNode::new("wsdl:portType").with_attr("name", "Svc"));

        let compact = parse_xml(&to_xml_string(&tree).unwrap()).unwrap();
        assert_eq!(compact, tree);

        let pretty = parse_xml(&to_xml_string_pretty(&tree, 4).unwrap()).unwrap();
        assert_eq!(pretty, tree);
    }

    #[test]
    fn test_whitespace_leaf_text_kept() {
        let root = parse_xml("<a>\n  <b>   </b>\n  <c/>\n</a>").unwrap();
        assert_eq!(root.text, None);
        assert_eq!(root.child("b").and_then(|b| b.text.as_deref()), Some("   "));
        assert_eq!(root.child("c").map(|c| c.text.is_none()), Some(true));
    }

    #[test]
    fn test_rejects_unclosed_and_empty() {
        assert!(parse_xml("<a><b></b>").is_err());
        assert!(parse_xml("").is_err());
    }
}
