//! # XML Writer
//!
//! Renders an [`XmlNode`] tree to UTF-8 text through `quick-xml` events.
//! No XML declaration is emitted.

use crate::error::{AppError, AppResult};
use crate::xml::XmlNode;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// Serializes a tree compactly (no whitespace between elements).
///
/// # Examples
/// ```
/// use wsdlgen_core::xml::{to_xml_string, XmlNode};
///
/// let node = XmlNode::new("xs:element")
///     .with_attr("name", "Id")
///     .with_attr("type", "xs:integer");
/// assert_eq!(
///     to_xml_string(&node).unwrap(),
///     r#"<xs:element name="Id" type="xs:integer"/>"#
/// );
/// ```
pub fn to_xml_string(node: &XmlNode) -> AppResult<String> {
    let mut writer = Writer::new(Vec::new());
    write_node(&mut writer, node)?;
    into_string(writer)
}

/// Serializes a tree with `indent` spaces per nesting level.
pub fn to_xml_string_pretty(node: &XmlNode, indent: usize) -> AppResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', indent);
    write_node(&mut writer, node)?;
    into_string(writer)
}

fn into_string(writer: Writer<Vec<u8>>) -> AppResult<String> {
    String::from_utf8(writer.into_inner())
        .map_err(|e| AppError::Xml(format!("Serialized XML is not UTF-8: {}", e)))
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &XmlNode) -> AppResult<()> {
    let mut start = BytesStart::new(node.tag.as_str());
    for (key, value) in &node.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if node.is_empty() {
        return emit(writer, Event::Empty(start));
    }

    emit(writer, Event::Start(start))?;
    if let Some(text) = node.text.as_deref().filter(|t| !t.is_empty()) {
        emit(writer, Event::Text(BytesText::new(text)))?;
    }
    for child in &node.children {
        write_node(writer, child)?;
    }
    emit(writer, Event::End(BytesEnd::new(node.tag.as_str())))
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> AppResult<()> {
    writer
        .write_event(event)
        .map_err(|e| AppError::Xml(format!("Failed to write XML event: {}", e)))
}
