//! # XML Tree
//!
//! The library-neutral tree type plus its text serializer and reader.
//! Only `writer` and `reader` touch `quick-xml`.

pub mod node;
pub mod reader;
pub mod writer;

pub use node::XmlNode;
pub use reader::parse_xml;
pub use writer::{to_xml_string, to_xml_string_pretty};
