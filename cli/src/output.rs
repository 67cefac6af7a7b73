//! # Output
//!
//! Shared rendering and writing of generated documents.

use crate::error::CliResult;
use std::fs;
use std::path::Path;
use wsdlgen_core::{to_xml_string, to_xml_string_pretty, XmlNode};

/// Indentation used by `--pretty`.
const PRETTY_INDENT: usize = 2;

/// Serializes a tree, compact unless `pretty` is set.
pub fn render(node: &XmlNode, pretty: bool) -> CliResult<String> {
    let text = if pretty {
        to_xml_string_pretty(node, PRETTY_INDENT)?
    } else {
        to_xml_string(node)?
    };
    Ok(text)
}

/// Writes to `output` (creating parent directories) or prints to stdout.
pub fn write_document(text: &str, output: Option<&Path>) -> CliResult<()> {
    match output {
        Some(out_path) => {
            if let Some(parent) = out_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(out_path, text)?;
            tracing::info!(path = ?out_path, bytes = text.len(), "Document written");
        }
        None => println!("{}", text),
    }
    Ok(())
}
