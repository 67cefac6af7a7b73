//! # Attribute Operations
//!
//! internal logic for parsing `#[serde(...)]` and `#[xml(...)]` attributes.

use ra_ap_syntax::ast::{self};
use ra_ap_syntax::{AstNode, SyntaxNode};
use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

/// Helper struct for attributes extracted from a single node.
#[derive(Default, Debug, PartialEq, Eq)]
pub struct AttrInfo {
    /// The rename value if present.
    pub rename: Option<String>,
    /// The `xml(tag = "...")` value if present.
    pub tag: Option<String>,
    /// Whether the skip flag was found.
    pub is_skipped: bool,
    /// Whether a `default` flag (or `default = "path"`) was found.
    pub has_default: bool,
    /// The default function path if given.
    pub default_path: Option<String>,
    /// Whether the node is declared as an explicit xml entity (`element` / `attr`).
    pub is_entity: bool,
}

/// Analyzes attributes on a node to find `serde` or `xml` configurations.
pub fn extract_attributes(node: &SyntaxNode) -> AttrInfo {
    let mut info = AttrInfo::default();

    let attributes = node.children().filter_map(ast::Attr::cast);

    for attr in attributes {
        if let Some(meta) = attr.meta() {
            if let Some(path) = meta.path() {
                let ident = path.to_string();
                if let Some(tt) = meta.token_tree() {
                    let content = tt.to_string();
                    match ident.as_str() {
                        "serde" => parse_serde_content(&content, &mut info),
                        "xml" => parse_xml_content(&content, &mut info),
                        _ => {}
                    }
                }
            }
        }
    }

    info
}

fn rename_re() -> &'static Regex {
    static RENAME_RE: OnceLock<Regex> = OnceLock::new();
    RENAME_RE.get_or_init(|| Regex::new(r#"\brename\s*=\s*"([^"]+)""#).expect("Invalid regex"))
}

fn skip_re() -> &'static Regex {
    static SKIP_RE: OnceLock<Regex> = OnceLock::new();
    SKIP_RE.get_or_init(|| Regex::new(r#"\bskip\b"#).expect("Invalid regex"))
}

fn default_re() -> &'static Regex {
    static DEFAULT_RE: OnceLock<Regex> = OnceLock::new();
    DEFAULT_RE.get_or_init(|| {
        Regex::new(r#"\bdefault\b(?:\s*=\s*"([^"]+)")?"#).expect("Invalid regex")
    })
}

/// Blanks out string literals so flag keywords are only matched as bare idents.
fn without_literals(content: &str) -> Cow<'_, str> {
    static LITERAL_RE: OnceLock<Regex> = OnceLock::new();
    LITERAL_RE
        .get_or_init(|| Regex::new(r#""(?:[^"\\]|\\.)*""#).expect("Invalid regex"))
        .replace_all(content, "\"\"")
}

/// Parses `(rename = "x", skip, default)`.
fn parse_serde_content(content: &str, info: &mut AttrInfo) {
    if let Some(val) = rename_re().captures(content).and_then(|c| c.get(1)) {
        info.rename = Some(val.as_str().to_string());
    }

    let bare = without_literals(content);
    if skip_re().is_match(&bare) {
        info.is_skipped = true;
    }

    parse_default(content, &bare, info);
}

/// Parses `(tag = "x")`, `(element)`, `(element, tag = "x")`, `(attr, ...)`, `(rename = "x")`.
fn parse_xml_content(content: &str, info: &mut AttrInfo) {
    static TAG_RE: OnceLock<Regex> = OnceLock::new();
    let tag_re =
        TAG_RE.get_or_init(|| Regex::new(r#"\btag\s*=\s*"([^"]*)""#).expect("Invalid regex"));

    static ENTITY_RE: OnceLock<Regex> = OnceLock::new();
    let entity_re = ENTITY_RE
        .get_or_init(|| Regex::new(r#"\b(element|attr|attribute)\b"#).expect("Invalid regex"));

    if let Some(val) = tag_re.captures(content).and_then(|c| c.get(1)) {
        info.tag = Some(val.as_str().to_string());
    }

    if let Some(val) = rename_re().captures(content).and_then(|c| c.get(1)) {
        info.rename = Some(val.as_str().to_string());
    }

    let bare = without_literals(content);
    if entity_re.is_match(&bare) {
        info.is_entity = true;
    }

    if skip_re().is_match(&bare) {
        info.is_skipped = true;
    }

    parse_default(content, &bare, info);
}

/// `bare` decides whether the flag is present; the path is read from `content`.
fn parse_default(content: &str, bare: &str, info: &mut AttrInfo) {
    if !default_re().is_match(bare) {
        return;
    }
    info.has_default = true;
    if let Some(path) = default_re().captures_iter(content).find_map(|c| c.get(1)) {
        info.default_path = Some(path.as_str().to_string());
    }
}
