//! # Data Models
//!
//! definition of Intermediate Representation (IR) structures for parsed Rust code.

/// A field's type expression, reduced to what schema generation cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// A named type, by its last path segment (e.g. `NaiveDate`, `Address`).
    Named(String),
    /// `Option<T>`.
    Optional(Box<TypeExpr>),
    /// `Vec<T>`, slices, arrays and set/deque collections.
    List(Box<TypeExpr>),
}

/// Represents a field extracted from a struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedField {
    /// The name of the field.
    pub name: String,
    /// The parsed type expression.
    pub ty: TypeExpr,
    /// Extracted doc comments (if any).
    pub description: Option<String>,
    /// The wire name override (e.g. from `#[serde(rename="...")]`).
    pub rename: Option<String>,
    /// Whether the field is marked to be skipped.
    pub is_skipped: bool,
    /// Whether a default is declared via attribute.
    pub has_default: bool,
    /// Default function path (`#[serde(default = "path")]`).
    pub default_path: Option<String>,
    /// Set when declared as `#[xml(element ...)]`; holds the optional `tag`.
    pub entity: Option<Option<String>>,
}

/// Represents a fully parsed struct including field and doc metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedStruct {
    /// The struct name.
    pub name: String,
    /// The struct-level description from doc comments.
    pub description: Option<String>,
    /// The wire tag override (`#[xml(tag = "...")]`, else `#[serde(rename = "...")]`).
    pub tag: Option<String>,
    /// The list of fields.
    pub fields: Vec<ParsedField>,
}
