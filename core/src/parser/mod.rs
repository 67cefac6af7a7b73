#![deny(missing_docs)]

//! # Parser Module
//!
//! Handles parsing of Rust source code using the rust-analyzer syntax library.
//! Extracts structs, fields, documentation, and wire naming attributes (serde/xml).

pub mod attributes;
pub mod extractors;
pub mod models;

pub use extractors::{extract_struct, extract_struct_names, extract_structs};
pub use models::{ParsedField, ParsedStruct, TypeExpr};
