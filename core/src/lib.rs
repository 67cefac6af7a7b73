#![deny(missing_docs)]

//! # WSDL Generator Core
//!
//! Core library for generating WSDL 1.1 service contracts and XSD schemas from
//! typed model descriptions.

/// Shared error types.
pub mod error;

/// Neutral XML tree, serializer and reader.
pub mod xml;

/// Model, field and type-shape descriptions.
pub mod model;

/// Type mapping logic (scalar name -> XSD primitive).
pub mod type_mapping;

/// Element name resolution.
pub mod naming;

/// XSD element and schema generation.
pub mod schema_generator;

/// WSDL document assembly.
pub mod wsdl;

/// AST Parsing logic.
pub mod parser;

/// Model resolution from parsed sources.
pub mod registry;

/// Service manifest loading.
pub mod manifest;

pub use error::{AppError, AppResult};
pub use manifest::{load_model_sources, ManifestFormat, OperationEntry, ServiceManifest};
pub use model::{DefaultValue, EntityDecl, FieldDescriptor, Model, ModelSet, TypeShape};
pub use registry::{extract_models, ModelRegistry};
pub use schema_generator::{
    generate_element, generate_element_with, generate_schema, generate_schema_with,
};
pub use type_mapping::{PrimitiveTableMapper, XsdPrimitive, XsdTypeMapper};
pub use wsdl::{generate_wsdl, MessageRole, OperationModels, ServiceDescription};
pub use xml::{parse_xml, to_xml_string, to_xml_string_pretty, XmlNode};
