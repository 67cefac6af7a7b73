#![deny(missing_docs)]

//! # Schema Generator
//!
//! Converts model descriptions into XML Schema elements.
//! Records are inlined as anonymous `xs:complexType/xs:sequence` blocks; scalars
//! get a `type` attribute from the primitive table. Field order is preserved since
//! `xs:sequence` makes it the required element order.

use crate::model::{FieldDescriptor, Model, TypeShape};
use crate::naming::{resolve_tag_name, ElementSource, Underlying};
use crate::type_mapping::{PrimitiveTableMapper, XsdTypeMapper};
use crate::wsdl::namespace_declarations;
use crate::xml::XmlNode;

/// Tag of a schema element declaration.
pub const XS_ELEMENT: &str = "xs:element";
/// Tag of an anonymous complex type.
pub const XS_COMPLEX_TYPE: &str = "xs:complexType";
/// Tag of an ordered particle list.
pub const XS_SEQUENCE: &str = "xs:sequence";
/// Tag of the schema root.
pub const XS_SCHEMA: &str = "xs:schema";

/// Scalar type assumed when neither a model nor a field is supplied.
const FALLBACK_SCALAR: &str = "str";

/// Generates one `xs:element` from a model or a field descriptor.
///
/// Exactly one of the two is expected. Passing neither is tolerated and yields
/// `<xs:element name="Unknown" type="xs:string"/>`.
///
/// # Examples
/// ```
/// use wsdlgen_core::model::{FieldDescriptor, Model, TypeShape};
/// use wsdlgen_core::schema_generator::generate_element;
///
/// let model = Model::new("AddRequest")
///     .with_field(FieldDescriptor::new("a", TypeShape::scalar("int")))
///     .with_field(FieldDescriptor::new("b", TypeShape::scalar("int")));
///
/// let element = generate_element(Some(&model), None);
/// assert_eq!(element.attr("name"), Some("AddRequest"));
///
/// let sequence = &element.children[0].children[0];
/// assert_eq!(sequence.children.len(), 2);
/// assert_eq!(sequence.children[1].attr("type"), Some("xs:integer"));
/// ```
pub fn generate_element(model: Option<&Model>, field: Option<&FieldDescriptor>) -> XmlNode {
    generate_element_with(&PrimitiveTableMapper, model, field)
}

/// Same as [`generate_element`] with a custom scalar mapper.
pub fn generate_element_with(
    mapper: &impl XsdTypeMapper,
    model: Option<&Model>,
    field: Option<&FieldDescriptor>,
) -> XmlNode {
    let source = ElementSource { model, field };
    let mut element = XmlNode::new(XS_ELEMENT).with_attr("name", resolve_tag_name(&source));

    match source.underlying() {
        Some(Underlying::Model(record)) => {
            element.push(complex_type(mapper, record));
        }
        Some(Underlying::Shape(shape)) => match shape.item() {
            TypeShape::Record(record) => {
                element.push(complex_type(mapper, record));
            }
            TypeShape::Scalar(type_name) => {
                element.set_attr("type", mapper.map(type_name).qualified());
            }
            // item() never returns a list layer
            TypeShape::Repeated(_) => {}
        },
        None => {
            element.set_attr("type", mapper.map(FALLBACK_SCALAR).qualified());
        }
    }

    if let Some(field) = field {
        apply_cardinality(&mut element, field);
    }

    element
}

/// Builds the `xs:complexType/xs:sequence` wrapper for a record.
fn complex_type(mapper: &impl XsdTypeMapper, record: &Model) -> XmlNode {
    let sequence = record
        .fields
        .iter()
        .fold(XmlNode::new(XS_SEQUENCE), |seq, f| {
            seq.with_child(generate_element_with(mapper, None, Some(f)))
        });
    XmlNode::new(XS_COMPLEX_TYPE).with_child(sequence)
}

/// Repeated fields are optional and unbounded; defaulted fields are optional.
fn apply_cardinality(element: &mut XmlNode, field: &FieldDescriptor) {
    if field.is_repeated() {
        element.set_attr("minOccurs", "0");
        element.set_attr("maxOccurs", "unbounded");
    } else if field.has_default() {
        element.set_attr("minOccurs", "0");
    }
}

/// Generates an `xs:schema` holding one element per model, in iteration order.
///
/// Callers are expected to pass distinct models (see [`crate::model::ModelSet`]).
pub fn generate_schema<'a>(models: impl IntoIterator<Item = &'a Model>) -> XmlNode {
    generate_schema_with(&PrimitiveTableMapper, models)
}

/// Same as [`generate_schema`] with a custom scalar mapper.
pub fn generate_schema_with<'a>(
    mapper: &impl XsdTypeMapper,
    models: impl IntoIterator<Item = &'a Model>,
) -> XmlNode {
    let mut schema = XmlNode::new(XS_SCHEMA);
    for (prefix, uri) in namespace_declarations() {
        schema.set_attr(prefix, uri);
    }

    for model in models {
        tracing::debug!(model = %model.type_name, tag = %model.tag_name(), "Generating schema element");
        schema.push(generate_element_with(mapper, Some(model), None));
    }

    schema
}
