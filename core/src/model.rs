#![deny(missing_docs)]

//! # Data Models
//!
//! Language-neutral descriptions of the record types exchanged by service
//! operations. A `Model` is built once and shared read-only (`Arc`) between
//! the operations that reference it.

use indexmap::IndexMap;
use std::sync::Arc;

/// The shape of a field's declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeShape {
    /// A primitive, identified by its type name (e.g. `str`, `i32`, `NaiveDate`).
    Scalar(String),
    /// A nested record type.
    Record(Arc<Model>),
    /// A list of the inner shape.
    Repeated(Box<TypeShape>),
}

impl TypeShape {
    /// Shortcut for a scalar shape.
    pub fn scalar(type_name: impl Into<String>) -> Self {
        TypeShape::Scalar(type_name.into())
    }

    /// Shortcut for a record shape.
    pub fn record(model: impl Into<Arc<Model>>) -> Self {
        TypeShape::Record(model.into())
    }

    /// Wraps a shape as a list.
    pub fn repeated(inner: TypeShape) -> Self {
        TypeShape::Repeated(Box::new(inner))
    }

    /// Whether the outermost shape is a list.
    pub fn is_repeated(&self) -> bool {
        matches!(self, TypeShape::Repeated(_))
    }

    /// The item shape with every list layer removed.
    pub fn item(&self) -> &TypeShape {
        match self {
            TypeShape::Repeated(inner) => inner.item(),
            other => other,
        }
    }

    /// Wire tag of the (item) record, if this shape describes one.
    pub fn tag_name(&self) -> Option<&str> {
        match self.item() {
            TypeShape::Record(model) => Some(model.tag_name()),
            _ => None,
        }
    }
}

/// An explicit nested-entity declaration on a field
/// (e.g. `#[xml(element, tag = "...")]`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntityDecl {
    /// The declared element path, if any.
    pub path: Option<String>,
}

/// A field's default value. Only its presence matters for cardinality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    /// Defaults to "no value" (e.g. `Option<T>` or `#[serde(default)]`).
    Null,
    /// A literal default.
    Literal(String),
}

/// Field-level metadata consumed by the schema generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Declared field name.
    pub name: Option<String>,
    /// Wire alias (rename).
    pub alias: Option<String>,
    /// Present when the field is declared through an explicit entity mechanism.
    pub entity: Option<EntityDecl>,
    /// The declared type.
    pub ty: TypeShape,
    /// The default value, `None` meaning the field is required.
    pub default: Option<DefaultValue>,
}

impl FieldDescriptor {
    /// Creates a required field.
    pub fn new(name: impl Into<String>, ty: TypeShape) -> Self {
        Self {
            name: Some(name.into()),
            alias: None,
            entity: None,
            ty,
            default: None,
        }
    }

    /// Sets the wire alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Marks the field as an explicitly declared entity with an optional path.
    pub fn with_entity(mut self, path: Option<String>) -> Self {
        self.entity = Some(EntityDecl { path });
        self
    }

    /// Sets the default value.
    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Whether a default value is present.
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Whether the declared type is a list.
    pub fn is_repeated(&self) -> bool {
        self.ty.is_repeated()
    }
}

/// A named record type with ordered fields and wire naming metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    /// The type's own name.
    pub type_name: String,
    /// Explicit wire tag override.
    pub tag: Option<String>,
    /// Doc comment text.
    pub documentation: Option<String>,
    /// Fields in declared order.
    pub fields: Vec<FieldDescriptor>,
}

impl Model {
    /// Creates a model with no fields.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            tag: None,
            documentation: None,
            fields: Vec::new(),
        }
    }

    /// Sets the wire tag override.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Sets the documentation.
    pub fn with_documentation(mut self, doc: impl Into<String>) -> Self {
        self.documentation = Some(doc.into());
        self
    }

    /// Appends a field.
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// The wire tag: the explicit override when non-empty, else the type name.
    pub fn tag_name(&self) -> &str {
        self.tag
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.type_name)
    }
}

/// Distinct models, keyed by wire tag, in registration order.
#[derive(Debug, Clone, Default)]
pub struct ModelSet {
    models: IndexMap<String, Arc<Model>>,
}

impl ModelSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a model. Returns `false` when its tag was already present.
    pub fn insert(&mut self, model: Arc<Model>) -> bool {
        let tag = model.tag_name().to_string();
        if self.models.contains_key(&tag) {
            return false;
        }
        self.models.insert(tag, model);
        true
    }

    /// Number of distinct models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether no model is registered.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Models in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Model> {
        self.models.values().map(|m| m.as_ref())
    }
}

impl FromIterator<Arc<Model>> for ModelSet {
    fn from_iter<I: IntoIterator<Item = Arc<Model>>>(iter: I) -> Self {
        let mut set = ModelSet::new();
        for model in iter {
            set.insert(model);
        }
        set
    }
}
