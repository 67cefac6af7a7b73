//! # Tag Name Resolution
//!
//! Picks the `name` attribute of a generated `xs:element`. Strategies are tried
//! in order and the first non-empty result wins.

use crate::model::{FieldDescriptor, Model, TypeShape};

/// Literal used when no strategy yields a name.
pub const UNKNOWN_NAME: &str = "Unknown";

/// What an element is being generated from.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElementSource<'a> {
    /// A model passed directly.
    pub model: Option<&'a Model>,
    /// A field descriptor.
    pub field: Option<&'a FieldDescriptor>,
}

/// The type an element's content is derived from.
#[derive(Debug, Clone, Copy)]
pub enum Underlying<'a> {
    /// The model itself, when generated from a model.
    Model(&'a Model),
    /// The field's declared type.
    Shape(&'a TypeShape),
}

impl<'a> ElementSource<'a> {
    /// The model when given, else the field's type, else nothing.
    pub fn underlying(&self) -> Option<Underlying<'a>> {
        match (self.model, self.field) {
            (Some(model), _) => Some(Underlying::Model(model)),
            (None, Some(field)) => Some(Underlying::Shape(&field.ty)),
            (None, None) => None,
        }
    }
}

/// A single way of deriving a tag name.
pub type NameStrategy = fn(&ElementSource<'_>) -> Option<String>;

/// Resolution order.
pub const NAME_STRATEGIES: &[(&str, NameStrategy)] = &[
    ("model_tag", model_tag),
    ("entity_path", entity_path),
    ("field_alias", field_alias),
    ("underlying_type_tag", underlying_type_tag),
];

/// Resolves the element name for a source.
pub fn resolve_tag_name(source: &ElementSource<'_>) -> String {
    NAME_STRATEGIES
        .iter()
        .find_map(|(_, strategy)| strategy(source).filter(|name| !name.is_empty()))
        .unwrap_or_else(|| UNKNOWN_NAME.to_string())
}

fn model_tag(source: &ElementSource<'_>) -> Option<String> {
    source.model.map(|m| m.tag_name().to_string())
}

fn entity_path(source: &ElementSource<'_>) -> Option<String> {
    let field = source.field?;
    let entity = field.entity.as_ref()?;
    non_empty(entity.path.as_deref()).or_else(|| non_empty(field.alias.as_deref()))
}

fn field_alias(source: &ElementSource<'_>) -> Option<String> {
    let field = source.field?;
    if field.entity.is_some() {
        return None;
    }
    non_empty(field.alias.as_deref())
        .or_else(|| non_empty(field.name.as_deref()))
        .or_else(|| Some(UNKNOWN_NAME.to_string()))
}

fn underlying_type_tag(source: &ElementSource<'_>) -> Option<String> {
    match source.underlying()? {
        Underlying::Model(model) => Some(model.tag_name().to_string()),
        Underlying::Shape(shape) => shape.tag_name().map(str::to_string),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeShape;

    fn resolve(model: Option<&Model>, field: Option<&FieldDescriptor>) -> String {
        resolve_tag_name(&ElementSource { model, field })
    }

    #[test]
    fn test_model_tag_wins() {
        let model = Model::new("User").with_tag("user");
        let field = FieldDescriptor::new("x", TypeShape::scalar("str")).with_alias("y");
        assert_eq!(resolve(Some(&model), Some(&field)), "user");
    }

    #[test]
    fn test_entity_path_then_alias() {
        let with_path = FieldDescriptor::new("name", TypeShape::scalar("str"))
            .with_alias("alias")
            .with_entity(Some("path".into()));
        assert_eq!(resolve(None, Some(&with_path)), "path");

        let without_path = FieldDescriptor::new("name", TypeShape::scalar("str"))
            .with_alias("alias")
            .with_entity(None);
        assert_eq!(resolve(None, Some(&without_path)), "alias");
    }

    #[test]
    fn test_entity_ignores_declared_name() {
        let nested = Model::new("Address").with_tag("addr");
        let field = FieldDescriptor::new("address", TypeShape::record(nested)).with_entity(None);
        assert_eq!(resolve(None, Some(&field)), "addr");

        let scalar = FieldDescriptor::new("plain", TypeShape::scalar("str")).with_entity(None);
        assert_eq!(resolve(None, Some(&scalar)), UNKNOWN_NAME);
    }

    #[test]
    fn test_alias_then_name_then_unknown() {
        let aliased = FieldDescriptor::new("name", TypeShape::scalar("str")).with_alias("Alias");
        assert_eq!(resolve(None, Some(&aliased)), "Alias");

        let named = FieldDescriptor::new("name", TypeShape::scalar("str"));
        assert_eq!(resolve(None, Some(&named)), "name");

        let mut anonymous = FieldDescriptor::new("", TypeShape::record(Model::new("Inner")));
        anonymous.name = None;
        assert_eq!(resolve(None, Some(&anonymous)), UNKNOWN_NAME);
    }

    #[test]
    fn test_nothing_given() {
        assert_eq!(resolve(None, None), UNKNOWN_NAME);
    }

    #[test]
    fn test_strategy_order() {
        let names: Vec<&str> = NAME_STRATEGIES.iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            vec!["model_tag", "entity_path", "field_alias", "underlying_type_tag"]
        );
    }
}
