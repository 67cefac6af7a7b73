#![deny(missing_docs)]

//! # Model Registry
//!
//! Resolves parsed structs into [`Model`] descriptions. Field types naming
//! another registered struct become nested records; everything else stays scalar.

use crate::error::{AppError, AppResult};
use crate::model::{DefaultValue, EntityDecl, FieldDescriptor, Model, TypeShape};
use crate::parser::{extract_structs, ParsedField, ParsedStruct, TypeExpr};
use indexmap::IndexMap;
use std::sync::Arc;

/// Models by Rust type name, in source order.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: IndexMap<String, Arc<Model>>,
}

/// Parses Rust source and resolves every struct with named fields into a model.
///
/// # Examples
/// ```
/// use wsdlgen_core::registry::extract_models;
///
/// let code = r#"
///     struct Line { sku: String }
///     #[xml(tag = "order")]
///     struct Order { lines: Vec<Line>, note: Option<String> }
/// "#;
/// let registry = extract_models(code).unwrap();
/// let order = registry.require("Order").unwrap();
/// assert_eq!(order.tag_name(), "order");
/// assert!(order.fields[0].is_repeated());
/// assert!(order.fields[1].has_default());
/// ```
pub fn extract_models(code: &str) -> AppResult<ModelRegistry> {
    ModelRegistry::from_structs(extract_structs(code)?)
}

impl ModelRegistry {
    /// Resolves a set of parsed structs.
    ///
    /// Fails when a struct name is defined twice or when structs reference each
    /// other recursively (inline schemas cannot express cycles).
    pub fn from_structs(structs: Vec<ParsedStruct>) -> AppResult<Self> {
        let mut definitions: IndexMap<String, ParsedStruct> = IndexMap::new();
        for s in structs {
            if definitions.contains_key(&s.name) {
                return Err(AppError::General(format!(
                    "Struct '{}' is defined more than once",
                    s.name
                )));
            }
            definitions.insert(s.name.clone(), s);
        }

        let mut resolver = Resolver {
            definitions: &definitions,
            resolved: IndexMap::new(),
            visiting: Vec::new(),
        };
        for name in definitions.keys() {
            resolver.resolve(name)?;
        }

        // Keep source order rather than resolution order
        let mut models = IndexMap::new();
        for name in definitions.keys() {
            if let Some(model) = resolver.resolved.get(name) {
                models.insert(name.clone(), Arc::clone(model));
            }
        }

        tracing::debug!(count = models.len(), "Resolved models");
        Ok(Self { models })
    }

    /// Looks a model up by Rust type name, then by wire tag.
    pub fn get(&self, name: &str) -> Option<&Arc<Model>> {
        self.models
            .get(name)
            .or_else(|| self.models.values().find(|m| m.tag_name() == name))
    }

    /// Like [`ModelRegistry::get`] but fails with a descriptive error.
    pub fn require(&self, name: &str) -> AppResult<Arc<Model>> {
        self.get(name)
            .cloned()
            .ok_or_else(|| AppError::General(format!("Model '{}' not found", name)))
    }

    /// Registered type names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    /// All models in source order.
    pub fn models(&self) -> impl Iterator<Item = &Arc<Model>> {
        self.models.values()
    }

    /// Number of models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Adds another registry's models. Names already present are rejected.
    pub fn merge(&mut self, other: ModelRegistry) -> AppResult<()> {
        for (name, model) in other.models {
            if self.models.contains_key(&name) {
                return Err(AppError::General(format!(
                    "Struct '{}' is defined more than once",
                    name
                )));
            }
            self.models.insert(name, model);
        }
        Ok(())
    }
}

struct Resolver<'a> {
    definitions: &'a IndexMap<String, ParsedStruct>,
    resolved: IndexMap<String, Arc<Model>>,
    visiting: Vec<String>,
}

impl Resolver<'_> {
    fn resolve(&mut self, name: &str) -> AppResult<Arc<Model>> {
        if let Some(model) = self.resolved.get(name) {
            return Ok(Arc::clone(model));
        }
        if self.visiting.iter().any(|v| v == name) {
            let mut chain = self.visiting.clone();
            chain.push(name.to_string());
            return Err(AppError::General(format!(
                "Recursive model cannot be expressed as an inline schema: {}",
                chain.join(" -> ")
            )));
        }
        let definitions = self.definitions;
        let definition = definitions
            .get(name)
            .ok_or_else(|| AppError::General(format!("Model '{}' not found", name)))?;

        self.visiting.push(name.to_string());
        let mut model = Model::new(&definition.name);
        model.tag = definition.tag.clone();
        model.documentation = definition.description.clone();
        for field in definition.fields.iter().filter(|f| !f.is_skipped) {
            let descriptor = self.field(field)?;
            model.fields.push(descriptor);
        }
        self.visiting.pop();

        let model = Arc::new(model);
        self.resolved.insert(name.to_string(), Arc::clone(&model));
        Ok(model)
    }

    fn field(&mut self, field: &ParsedField) -> AppResult<FieldDescriptor> {
        let (ty, optional) = self.shape(&field.ty)?;

        let default = match (&field.default_path, field.has_default, optional) {
            (Some(path), _, _) => Some(DefaultValue::Literal(path.clone())),
            (None, true, _) => Some(DefaultValue::Literal("Default::default".to_string())),
            (None, false, true) => Some(DefaultValue::Null),
            (None, false, false) => None,
        };

        Ok(FieldDescriptor {
            name: Some(field.name.clone()),
            alias: field.rename.clone(),
            entity: field.entity.clone().map(|path| EntityDecl { path }),
            ty,
            default,
        })
    }

    /// Returns the shape and whether an outer `Option` was stripped.
    fn shape(&mut self, expr: &TypeExpr) -> AppResult<(TypeShape, bool)> {
        match expr {
            TypeExpr::Optional(inner) => {
                let (shape, _) = self.shape(inner)?;
                Ok((shape, true))
            }
            TypeExpr::List(inner) => {
                let (shape, _) = self.shape(inner)?;
                Ok((TypeShape::repeated(shape), false))
            }
            TypeExpr::Named(name) if self.definitions.contains_key(name) => {
                Ok((TypeShape::Record(self.resolve(name)?), false))
            }
            TypeExpr::Named(name) => Ok((TypeShape::scalar(name), false)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"
        /// Postal address.
        #[xml(tag = "address")]
        struct Address {
            street: String,
            #[serde(rename = "postCode")]
            zip: Option<String>,
        }

        struct Customer {
            id: u64,
            #[xml(element, tag = "Home")]
            home: Address,
            previous: Vec<Address>,
            #[serde(skip)]
            cache: String,
            #[serde(default = "default_tier")]
            tier: i32,
        }
    "#;

    #[test]
    fn test_resolves_nested_records() {
        let registry = extract_models(SOURCE).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["Address", "Customer"]);

        let customer = registry.require("Customer").unwrap();
        let names: Vec<&str> = customer
            .fields
            .iter()
            .filter_map(|f| f.name.as_deref())
            .collect();
        assert_eq!(names, vec!["id", "home", "previous", "tier"]);

        let home = &customer.fields[1];
        assert_eq!(home.entity.as_ref().and_then(|e| e.path.as_deref()), Some("Home"));
        assert_eq!(home.ty.tag_name(), Some("address"));

        let previous = &customer.fields[2];
        assert!(previous.is_repeated());
        assert_eq!(previous.ty.tag_name(), Some("address"));

        assert_eq!(
            customer.fields[3].default,
            Some(DefaultValue::Literal("default_tier".into()))
        );
    }

    #[test]
    fn test_option_sets_null_default() {
        let registry = extract_models(SOURCE).unwrap();
        let address = registry.require("address").unwrap();
        assert_eq!(address.documentation.as_deref(), Some("Postal address."));
        let zip = &address.fields[1];
        assert_eq!(zip.alias.as_deref(), Some("postCode"));
        assert_eq!(zip.default, Some(DefaultValue::Null));
        assert_eq!(zip.ty, TypeShape::scalar("String"));
    }

    #[test]
    fn test_shared_arc_for_nested_model() {
        let registry = extract_models(SOURCE).unwrap();
        let address = registry.require("Address").unwrap();
        let customer = registry.require("Customer").unwrap();
        match &customer.fields[1].ty {
            TypeShape::Record(nested) => assert!(Arc::ptr_eq(nested, &address)),
            other => panic!("expected record, got {:?}", other),
        }
    }

    #[test]
    fn test_recursive_models_rejected() {
        let code = r#"
            struct Node { children: Vec<Node> }
        "#;
        let err = extract_models(code).unwrap_err();
        assert!(err.to_string().contains("Node -> Node"));

        let mutual = r#"
            struct A { b: B }
            struct B { a: Option<A> }
        "#;
        assert!(extract_models(mutual).is_err());
    }

    #[test]
    fn test_rename_to_flag_word_keeps_field_required() {
        let registry = extract_models(
            r#"struct A { #[serde(rename = "default")] x: i32, #[serde(rename = "skip")] y: i32 }"#,
        )
        .unwrap();
        let a = registry.require("A").unwrap();
        assert_eq!(a.fields.len(), 2);
        assert_eq!(a.fields[0].alias.as_deref(), Some("default"));
        assert!(!a.fields[0].has_default());
        assert_eq!(a.fields[1].alias.as_deref(), Some("skip"));
    }

    #[test]
    fn test_duplicates_rejected() {
        let code = "mod a { struct X { v: i32 } } mod b { struct X { v: i32 } }";
        assert!(extract_models(code).is_err());
    }

    #[test]
    fn test_merge_and_missing() {
        let mut registry = extract_models("struct A { v: i32 }").unwrap();
        registry.merge(extract_models("struct B { v: i32 }").unwrap()).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry
            .merge(extract_models("struct A { w: i32 }").unwrap())
            .is_err());

        let err = registry.require("Missing").unwrap_err();
        assert!(err.to_string().contains("Model 'Missing' not found"));
    }
}
