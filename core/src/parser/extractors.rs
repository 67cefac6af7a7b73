//! # Extraction Logic
//!
//! High-level functions to parse Rust code into IR models.

use crate::error::{AppError, AppResult};
use crate::parser::attributes::extract_attributes;
use crate::parser::models::{ParsedField, ParsedStruct, TypeExpr};
use ra_ap_edition::Edition;
use ra_ap_syntax::ast::{self, HasGenericArgs, HasName};
use ra_ap_syntax::{AstNode, SourceFile, SyntaxKind, SyntaxNode};

/// Extracts the names of all structs with named fields.
pub fn extract_struct_names(code: &str) -> AppResult<Vec<String>> {
    Ok(extract_structs(code)?.into_iter().map(|s| s.name).collect())
}

/// Extracts every struct with named fields, in source order.
///
/// Tuple and unit structs are ignored since they have no element names to emit.
pub fn extract_structs(code: &str) -> AppResult<Vec<ParsedStruct>> {
    let parse = SourceFile::parse(code, Edition::Edition2021);
    let file = parse.tree();

    let structs = file
        .syntax()
        .descendants()
        .filter_map(ast::Struct::cast)
        .filter_map(|s| parse_struct_node(&s))
        .collect();

    Ok(structs)
}

/// Parsing function to extract a single struct definition.
///
/// # Examples
/// ```
/// use wsdlgen_core::parser::extract_struct;
///
/// let code = r#"
///     #[xml(tag = "user")]
///     struct User {
///         #[serde(rename = "userId")]
///         id: i32,
///         #[serde(skip)]
///         hidden: String
///     }
/// "#;
/// let info = extract_struct(code, "User").unwrap();
/// assert_eq!(info.tag.as_deref(), Some("user"));
/// assert_eq!(info.fields[0].rename.as_deref(), Some("userId"));
/// assert!(info.fields[1].is_skipped);
/// ```
pub fn extract_struct(code: &str, struct_name: &str) -> AppResult<ParsedStruct> {
    extract_structs(code)?
        .into_iter()
        .find(|s| s.name == struct_name)
        .ok_or_else(|| AppError::General(format!("Struct '{}' not found", struct_name)))
}

fn parse_struct_node(struct_def: &ast::Struct) -> Option<ParsedStruct> {
    let name = struct_def.name()?.text().to_string();
    let ast::FieldList::RecordFieldList(list) = struct_def.field_list()? else {
        return None;
    };

    let struct_attrs = extract_attributes(struct_def.syntax());
    let mut fields = Vec::new();

    for field in list.fields() {
        if let (Some(fname), Some(ty)) = (field.name(), field.ty()) {
            let attrs = extract_attributes(field.syntax());
            let (rename, entity) = if attrs.is_entity {
                (attrs.rename, Some(attrs.tag))
            } else {
                (attrs.rename.or(attrs.tag), None)
            };
            fields.push(ParsedField {
                name: fname.text().to_string(),
                ty: parse_type(&ty),
                description: extract_doc_comment(field.syntax()),
                rename,
                is_skipped: attrs.is_skipped,
                has_default: attrs.has_default,
                default_path: attrs.default_path,
                entity,
            });
        }
    }

    Some(ParsedStruct {
        name,
        description: extract_doc_comment(struct_def.syntax()),
        tag: struct_attrs.tag.or(struct_attrs.rename),
        fields,
    })
}

/// Recursively reduces an AST type to a [`TypeExpr`].
fn parse_type(ty: &ast::Type) -> TypeExpr {
    match ty {
        ast::Type::PathType(path_type) => {
            let Some(segment) = path_type.path().and_then(|p| p.segment()) else {
                return TypeExpr::Named(ty.syntax().text().to_string());
            };
            let Some(name_ref) = segment.name_ref() else {
                return TypeExpr::Named(ty.syntax().text().to_string());
            };
            let name = name_ref.text().as_str().to_string();

            let inner = first_type_arg(&segment).map(|t| parse_type(&t));
            match (name.as_str(), inner) {
                ("Option", Some(inner)) => TypeExpr::Optional(Box::new(inner)),
                ("Vec" | "VecDeque" | "HashSet" | "BTreeSet" | "IndexSet", Some(inner)) => {
                    TypeExpr::List(Box::new(inner))
                }
                // Smart pointers are transparent
                ("Box" | "Arc" | "Rc" | "Cow", Some(inner)) => inner,
                _ => TypeExpr::Named(name),
            }
        }
        ast::Type::RefType(ref_type) => ref_type
            .ty()
            .map(|inner| parse_type(&inner))
            .unwrap_or_else(|| TypeExpr::Named(ty.syntax().text().to_string())),
        ast::Type::SliceType(slice) => match slice.ty() {
            Some(inner) => TypeExpr::List(Box::new(parse_type(&inner))),
            None => TypeExpr::Named(ty.syntax().text().to_string()),
        },
        ast::Type::ArrayType(array) => match array.ty() {
            Some(inner) => TypeExpr::List(Box::new(parse_type(&inner))),
            None => TypeExpr::Named(ty.syntax().text().to_string()),
        },
        ast::Type::ParenType(paren) => paren
            .ty()
            .map(|inner| parse_type(&inner))
            .unwrap_or_else(|| TypeExpr::Named(ty.syntax().text().to_string())),
        other => TypeExpr::Named(other.syntax().text().to_string()),
    }
}

/// First type argument of a segment, skipping lifetimes (`Cow<'a, str>`).
fn first_type_arg(segment: &ast::PathSegment) -> Option<ast::Type> {
    segment
        .generic_arg_list()?
        .generic_args()
        .find_map(|arg| match arg {
            ast::GenericArg::TypeArg(type_arg) => type_arg.ty(),
            _ => None,
        })
}

/// Helper to extract `///` comments from a syntax node's trivia children.
fn extract_doc_comment(node: &SyntaxNode) -> Option<String> {
    let mut lines = Vec::new();

    for child in node.children_with_tokens() {
        if child.kind() == SyntaxKind::COMMENT {
            let text = child.to_string();
            if let Some(content) = text.strip_prefix("///") {
                lines.push(content.strip_prefix(' ').unwrap_or(content).to_string());
            }
        }
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n").trim().to_string())
    }
}
