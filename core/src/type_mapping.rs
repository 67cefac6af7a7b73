#![deny(missing_docs)]

//! # Type Mapping
//!
//! Converts scalar type names into XML Schema built-in primitives.
//! Accepts both the canonical short names (`str`, `int`, `datetime`, ...) and
//! their Rust counterparts (`String`, `i64`, `NaiveDateTime`, ...).

use std::fmt::Display;

/// The XSD primitives emitted by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XsdPrimitive {
    /// `xs:string`
    String,
    /// `xs:integer`
    Integer,
    /// `xs:double`
    Double,
    /// `xs:boolean`
    Boolean,
    /// `xs:date`
    Date,
    /// `xs:time`
    Time,
    /// `xs:dateTime`
    DateTime,
    /// `xs:anyURI`
    AnyUri,
    /// `xs:positiveInteger`
    PositiveInteger,
}

impl XsdPrimitive {
    /// The unprefixed XSD name.
    pub fn as_str(&self) -> &'static str {
        match self {
            XsdPrimitive::String => "string",
            XsdPrimitive::Integer => "integer",
            XsdPrimitive::Double => "double",
            XsdPrimitive::Boolean => "boolean",
            XsdPrimitive::Date => "date",
            XsdPrimitive::Time => "time",
            XsdPrimitive::DateTime => "dateTime",
            XsdPrimitive::AnyUri => "anyURI",
            XsdPrimitive::PositiveInteger => "positiveInteger",
        }
    }

    /// The name qualified with the `xs` prefix.
    pub fn qualified(&self) -> String {
        format!("xs:{}", self.as_str())
    }
}

impl Display for XsdPrimitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Trait for converting scalar type names to XSD primitives.
///
/// Mapping is total: names a mapper does not know must still produce a primitive.
pub trait XsdTypeMapper {
    /// Maps a scalar type name (e.g. `i32`, `chrono::NaiveDate`) to a primitive.
    fn map(&self, type_name: &str) -> XsdPrimitive;
}

/// The fixed primitive table. Unrecognized names become `string`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimitiveTableMapper;

impl XsdTypeMapper for PrimitiveTableMapper {
    fn map(&self, type_name: &str) -> XsdPrimitive {
        match last_segment(type_name) {
            // Canonical names
            "str" => XsdPrimitive::String,
            "int" => XsdPrimitive::Integer,
            "float" => XsdPrimitive::Double,
            "bool" => XsdPrimitive::Boolean,
            "date" => XsdPrimitive::Date,
            "time" => XsdPrimitive::Time,
            "datetime" => XsdPrimitive::DateTime,
            "AnyUrl" => XsdPrimitive::AnyUri,
            "PositiveInt" => XsdPrimitive::PositiveInteger,

            // Rust primitives
            "String" | "char" => XsdPrimitive::String,
            "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
            | "u128" | "usize" => XsdPrimitive::Integer,
            "f32" | "f64" => XsdPrimitive::Double,

            // Common library types
            "NaiveDate" => XsdPrimitive::Date,
            "NaiveTime" => XsdPrimitive::Time,
            "NaiveDateTime" | "DateTime" => XsdPrimitive::DateTime,
            "Url" | "Uri" => XsdPrimitive::AnyUri,
            "NonZeroU8" | "NonZeroU16" | "NonZeroU32" | "NonZeroU64" | "NonZeroU128"
            | "NonZeroUsize" => XsdPrimitive::PositiveInteger,

            _ => XsdPrimitive::String,
        }
    }
}

/// Strips references, module paths and generic arguments:
/// `&'a chrono::DateTime<Utc>` becomes `DateTime`.
fn last_segment(type_name: &str) -> &str {
    let without_generics = type_name.split('<').next().unwrap_or(type_name);
    let without_ref = without_generics
        .trim()
        .trim_start_matches('&')
        .trim_start();
    let without_lifetime = match without_ref.strip_prefix('\'') {
        Some(rest) => rest.split_once(' ').map_or(rest, |(_, ty)| ty),
        None => without_ref,
    };
    let without_mut = without_lifetime
        .strip_prefix("mut ")
        .unwrap_or(without_lifetime);
    without_mut.rsplit("::").next().unwrap_or(without_mut).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_table() {
        let mapper = PrimitiveTableMapper;

        let cases = vec![
            ("str", "string"),
            ("int", "integer"),
            ("float", "double"),
            ("bool", "boolean"),
            ("date", "date"),
            ("time", "time"),
            ("datetime", "dateTime"),
            ("AnyUrl", "anyURI"),
            ("PositiveInt", "positiveInteger"),
        ];

        for (input, expected) in cases {
            assert_eq!(mapper.map(input).as_str(), expected, "{}", input);
        }
    }

    #[test]
    fn test_rust_names() {
        let mapper = PrimitiveTableMapper;
        assert_eq!(mapper.map("i32"), XsdPrimitive::Integer);
        assert_eq!(mapper.map("f64"), XsdPrimitive::Double);
        assert_eq!(mapper.map("String"), XsdPrimitive::String);
        assert_eq!(mapper.map("chrono::NaiveDate"), XsdPrimitive::Date);
        assert_eq!(mapper.map("DateTime<Utc>"), XsdPrimitive::DateTime);
        assert_eq!(mapper.map("std::num::NonZeroU32"), XsdPrimitive::PositiveInteger);
        assert_eq!(mapper.map("url::Url"), XsdPrimitive::AnyUri);
    }

    #[test]
    fn test_references_stripped() {
        let mapper = PrimitiveTableMapper;
        assert_eq!(mapper.map("&str"), XsdPrimitive::String);
        assert_eq!(mapper.map("&'a str"), XsdPrimitive::String);
        assert_eq!(mapper.map("&mut bool"), XsdPrimitive::Boolean);
    }

    #[test]
    fn test_unknown_defaults_to_string() {
        let mapper = PrimitiveTableMapper;
        assert_eq!(mapper.map("Decimal"), XsdPrimitive::String);
        assert_eq!(mapper.map(""), XsdPrimitive::String);
    }

    #[test]
    fn test_qualified() {
        assert_eq!(XsdPrimitive::DateTime.qualified(), "xs:dateTime");
        assert_eq!(XsdPrimitive::AnyUri.to_string(), "anyURI");
    }
}
