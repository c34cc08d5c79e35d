#![deny(missing_docs)]

//! # Model Types
//!
//! Intermediate Representation handed to generators: anonymous `Type`s, object
//! `Field`s, enum constants, and named `Declaration`s.
//!
//! Composite types own their children outright. Cycles in the schema graph never
//! show up here; they are cut at `$ref` boundaries into `TypeKind::Ref` types
//! that only carry a declaration ID.

use crate::model::location::Location;
use serde::Serialize;
use std::fmt;

/// The structural kind of a `Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// Schema-less / free-form value.
    #[default]
    Unknown,
    /// `integer` with `format: int32`.
    Int32,
    /// `integer` (default width).
    Int64,
    /// `number`.
    Float64,
    /// `boolean`.
    Bool,
    /// `string`.
    String,
    /// `object` (struct, map, or both).
    Object,
    /// `array`.
    Array,
    /// Reference to a declaration by ID.
    Ref,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TypeKind::Unknown => "unknown",
            TypeKind::Int32 => "int32",
            TypeKind::Int64 => "int64",
            TypeKind::Float64 => "float64",
            TypeKind::Bool => "bool",
            TypeKind::String => "string",
            TypeKind::Object => "object",
            TypeKind::Array => "array",
            TypeKind::Ref => "ref",
        };
        f.write_str(s)
    }
}

/// An anonymous structural description of a schema node.
///
/// Which attributes are meaningful depends on `kind`:
///
/// | attribute                 | kinds                                |
/// |---------------------------|--------------------------------------|
/// | `enum_consts`             | int32, int64, float64, bool, string  |
/// | `fields`                  | object                               |
/// | `elem`                    | array, object (map values)           |
/// | `reference`               | ref                                  |
/// | `min` / `max`             | int32, int64, string, array, object  |
/// | `excl_min` / `excl_max`   | int32, int64, float64                |
/// | `multiple_of`             | int32, int64                         |
/// | `len`                     | string, array, object                |
/// | `pattern` / `format`      | string                               |
/// | `min_f` / `max_f`         | float64                              |
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Type {
    /// Kind tag.
    pub kind: TypeKind,
    /// Enum constants, in declaration order.
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_consts: Vec<EnumConst>,
    /// Object fields, in declaration order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
    /// Element type of arrays, value type of maps.
    ///
    /// `None` on an object means additional properties are forbidden.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elem: Option<Box<Type>>,
    /// Referenced declaration ID (or an opaque raw `$ref` outside `components.schemas`).
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Set when `reference` is a raw `$ref` outside `components.schemas`, naming no declaration.
    #[serde(skip_serializing_if = "is_false")]
    pub opaque: bool,

    /// Lower bound (value, length, or size).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    /// Upper bound (value, length, or size).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    /// `min` / `min_f` is exclusive.
    #[serde(skip_serializing_if = "is_false")]
    pub excl_min: bool,
    /// `max` / `max_f` is exclusive.
    #[serde(skip_serializing_if = "is_false")]
    pub excl_max: bool,
    /// Integer divisor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<i64>,
    /// Exact length, replacing `min` / `max` when they coincide.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub len: Option<i64>,
    /// String pattern, verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// String format tag, verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Floating point lower bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_f: Option<f64>,
    /// Floating point upper bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_f: Option<f64>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Type {
    /// A bare type of the given kind.
    pub fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// A schema-less type.
    pub fn unknown() -> Self {
        Self::new(TypeKind::Unknown)
    }

    /// A reference to declaration `id`.
    pub fn reference(id: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Ref,
            reference: Some(id.into()),
            ..Self::default()
        }
    }

    /// A reference kept verbatim because its target is not a component schema.
    pub fn opaque_reference(raw: impl Into<String>) -> Self {
        Self {
            opaque: true,
            ..Self::reference(raw)
        }
    }

    /// Whether the type is a reference.
    pub fn is_ref(&self) -> bool {
        self.kind == TypeKind::Ref
    }

    /// Sets `min` / `max`, collapsing them into `len` when both are present and equal.
    pub(crate) fn set_length_bounds(&mut self, min: Option<i64>, max: Option<i64>) {
        match (min, max) {
            (Some(lo), Some(hi)) if lo == hi => self.len = Some(lo),
            _ => {
                self.min = min;
                self.max = max;
            }
        }
    }

    /// Visits this type and every nested type, depth first.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Type)) {
        f(self);
        for field in &self.fields {
            field.ty.walk(f);
        }
        if let Some(elem) = &self.elem {
            elem.walk(f);
        }
    }
}

/// One member of an object type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    /// Property name as written in the schema.
    pub name: String,
    /// Property type.
    #[serde(rename = "type")]
    pub ty: Type,
    /// Listed in the parent's `required`.
    pub required: bool,
    /// Marked `deprecated`.
    pub deprecated: bool,
    /// Marked `nullable` (OpenAPI 3.0).
    pub nullable: bool,
    /// Documentation lines.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub doc: Vec<String>,
}

/// The literal value of an enum constant.
///
/// Exactly one literal exists per constant, and its variant matches the kind
/// of the enclosing type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    /// `string` constant.
    Str(String),
    /// `int32` constant.
    Int32(i32),
    /// `int64` constant.
    Int64(i64),
    /// `float64` constant.
    Float64(f64),
    /// `bool` constant.
    Bool(bool),
}

impl Literal {
    /// The type kind this literal belongs to.
    pub fn kind(&self) -> TypeKind {
        match self {
            Literal::Str(_) => TypeKind::String,
            Literal::Int32(_) => TypeKind::Int32,
            Literal::Int64(_) => TypeKind::Int64,
            Literal::Float64(_) => TypeKind::Float64,
            Literal::Bool(_) => TypeKind::Bool,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Str(s) => f.write_str(s),
            Literal::Int32(v) => write!(f, "{}", v),
            Literal::Int64(v) => write!(f, "{}", v),
            Literal::Float64(v) => write!(f, "{}", v),
            Literal::Bool(v) => write!(f, "{}", v),
        }
    }
}

/// One member of an enumerated type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumConst {
    /// Name from `x-enum-varnames`; empty when unspecified.
    pub name: String,
    /// The constant's value.
    pub value: Literal,
    /// Documentation lines from `x-enum-descriptions`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub doc: Vec<String>,
}

/// A named, top level unit of generation.
///
/// Created once per distinct location and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declaration {
    /// String form of `loc`.
    pub id: String,
    /// The named type.
    #[serde(rename = "type")]
    pub ty: Type,
    /// Documentation lines.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub doc: Vec<String>,
    /// Where the declaration came from.
    pub loc: Location,
    /// Marked `deprecated`.
    pub deprecated: bool,
}

/// Splits a description into lines, normalizing `\r\n` and `\r`.
pub(crate) fn doc_lines(doc: Option<&str>) -> Vec<String> {
    match doc {
        None | Some("") => Vec::new(),
        Some(text) => text
            .replace("\r\n", "\n")
            .replace('\r', "\n")
            .split('\n')
            .map(str::to_string)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_bounds_collapse() {
        let mut t = Type::new(TypeKind::String);
        t.set_length_bounds(Some(5), Some(5));
        assert_eq!(t.len, Some(5));
        assert_eq!((t.min, t.max), (None, None));

        let mut t = Type::new(TypeKind::String);
        t.set_length_bounds(Some(1), Some(5));
        assert_eq!(t.len, None);
        assert_eq!((t.min, t.max), (Some(1), Some(5)));

        let mut t = Type::new(TypeKind::Array);
        t.set_length_bounds(None, Some(3));
        assert_eq!((t.min, t.max, t.len), (None, Some(3), None));
    }

    #[test]
    fn test_doc_lines() {
        assert!(doc_lines(None).is_empty());
        assert!(doc_lines(Some("")).is_empty());
        assert_eq!(doc_lines(Some("a\r\nb\rc\nd")), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_walk_visits_nested_types() {
        let mut obj = Type::new(TypeKind::Object);
        obj.fields.push(Field {
            name: "xs".into(),
            ty: Type {
                elem: Some(Box::new(Type::reference("X"))),
                ..Type::new(TypeKind::Array)
            },
            required: false,
            deprecated: false,
            nullable: false,
            doc: Vec::new(),
        });
        obj.elem = Some(Box::new(Type::unknown()));

        let mut kinds = Vec::new();
        obj.walk(&mut |t| kinds.push(t.kind));
        assert_eq!(
            kinds,
            vec![
                TypeKind::Object,
                TypeKind::Array,
                TypeKind::Ref,
                TypeKind::Unknown
            ]
        );
    }

    #[test]
    fn test_literal_kind_and_display() {
        assert_eq!(Literal::Int32(4).kind(), TypeKind::Int32);
        assert_eq!(Literal::Float64(1.5).to_string(), "1.5");
        assert_eq!(Literal::Str("a b".into()).to_string(), "a b");
    }
}
