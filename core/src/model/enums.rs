#![deny(missing_docs)]

//! # Enum Constants
//!
//! Builds `EnumConst` lists from a schema's `enum` values and the optional
//! `x-enum-varnames` / `x-enum-descriptions` vendor extensions, which align
//! positionally with the enum list.
//!
//! Values are decoded with one typed decoder per literal kind; the schema's
//! type and format pick the decoder. A single undecodable value fails the
//! whole enum.

use crate::error::{AppError, AppResult};
use crate::model::location::Location;
use crate::model::types::{doc_lines, EnumConst, Literal};
use crate::oas::shims::ShimSchema;
use serde_json::Value;

/// Vendor extension naming each enum constant.
pub const X_ENUM_VARNAMES: &str = "x-enum-varnames";
/// Vendor extension documenting each enum constant.
pub const X_ENUM_DESCRIPTIONS: &str = "x-enum-descriptions";

/// Decodes a raw enum value into one literal kind.
pub(crate) type Decoder = fn(&Value) -> Result<Literal, String>;

/// Decodes a string constant. Numbers and booleans are taken in their textual form.
pub(crate) fn decode_str(v: &Value) -> Result<Literal, String> {
    match v {
        Value::String(s) => Ok(Literal::Str(s.clone())),
        Value::Number(n) => Ok(Literal::Str(n.to_string())),
        Value::Bool(b) => Ok(Literal::Str(b.to_string())),
        other => Err(format!("expected a string, found {}", describe(other))),
    }
}

/// Decodes a 32 bit integer constant.
pub(crate) fn decode_int32(v: &Value) -> Result<Literal, String> {
    let n = v
        .as_i64()
        .ok_or_else(|| format!("expected an integer, found {}", describe(v)))?;
    i32::try_from(n)
        .map(Literal::Int32)
        .map_err(|_| format!("{} does not fit in int32", n))
}

/// Decodes a 64 bit integer constant.
pub(crate) fn decode_int64(v: &Value) -> Result<Literal, String> {
    v.as_i64()
        .map(Literal::Int64)
        .ok_or_else(|| format!("expected an integer, found {}", describe(v)))
}

/// Decodes a floating point constant.
pub(crate) fn decode_float64(v: &Value) -> Result<Literal, String> {
    v.as_f64()
        .map(Literal::Float64)
        .ok_or_else(|| format!("expected a number, found {}", describe(v)))
}

/// Decodes a boolean constant.
pub(crate) fn decode_bool(v: &Value) -> Result<Literal, String> {
    v.as_bool()
        .map(Literal::Bool)
        .ok_or_else(|| format!("expected a boolean, found {}", describe(v)))
}

fn describe(v: &Value) -> String {
    match v {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string {:?}", s),
        Value::Array(_) => "an array".to_string(),
        Value::Object(_) => "an object".to_string(),
    }
}

/// Reads a string-list vendor extension; absent means empty.
fn string_list(schema: &ShimSchema, key: &str, l: &Location) -> AppResult<Vec<String>> {
    match schema.extension(key) {
        None => Ok(Vec::new()),
        Some(value) => serde_json::from_value(value.clone()).map_err(|e| AppError::Decode {
            location: l.to_string(),
            detail: format!("failed to unmarshal {}: {}", key, e),
        }),
    }
}

/// Builds the enum constants of `schema`, or an empty list when it has no `enum`.
///
/// When the schema is `nullable`, `null` entries are skipped; names and
/// descriptions stay aligned with the original positions.
pub(crate) fn make_consts(
    schema: &ShimSchema,
    l: &Location,
    decode: Decoder,
) -> AppResult<Vec<EnumConst>> {
    let values = schema.enum_values();
    if values.is_empty() {
        return Ok(Vec::new());
    }

    let varnames = string_list(schema, X_ENUM_VARNAMES, l)?;
    let descriptions = string_list(schema, X_ENUM_DESCRIPTIONS, l)?;

    // `null` in a nullable enum is the absent value, not a constant.
    let nullable = schema.nullable.unwrap_or(false);

    values
        .iter()
        .enumerate()
        .filter(|(_, raw)| !(nullable && raw.is_null()))
        .map(|(i, raw)| {
            let value = decode(raw).map_err(|e| AppError::Decode {
                location: l.to_string(),
                detail: format!("failed to unmarshal enum value {}: {}", i, e),
            })?;

            Ok(EnumConst {
                name: varnames.get(i).cloned().unwrap_or_default(),
                value,
                doc: doc_lines(descriptions.get(i).map(String::as_str)),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema(yaml: &str) -> ShimSchema {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_string_consts_with_extensions() {
        let s = schema(
            r#"
type: string
enum: [active, inactive]
x-enum-varnames: [Active, Inactive]
x-enum-descriptions: ["Currently active", "Gone\nfor good"]
"#,
        );
        let consts = make_consts(&s, &Location::new("Status"), decode_str).unwrap();
        assert_eq!(consts.len(), 2);
        assert_eq!(consts[0].name, "Active");
        assert_eq!(consts[0].value, Literal::Str("active".into()));
        assert_eq!(consts[0].doc, vec!["Currently active"]);
        assert_eq!(consts[1].doc, vec!["Gone", "for good"]);
    }

    #[test]
    fn test_partial_varnames_leave_tail_unnamed() {
        let s = schema(
            r#"
type: integer
enum: [1, 2, 3]
x-enum-varnames: [One]
"#,
        );
        let consts = make_consts(&s, &Location::new("Level"), decode_int64).unwrap();
        let names: Vec<&str> = consts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["One", "", ""]);
        assert!(consts.iter().all(|c| c.doc.is_empty()));
        assert_eq!(consts[2].value, Literal::Int64(3));
    }

    #[test]
    fn test_no_enum_yields_nothing() {
        let s = schema("type: boolean");
        assert!(make_consts(&s, &Location::new("B"), decode_bool)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_bad_value_fails_whole_enum() {
        let s = schema("type: integer\nenum: [1, two, 3]");
        let err = make_consts(&s, &Location::new("Level"), decode_int64).unwrap_err();
        match err {
            AppError::Decode { location, detail } => {
                assert_eq!(location, "Level");
                assert!(detail.contains("enum value 1"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_nullable_enum_skips_null() {
        let s = schema(
            r#"
type: string
nullable: true
enum: [red, null, green]
x-enum-varnames: [Red, Nothing, Green]
x-enum-descriptions: [Warm, Absent, Cool]
"#,
        );
        let consts = make_consts(&s, &Location::new("Color"), decode_str).unwrap();
        let names: Vec<&str> = consts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Red", "Green"]);
        assert_eq!(consts[1].value, Literal::Str("green".into()));
        assert_eq!(consts[1].doc, vec!["Cool"]);
    }

    #[test]
    fn test_null_in_non_nullable_enum_fails() {
        let s = schema("type: string\nenum: [red, null]");
        let err = make_consts(&s, &Location::new("Color"), decode_str).unwrap_err();
        assert!(err.to_string().contains("enum value 1"));
    }

    #[test]
    fn test_malformed_varnames_fail() {
        let s = schema("type: string\nenum: [a]\nx-enum-varnames: {a: A}");
        let err = make_consts(&s, &Location::new("E"), decode_str).unwrap_err();
        assert!(err.to_string().contains("x-enum-varnames"));
    }

    #[test]
    fn test_typed_decoders() {
        assert_eq!(decode_int32(&json!(7)).unwrap(), Literal::Int32(7));
        assert!(decode_int32(&json!(4_000_000_000_i64)).is_err());
        assert!(decode_int64(&json!(1.5)).is_err());
        assert_eq!(decode_float64(&json!(2)).unwrap(), Literal::Float64(2.0));
        assert_eq!(decode_bool(&json!(false)).unwrap(), Literal::Bool(false));
        assert!(decode_bool(&json!("false")).is_err());
        assert_eq!(decode_str(&json!(10)).unwrap(), Literal::Str("10".into()));
        assert!(decode_str(&Value::Null).is_err());
    }
}
