#![deny(missing_docs)]

//! # OpenAPI Normalization
//!
//! Helpers that normalize the raw `components.schemas` tree into a more uniform
//! shape before deserializing into the schema shims. These functions only
//! rewrite fields that are known compatibility gaps.

use serde_json::{json, Map, Value};

/// Normalizes boolean schemas (`true` / `false`) into object schemas.
///
/// OpenAPI 3.1+ permits boolean schemas anywhere a Schema Object is accepted.
/// The shims accept them directly for `items` and `additionalProperties`; in
/// every other schema position they are rewritten so that they surface later
/// as a located walker error instead of an opaque parse error.
///
/// - `true` becomes `{}` (accepts any instance)
/// - `false` becomes `{"not": {}}` (accepts nothing)
pub(crate) fn normalize_boolean_schemas(value: &mut Value) {
    for_each_component_schema(value, normalize_schema_node);
}

/// Normalizes JSON Schema `const` usage into single-value `enum` entries.
///
/// When the schema has no `type`, one is inferred from the constant.
pub(crate) fn normalize_const_schemas(value: &mut Value) {
    for_each_component_schema(value, normalize_const_node);
}

fn for_each_component_schema(value: &mut Value, f: fn(&mut Value)) {
    if let Some(schemas) = value
        .get_mut("components")
        .and_then(|c| c.get_mut("schemas"))
        .and_then(|s| s.as_object_mut())
    {
        for schema in schemas.values_mut() {
            f(schema);
        }
    }
}

fn normalize_schema_node(value: &mut Value) {
    match value {
        Value::Bool(flag) => {
            *value = bool_schema_replacement(*flag);
        }
        Value::Object(map) => {
            if let Some(props) = map.get_mut("properties").and_then(|v| v.as_object_mut()) {
                for v in props.values_mut() {
                    normalize_schema_node(v);
                }
            }
            for key in ["items", "additionalProperties"] {
                if let Some(child) = map.get_mut(key) {
                    if !child.is_boolean() {
                        normalize_schema_node(child);
                    }
                }
            }
        }
        _ => {}
    }
}

fn normalize_const_node(value: &mut Value) {
    let Value::Object(map) = value else {
        return;
    };

    apply_const(map);

    if let Some(props) = map.get_mut("properties").and_then(|v| v.as_object_mut()) {
        for v in props.values_mut() {
            normalize_const_node(v);
        }
    }
    for key in ["items", "additionalProperties"] {
        if let Some(child) = map.get_mut(key) {
            normalize_const_node(child);
        }
    }
}

fn apply_const(map: &mut Map<String, Value>) {
    let Some(const_val) = map.remove("const") else {
        return;
    };

    if !map.contains_key("type") {
        if let Some(type_name) = infer_schema_type(&const_val) {
            map.insert("type".to_string(), Value::String(type_name.to_string()));
        }
    }
    if !map.contains_key("enum") {
        map.insert("enum".to_string(), Value::Array(vec![const_val]));
    }
}

fn infer_schema_type(value: &Value) -> Option<&'static str> {
    match value {
        Value::String(_) => Some("string"),
        Value::Bool(_) => Some("boolean"),
        Value::Number(num) => {
            if num.is_i64() || num.is_u64() {
                Some("integer")
            } else {
                Some("number")
            }
        }
        Value::Array(_) => Some("array"),
        Value::Object(_) => Some("object"),
        Value::Null => None,
    }
}

fn bool_schema_replacement(flag: bool) -> Value {
    if flag {
        Value::Object(Map::new())
    } else {
        json!({ "not": {} })
    }
}
