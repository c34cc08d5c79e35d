#![deny(missing_docs)]

//! # OpenAPI Document Parsing
//!
//! Loads a YAML or JSON OpenAPI document into the schema shims.
//! The raw text is first parsed into a generic YAML value, converted into an
//! order-preserving JSON value (non-string keys such as response codes become
//! strings), normalized, and only then deserialized into `ShimOpenApi`.

use crate::error::{AppError, AppResult};
use crate::oas::normalization::{normalize_boolean_schemas, normalize_const_schemas};
use crate::oas::shims::{ShimOpenApi, ShimSchemaOrRef};
use serde::Deserialize;
use serde_json::Value;

/// Parses an OpenAPI document (YAML or JSON text).
///
/// # Arguments
///
/// * `content` - The raw document text. JSON is accepted since it is valid YAML.
///
/// # Returns
///
/// * `ShimOpenApi` - The normalized document model.
pub fn parse_openapi_document(content: &str) -> AppResult<ShimOpenApi> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(content)
        .map_err(|e| AppError::Parse(format!("Failed to parse OpenAPI YAML: {}", e)))?;
    let raw = serde_json::to_value(yaml)
        .map_err(|e| AppError::Parse(format!("Failed to convert OpenAPI YAML: {}", e)))?;
    parse_openapi_value(raw)
}

/// Normalizes and deserializes an already-parsed document value.
///
/// A malformed keyword inside a component schema is reported as `AppError::Decode`
/// at that schema; any other shape error is `AppError::Parse`.
pub fn parse_openapi_value(mut raw: Value) -> AppResult<ShimOpenApi> {
    if !raw.is_object() {
        return Err(AppError::Parse(
            "OpenAPI document root must be an object".into(),
        ));
    }

    normalize_boolean_schemas(&mut raw);
    normalize_const_schemas(&mut raw);

    ShimOpenApi::deserialize(&raw).map_err(|e| {
        locate_schema_error(&raw)
            .unwrap_or_else(|| AppError::Parse(format!("Failed to parse OpenAPI document: {}", e)))
    })
}

/// Finds the first component schema that fails to deserialize, naming it in the error.
fn locate_schema_error(raw: &Value) -> Option<AppError> {
    let schemas = raw.get("components")?.get("schemas")?.as_object()?;
    schemas.iter().find_map(|(name, node)| {
        ShimSchemaOrRef::deserialize(node)
            .err()
            .map(|e| AppError::Decode {
                location: name.clone(),
                detail: e.to_string(),
            })
    })
}
