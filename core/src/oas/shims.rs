#![deny(missing_docs)]

//! # Schema Shims
//!
//! Generic structures acting as an Intermediate Deserialization Layer.
//! These structs map directly to the OpenAPI YAML objects the model compiler reads:
//! the document root, `components.schemas`, and Schema Objects.
//!
//! Fields whose encoding differs between OpenAPI 3.0 and 3.1 (`type`,
//! `exclusiveMinimum`, `exclusiveMaximum`) and the boolean-or-schema keywords
//! (`items`, `additionalProperties`) are modelled as untagged unions so that both
//! spellings deserialize.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// Schema for the root document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShimOpenApi {
    /// OpenAPI version (e.g. "3.1.0").
    pub openapi: Option<String>,

    /// The `$self` keyword (OAS 3.2+).
    /// Establishes the Base URI for the document.
    #[serde(rename = "$self")]
    pub self_uri: Option<String>,

    /// Components section holding the schemas.
    #[serde(default)]
    pub components: Option<ShimComponents>,
}

/// Components object (OAS 3.x) holding reusable definitions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShimComponents {
    /// Named schemas, in document order.
    #[serde(default)]
    pub schemas: IndexMap<String, ShimSchemaOrRef>,
}

/// A Schema Object or a Reference Object.
///
/// Any object carrying `$ref` is a reference, regardless of siblings.
#[derive(Debug, Clone)]
pub enum ShimSchemaOrRef {
    /// `{ "$ref": "..." }`, with the sibling annotations OAS 3.1 allows.
    Ref(ShimReference),
    /// An inline schema.
    Schema(Box<ShimSchema>),
}

// Dispatches on `$ref` up front so a bad keyword reports its own error
// instead of "did not match any variant".
impl<'de> Deserialize<'de> for ShimSchemaOrRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        if raw.get("$ref").is_some() {
            ShimReference::deserialize(raw)
                .map(Self::Ref)
                .map_err(serde::de::Error::custom)
        } else {
            ShimSchema::deserialize(raw)
                .map(|s| Self::Schema(Box::new(s)))
                .map_err(serde::de::Error::custom)
        }
    }
}

/// A Reference Object.
#[derive(Debug, Clone, Deserialize)]
pub struct ShimReference {
    /// The raw reference string.
    #[serde(rename = "$ref")]
    pub ref_location: String,
    /// Sibling description overriding the target's.
    pub description: Option<String>,
    /// Sibling deprecation flag overriding the target's.
    pub deprecated: Option<bool>,
}

/// `type` may be a single keyword or a list of keywords.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ShimSchemaType {
    /// `type: string`
    Single(String),
    /// `type: [string]`
    Multiple(Vec<String>),
}

/// `exclusiveMinimum` / `exclusiveMaximum`: a flag in 3.0, a standalone value in 3.1.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BoolOrNumber {
    /// OAS 3.0 form, modifying `minimum` / `maximum`.
    Flag(bool),
    /// OAS 3.1 form.
    Value(f64),
}

/// `items` / `additionalProperties`: a boolean schema or a full schema.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BoolOrSchema {
    /// `true` / `false`.
    Bool(bool),
    /// A (possibly referenced) schema.
    Schema(Box<ShimSchemaOrRef>),
}

/// Explicit state of a boolean-or-schema keyword.
#[derive(Debug, Clone, Copy)]
pub enum SchemaSlot<'a> {
    /// Keyword not present.
    Absent,
    /// Keyword set to `false`.
    Forbidden,
    /// Keyword set to `true`.
    Any,
    /// Keyword set to a schema.
    Schema(&'a ShimSchemaOrRef),
}

/// A Schema Object, restricted to the keywords the model compiler reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShimSchema {
    /// Declared type(s).
    #[serde(rename = "type")]
    pub schema_type: Option<ShimSchemaType>,
    /// Format tag, kept verbatim.
    pub format: Option<String>,
    /// Regular expression for strings, kept verbatim.
    pub pattern: Option<String>,
    /// Raw enum values, decoded later against the schema kind.
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<Value>>,

    /// Inclusive lower bound.
    pub minimum: Option<f64>,
    /// Inclusive upper bound.
    pub maximum: Option<f64>,
    /// Exclusive lower bound (either spelling).
    pub exclusive_minimum: Option<BoolOrNumber>,
    /// Exclusive upper bound (either spelling).
    pub exclusive_maximum: Option<BoolOrNumber>,
    /// Divisor constraint.
    pub multiple_of: Option<f64>,

    /// Minimum string length.
    pub min_length: Option<i64>,
    /// Maximum string length.
    pub max_length: Option<i64>,
    /// Minimum array length.
    pub min_items: Option<i64>,
    /// Maximum array length.
    pub max_items: Option<i64>,
    /// Minimum object size.
    pub min_properties: Option<i64>,
    /// Maximum object size.
    pub max_properties: Option<i64>,

    /// Array element schema.
    pub items: Option<BoolOrSchema>,
    /// Map value schema.
    pub additional_properties: Option<BoolOrSchema>,
    /// Declared properties, in document order.
    #[serde(default)]
    pub properties: IndexMap<String, ShimSchemaOrRef>,
    /// Names of required properties.
    #[serde(default)]
    pub required: Vec<String>,

    /// Free-form documentation.
    pub description: Option<String>,
    /// Deprecation flag.
    pub deprecated: Option<bool>,
    /// OAS 3.0 nullability flag.
    pub nullable: Option<bool>,

    /// Composition keywords; recorded only so they can be rejected.
    pub one_of: Option<Vec<Value>>,
    /// See `one_of`.
    pub any_of: Option<Vec<Value>>,
    /// See `one_of`.
    pub all_of: Option<Vec<Value>>,

    /// Everything else, including specification extensions (x-...).
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

impl ShimSchema {
    /// Declared type keywords, flattened to a list.
    pub fn types(&self) -> Vec<&str> {
        match &self.schema_type {
            None => Vec::new(),
            Some(ShimSchemaType::Single(t)) => vec![t.as_str()],
            Some(ShimSchemaType::Multiple(ts)) => ts.iter().map(String::as_str).collect(),
        }
    }

    /// Enum values, empty when absent.
    pub fn enum_values(&self) -> &[Value] {
        self.enum_values.as_deref().unwrap_or(&[])
    }

    /// State of the `items` keyword.
    pub fn items_slot(&self) -> SchemaSlot<'_> {
        slot(self.items.as_ref())
    }

    /// State of the `additionalProperties` keyword.
    pub fn additional_properties_slot(&self) -> SchemaSlot<'_> {
        slot(self.additional_properties.as_ref())
    }

    /// First composition keyword present, if any.
    pub fn composition_keyword(&self) -> Option<&'static str> {
        if self.one_of.is_some() {
            Some("oneOf")
        } else if self.any_of.is_some() {
            Some("anyOf")
        } else if self.all_of.is_some() {
            Some("allOf")
        } else {
            None
        }
    }

    /// Looks up a specification extension (`x-...`).
    pub fn extension(&self, name: &str) -> Option<&Value> {
        self.extensions.get(name)
    }

    /// Whether the schema is marked deprecated.
    pub fn is_deprecated(&self) -> bool {
        self.deprecated.unwrap_or(false)
    }
}

fn slot(value: Option<&BoolOrSchema>) -> SchemaSlot<'_> {
    match value {
        None => SchemaSlot::Absent,
        Some(BoolOrSchema::Bool(false)) => SchemaSlot::Forbidden,
        Some(BoolOrSchema::Bool(true)) => SchemaSlot::Any,
        Some(BoolOrSchema::Schema(s)) => SchemaSlot::Schema(s),
    }
}
