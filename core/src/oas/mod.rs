#![deny(missing_docs)]

//! # OpenAPI Document Layer
//!
//! - **shims**: Deserialization structs for the document root and Schema Objects.
//! - **normalization**: Raw-value rewrites applied before deserializing.
//! - **document**: Parsing entry points (YAML / JSON).
//! - **ref_utils**: `$ref` to declaration ID resolution, `$self` aware.

pub mod document;
pub(crate) mod normalization;
pub(crate) mod ref_utils;
pub mod shims;

pub use document::{parse_openapi_document, parse_openapi_value};
pub use shims::{
    BoolOrNumber, BoolOrSchema, SchemaSlot, ShimComponents, ShimOpenApi, ShimReference,
    ShimSchema, ShimSchemaOrRef, ShimSchemaType,
};
