#![deny(missing_docs)]

//! # oapigen Core
//!
//! Compiles the schemas of an OpenAPI document into an ordered registry of
//! named declarations for downstream code generators.

/// Shared error types.
pub mod error;

/// Declaration model: locations, types, registry, walker, naming.
pub mod model;

/// OpenAPI (OAS) document parsing.
pub mod oas;

pub use error::{AppError, AppResult};
pub use model::{
    CollectOptions, Declaration, EnumConst, Field, Literal, Location, ModelDocument,
    NameAllocator, NameTable, NamedDeclaration, Registry, Segment, Type, TypeKind,
};
pub use oas::{parse_openapi_document, ShimOpenApi};

/// Parses a YAML / JSON OpenAPI document and collects its declarations.
///
/// # Arguments
///
/// * `content` - The raw document text.
/// * `options` - Hoisting knobs; `CollectOptions::default()` for the standard rules.
///
/// # Returns
///
/// * `Registry` - Every declaration, in document / traversal order.
pub fn compile_schemas(content: &str, options: CollectOptions) -> AppResult<Registry> {
    let doc = parse_openapi_document(content)?;
    let mut registry = Registry::with_options(options);
    registry.collect(&doc)?;
    Ok(registry)
}
