#![deny(missing_docs)]

//! # Declaration Model
//!
//! Compiles OpenAPI schemas into a generic, language-agnostic model that code
//! generators render from. Nothing here emits code.
//!
//! - **location**: Stable identifiers for schema nodes.
//! - **types**: `Type`, `Field`, `EnumConst`, `Declaration`.
//! - **registry**: Ordered collection of declarations, filled by one walk.
//! - **walker**: The per-type traversal and hoisting rules.
//! - **bounds**: Numeric bound consolidation across OpenAPI 3.0 / 3.1.
//! - **enums**: Enum constants and their vendor extensions.
//! - **naming**: Unique type names for declarations.

pub mod bounds;
pub mod enums;
pub mod location;
pub mod naming;
pub mod registry;
pub mod types;
pub(crate) mod walker;

pub use location::{Location, Segment};
pub use naming::{base_name, const_name, NameAllocator, NameTable};
pub use registry::{CollectOptions, Registry};
pub use types::{Declaration, EnumConst, Field, Literal, Type, TypeKind};

use serde::Serialize;

/// A declaration together with its assigned type name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedDeclaration<'a> {
    /// Type name from the naming pass.
    pub name: &'a str,
    /// The declaration itself.
    #[serde(flatten)]
    pub decl: &'a Declaration,
}

/// The artifact handed to generators: every declaration, named, in registry order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelDocument<'a> {
    /// Target package name, if the caller supplied one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<&'a str>,
    /// Named declarations.
    pub declarations: Vec<NamedDeclaration<'a>>,
}

impl<'a> ModelDocument<'a> {
    /// Pairs every declaration of `registry` with its name from `names`.
    ///
    /// Declarations without an entry in `names` are skipped; build `names` from the same registry.
    pub fn new(registry: &'a Registry, names: &'a NameTable, package: Option<&'a str>) -> Self {
        let declarations = registry
            .iter()
            .filter_map(|decl| {
                names
                    .get(&decl.id)
                    .map(|name| NamedDeclaration { name, decl })
            })
            .collect();
        Self {
            package,
            declarations,
        }
    }
}
