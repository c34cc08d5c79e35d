#![deny(missing_docs)]

//! # Declaration Registry
//!
//! Collects the declarations produced by one walk over `components.schemas`.
//! Declarations are indexed by ID and remembered in order: top level schemas in
//! document order, each followed by the declarations hoisted out of it in
//! depth-first property / items / additionalProperties order.
//!
//! The registry is filled by a single `collect` call and only read afterwards.
//! If `collect` fails, declarations added before the failure remain; callers
//! must discard the registry.

use crate::error::AppResult;
use crate::model::location::Location;
use crate::model::types::{Declaration, Type};
use crate::model::walker::Walker;
use crate::oas::shims::ShimOpenApi;
use std::collections::HashMap;

/// Knobs for generators that want more schemas named.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectOptions {
    /// Also hoist nested object schemas that declare properties.
    ///
    /// Off by default: nested objects stay inline, and only top level schemas and
    /// enum-bearing primitives become declarations.
    pub hoist_nested_objects: bool,
}

/// Ordered, ID-keyed collection of declarations.
#[derive(Debug, Default)]
pub struct Registry {
    decls: HashMap<String, Declaration>,
    ids: Vec<String>,
    options: CollectOptions,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry with custom collection options.
    pub fn with_options(options: CollectOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// The options this registry collects with.
    pub fn options(&self) -> CollectOptions {
        self.options
    }

    /// Walks every schema in `components.schemas`, in document order.
    ///
    /// Stops at the first error. A document without components yields no declarations.
    pub fn collect(&mut self, doc: &ShimOpenApi) -> AppResult<()> {
        let Some(components) = doc.components.as_ref() else {
            tracing::info!("document has no components; nothing to collect");
            return Ok(());
        };

        let mut walker = Walker::new(self, &components.schemas, doc.self_uri.as_deref());
        for (name, node) in &components.schemas {
            walker.visit(Location::new(name.as_str()), node)?;
        }

        tracing::info!(
            schemas = components.schemas.len(),
            declarations = self.ids.len(),
            "collected declarations"
        );
        Ok(())
    }

    /// Looks up a declaration by ID.
    pub fn get(&self, id: &str) -> Option<&Declaration> {
        self.decls.get(id)
    }

    /// Iterates declarations in insertion order. Return `false` to stop early.
    pub fn range<F>(&self, mut f: F)
    where
        F: FnMut(&str, &Declaration) -> bool,
    {
        for id in &self.ids {
            if let Some(decl) = self.decls.get(id) {
                if !f(id, decl) {
                    return;
                }
            }
        }
    }

    /// Declarations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> + '_ {
        self.ids.iter().filter_map(move |id| self.decls.get(id))
    }

    /// Declaration IDs in insertion order.
    ///
    /// After a failed `collect` this may name declarations that were never completed.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no declaration was collected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Reference IDs that name no declaration, in first-seen order.
    ///
    /// Opaque references (raw `$ref` strings pointing outside `components.schemas`)
    /// are not reported.
    pub fn dangling_refs(&self) -> Vec<String> {
        let mut missing: Vec<String> = Vec::new();
        for decl in self.iter() {
            decl.ty.walk(&mut |t| {
                let Some(id) = t.reference.as_deref() else {
                    return;
                };
                if !t.is_ref() || t.opaque || self.decls.contains_key(id) {
                    return;
                }
                if !missing.iter().any(|m| m == id) {
                    missing.push(id.to_string());
                }
            });
        }
        missing
    }

    /// Adds a declaration and returns its ID, built from `l`.
    pub(crate) fn add_decl(
        &mut self,
        l: Location,
        ty: Type,
        doc: Vec<String>,
        deprecated: bool,
    ) -> String {
        let id = self.reserve(&l);
        self.fill(id, l, ty, doc, deprecated)
    }

    /// Claims the next position in the order for `l` before its children are walked,
    /// so a parent precedes the declarations hoisted out of it.
    pub(crate) fn reserve(&mut self, l: &Location) -> String {
        let id = l.to_string();
        self.ids.push(id.clone());
        id
    }

    /// Stores the declaration for a previously reserved ID.
    pub(crate) fn fill(
        &mut self,
        id: String,
        l: Location,
        ty: Type,
        doc: Vec<String>,
        deprecated: bool,
    ) -> String {
        tracing::debug!(id = %id, kind = %ty.kind, "registered declaration");

        self.decls.insert(
            id.clone(),
            Declaration {
                id: id.clone(),
                ty,
                doc,
                loc: l,
                deprecated,
            },
        );
        id
    }
}
