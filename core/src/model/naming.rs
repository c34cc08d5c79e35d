#![deny(missing_docs)]

//! # Declaration Naming
//!
//! Assigns each declaration a unique UpperCamelCase type name, and builds
//! identifiers for enum constants.
//!
//! Names are derived from the declaration's location: the root schema name,
//! then `+<Property>` per property segment, `+Item` for `items`, and `+Entry`
//! for `additionalProperties`. Collisions are resolved with a counter owned by
//! the allocator of one naming pass.

use crate::model::location::{Location, Segment};
use crate::model::registry::Registry;
use crate::model::types::{EnumConst, Literal};
use heck::ToUpperCamelCase;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Hands out unique type names.
#[derive(Debug, Default)]
pub struct NameAllocator {
    taken: HashSet<String>,
    counter: usize,
}

impl NameAllocator {
    /// Creates an allocator with no names taken.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves `name` (typically a target-language keyword) so it is never handed out.
    pub fn reserve(&mut self, name: impl Into<String>) {
        self.taken.insert(name.into());
    }

    /// Returns `base`, or `base` plus a counter value if `base` is taken.
    pub fn allocate(&mut self, base: &str) -> String {
        let mut name = base.to_string();
        while self.taken.contains(&name) {
            self.counter += 1;
            name = format!("{}{}", base, self.counter);
        }
        self.taken.insert(name.clone());
        name
    }
}

/// Declaration ID → type name, in registry order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NameTable {
    names: IndexMap<String, String>,
}

impl NameTable {
    /// Names every declaration of `registry`, in registry order.
    pub fn build(registry: &Registry, allocator: &mut NameAllocator) -> Self {
        let mut names = IndexMap::with_capacity(registry.len());
        registry.range(|id, decl| {
            let name = allocator.allocate(&base_name(&decl.loc));
            names.insert(id.to_string(), name);
            true
        });
        Self { names }
    }

    /// The type name of declaration `id`.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// `(id, name)` pairs in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// The unallocated type name for a location.
pub fn base_name(l: &Location) -> String {
    let mut name = title(&l.root);
    for seg in &l.path {
        match seg {
            Segment::Property(prop) => name.push_str(&title(prop)),
            Segment::Items => name.push_str("Item"),
            Segment::AdditionalProperties => name.push_str("Entry"),
        }
    }
    name
}

/// Identifier of an enum constant within declaration `decl_name`.
///
/// Uses the `x-enum-varnames` name when present, otherwise the literal value.
pub fn const_name(decl_name: &str, c: &EnumConst) -> String {
    let suffix = if c.name.is_empty() {
        literal_suffix(&c.value)
    } else {
        title(&c.name)
    };
    format!("{}{}", decl_name, suffix)
}

fn literal_suffix(value: &Literal) -> String {
    let raw = match value {
        Literal::Float64(v) => v.to_string().replace('.', "_"),
        other => other.to_string(),
    };
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.as_str()),
    };

    let mut suffix = if negative { "Neg".to_string() } else { String::new() };
    let titled = title(digits);
    if titled.is_empty() {
        suffix.push_str("Empty");
    } else {
        suffix.push_str(&titled);
    }
    suffix
}

fn title(s: &str) -> String {
    // heck drops underscores between digits; keep them so `1_5` and `15` stay distinct.
    if s.chars().all(|c| c.is_ascii_digit() || c == '_') {
        return s.to_string();
    }
    s.to_upper_camel_case()
}
