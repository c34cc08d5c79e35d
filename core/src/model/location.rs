#![deny(missing_docs)]

//! # Schema Locations
//!
//! A `Location` names the schema node a declaration came from: the root schema
//! name in `components.schemas` plus the structural path walked from it.
//! Its string form is the declaration ID.
//!
//! Extending a location never touches the receiver. Sibling branches of the
//! traversal share a prefix, so every `with_*` call builds a fresh segment list.

use serde::Serialize;
use std::fmt;

/// One structural step from a schema to a nested schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "camelCase")]
pub enum Segment {
    /// `properties/<name>`
    Property(String),
    /// `additionalProperties`
    AdditionalProperties,
    /// `items`
    Items,
}

/// Where a schema node lives in the document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    /// Name of the top level schema.
    pub root: String,
    /// Path from the root to the node; empty for top level schemas.
    pub path: Vec<Segment>,
}

impl Location {
    /// A top level location.
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            path: Vec::new(),
        }
    }

    /// Whether this is a top level schema (no path).
    pub fn is_top_level(&self) -> bool {
        self.path.is_empty()
    }

    /// The location of property `name` of this object schema.
    pub fn with_property(&self, name: &str) -> Self {
        self.with_segment(Segment::Property(name.to_string()))
    }

    /// The location of this object schema's `additionalProperties` schema.
    pub fn with_additional_properties(&self) -> Self {
        self.with_segment(Segment::AdditionalProperties)
    }

    /// The location of this array schema's `items` schema.
    pub fn with_items(&self) -> Self {
        self.with_segment(Segment::Items)
    }

    fn with_segment(&self, segment: Segment) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend(self.path.iter().cloned());
        path.push(segment);
        Self {
            root: self.root.clone(),
            path,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.root)?;
        for seg in &self.path {
            match seg {
                Segment::Property(name) => write!(f, "/properties/{}", name)?,
                Segment::AdditionalProperties => f.write_str("/additionalProperties")?,
                Segment::Items => f.write_str("/items")?,
            }
        }
        Ok(())
    }
}
