#![deny(missing_docs)]

//! # Schema Walker
//!
//! Depth-first traversal mapping schema nodes to `Type`s.
//!
//! Hoisting rules (which nodes become declarations):
//! - every top level schema, including top level `$ref` aliases;
//! - every enum-bearing `string` / `integer` / `number` / `boolean` schema, at any depth;
//! - nested objects with properties, only when `CollectOptions::hoist_nested_objects` is set.
//!
//! Anything else is returned inline. A hoisted node is returned as a `Ref` type
//! pointing at its new declaration.

use crate::error::{AppError, AppResult};
use crate::model::bounds::{integral, numeric_bounds};
use crate::model::enums::{
    decode_bool, decode_float64, decode_int32, decode_int64, decode_str, make_consts, Decoder,
};
use crate::model::location::Location;
use crate::model::registry::Registry;
use crate::model::types::{doc_lines, Field, Type, TypeKind};
use crate::oas::ref_utils::{classify_schema_ref, local_schema_name, SchemaRef};
use crate::oas::shims::{SchemaSlot, ShimSchema, ShimSchemaOrRef};
use indexmap::IndexMap;

/// Per-field annotations read from a property node.
struct FieldMeta {
    doc: Vec<String>,
    deprecated: bool,
    nullable: bool,
}

/// Walks schema nodes, registering declarations as it goes.
pub(crate) struct Walker<'a> {
    registry: &'a mut Registry,
    schemas: &'a IndexMap<String, ShimSchemaOrRef>,
    self_uri: Option<&'a str>,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(
        registry: &'a mut Registry,
        schemas: &'a IndexMap<String, ShimSchemaOrRef>,
        self_uri: Option<&'a str>,
    ) -> Self {
        Self {
            registry,
            schemas,
            self_uri,
        }
    }

    /// Converts one schema node into a `Type`.
    pub(crate) fn visit(&mut self, l: Location, node: &ShimSchemaOrRef) -> AppResult<Type> {
        tracing::trace!(location = %l, "visiting schema");

        let schema = match node {
            ShimSchemaOrRef::Ref(r) => {
                let ty = match classify_schema_ref(&r.ref_location, self.self_uri) {
                    SchemaRef::Local(id) => Type::reference(id),
                    SchemaRef::Opaque(raw) => Type::opaque_reference(raw),
                };
                if !l.is_top_level() {
                    return Ok(ty);
                }
                let id = self.registry.add_decl(
                    l,
                    ty,
                    doc_lines(r.description.as_deref()),
                    r.deprecated.unwrap_or(false),
                );
                return Ok(Type::reference(id));
            }
            ShimSchemaOrRef::Schema(s) => s.as_ref(),
        };

        if let Some(keyword) = schema.composition_keyword() {
            return Err(AppError::Composition {
                location: l.to_string(),
                keyword: keyword.to_string(),
            });
        }

        let types = schema.types();
        match types.as_slice() {
            [] => Err(AppError::MissingType {
                location: l.to_string(),
            }),
            ["string"] => self.visit_str(l, schema),
            ["integer"] => self.visit_int(l, schema),
            ["number"] => self.visit_num(l, schema),
            ["boolean"] => self.visit_bool(l, schema),
            ["array"] => self.visit_arr(l, schema),
            ["object"] => self.visit_obj(l, schema),
            [other] => Err(AppError::UnsupportedType {
                location: l.to_string(),
                type_name: other.to_string(),
            }),
            _ => Err(AppError::MultipleTypes {
                location: l.to_string(),
            }),
        }
    }

    /// Registers `ty` when `hoist` is set and returns a reference to it; otherwise returns `ty`.
    fn finish(&mut self, l: Location, ty: Type, schema: &ShimSchema, hoist: bool) -> Type {
        let slot = hoist.then(|| self.registry.reserve(&l));
        self.finish_reserved(slot, l, ty, schema)
    }

    /// Completes a declaration whose position was reserved before walking its children.
    fn finish_reserved(
        &mut self,
        slot: Option<String>,
        l: Location,
        ty: Type,
        schema: &ShimSchema,
    ) -> Type {
        let Some(id) = slot else {
            return ty;
        };
        let id = self.registry.fill(
            id,
            l,
            ty,
            doc_lines(schema.description.as_deref()),
            schema.is_deprecated(),
        );
        Type::reference(id)
    }

    fn visit_str(&mut self, l: Location, schema: &ShimSchema) -> AppResult<Type> {
        let mut typ = Type {
            pattern: schema.pattern.clone(),
            format: schema.format.clone(),
            ..Type::new(TypeKind::String)
        };
        typ.set_length_bounds(schema.min_length, schema.max_length);
        typ.enum_consts = make_consts(schema, &l, decode_str)?;

        let hoist = l.is_top_level() || !typ.enum_consts.is_empty();
        Ok(self.finish(l, typ, schema, hoist))
    }

    fn visit_int(&mut self, l: Location, schema: &ShimSchema) -> AppResult<Type> {
        let (kind, decoder): (TypeKind, Decoder) = match schema.format.as_deref() {
            Some("int32") => (TypeKind::Int32, decode_int32),
            _ => (TypeKind::Int64, decode_int64),
        };

        let mut typ = Type::new(kind);
        typ.enum_consts = make_consts(schema, &l, decoder)?;

        let b = numeric_bounds(schema);
        typ.max = integral(b.max, &l, "maximum or exclusiveMaximum")?;
        typ.excl_max = b.excl_max;
        typ.min = integral(b.min, &l, "minimum or exclusiveMinimum")?;
        typ.excl_min = b.excl_min;
        typ.multiple_of = integral(schema.multiple_of, &l, "multipleOf")?;

        let hoist = l.is_top_level() || !typ.enum_consts.is_empty();
        Ok(self.finish(l, typ, schema, hoist))
    }

    fn visit_num(&mut self, l: Location, schema: &ShimSchema) -> AppResult<Type> {
        let mut typ = Type::new(TypeKind::Float64);
        typ.enum_consts = make_consts(schema, &l, decode_float64)?;

        let b = numeric_bounds(schema);
        typ.max_f = b.max;
        typ.excl_max = b.excl_max;
        typ.min_f = b.min;
        typ.excl_min = b.excl_min;

        let hoist = l.is_top_level() || !typ.enum_consts.is_empty();
        Ok(self.finish(l, typ, schema, hoist))
    }

    fn visit_bool(&mut self, l: Location, schema: &ShimSchema) -> AppResult<Type> {
        let mut typ = Type::new(TypeKind::Bool);
        typ.enum_consts = make_consts(schema, &l, decode_bool)?;

        let hoist = l.is_top_level() || !typ.enum_consts.is_empty();
        Ok(self.finish(l, typ, schema, hoist))
    }

    fn visit_arr(&mut self, l: Location, schema: &ShimSchema) -> AppResult<Type> {
        let slot = l.is_top_level().then(|| self.registry.reserve(&l));

        let mut typ = Type::new(TypeKind::Array);
        typ.set_length_bounds(schema.min_items, schema.max_items);

        let elem = match schema.items_slot() {
            SchemaSlot::Absent | SchemaSlot::Any => Type::unknown(),
            SchemaSlot::Forbidden => {
                // No item may appear: the only valid instance is the empty array.
                typ.len = Some(0);
                typ.min = None;
                typ.max = None;
                Type::unknown()
            }
            SchemaSlot::Schema(node) => self.visit(l.with_items(), node)?,
        };
        typ.elem = Some(Box::new(elem));

        Ok(self.finish_reserved(slot, l, typ, schema))
    }

    fn visit_obj(&mut self, l: Location, schema: &ShimSchema) -> AppResult<Type> {
        let hoist = l.is_top_level()
            || (self.registry.options().hoist_nested_objects && !schema.properties.is_empty());
        let slot = hoist.then(|| self.registry.reserve(&l));

        let mut typ = Type::new(TypeKind::Object);
        typ.set_length_bounds(schema.min_properties, schema.max_properties);

        // Resolved first: map-like renderings need the value type even when fields exist.
        typ.elem = self.visit_additional_props(&l, schema)?.map(Box::new);

        if schema.properties.is_empty() {
            return Ok(self.finish_reserved(slot, l, typ, schema));
        }

        typ.fields = Vec::with_capacity(schema.properties.len());
        for (name, prop) in &schema.properties {
            let ft = self.visit(l.with_property(name), prop)?;
            let meta = self.field_meta(prop);

            typ.fields.push(Field {
                name: name.clone(),
                ty: ft,
                required: schema.required.iter().any(|r| r == name),
                deprecated: meta.deprecated,
                nullable: meta.nullable,
                doc: meta.doc,
            });
        }

        Ok(self.finish_reserved(slot, l, typ, schema))
    }

    /// `None` means additional properties are forbidden; unset and `true` both allow any value.
    fn visit_additional_props(
        &mut self,
        l: &Location,
        schema: &ShimSchema,
    ) -> AppResult<Option<Type>> {
        match schema.additional_properties_slot() {
            SchemaSlot::Absent | SchemaSlot::Any => Ok(Some(Type::unknown())),
            SchemaSlot::Forbidden => Ok(None),
            SchemaSlot::Schema(node) => self.visit(l.with_additional_properties(), node).map(Some),
        }
    }

    /// Reads field annotations, following a `$ref` one level when the reference has no siblings.
    fn field_meta(&self, prop: &ShimSchemaOrRef) -> FieldMeta {
        match prop {
            ShimSchemaOrRef::Schema(s) => FieldMeta {
                doc: doc_lines(s.description.as_deref()),
                deprecated: s.is_deprecated(),
                nullable: s.nullable.unwrap_or(false),
            },
            ShimSchemaOrRef::Ref(r) => {
                let target = self.resolve_local(&r.ref_location);
                let description = r
                    .description
                    .as_deref()
                    .or_else(|| target.and_then(|t| t.description.as_deref()));
                let deprecated = r
                    .deprecated
                    .or_else(|| target.and_then(|t| t.deprecated))
                    .unwrap_or(false);

                FieldMeta {
                    doc: doc_lines(description),
                    deprecated,
                    nullable: target.and_then(|t| t.nullable).unwrap_or(false),
                }
            }
        }
    }

    /// Resolves a local schema `$ref` to its inline component schema (no ref chains).
    fn resolve_local(&self, ref_str: &str) -> Option<&'a ShimSchema> {
        let name = local_schema_name(ref_str, self.self_uri)?;
        match self.schemas.get(&name)? {
            ShimSchemaOrRef::Schema(s) => Some(s.as_ref()),
            ShimSchemaOrRef::Ref(_) => None,
        }
    }
}
