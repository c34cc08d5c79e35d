#![deny(missing_docs)]

//! # Reference Utilities
//!
//! Shared helpers for turning schema `$ref` strings into declaration IDs, with
//! respect to OAS 3.2 `$self`.
//!
//! These utilities never fetch external documents, but allow absolute or relative
//! references to be treated as local when the document part matches the current
//! document's `$self` URI.

use percent_encoding::percent_decode_str;
use std::path::Path;
use url::Url;

const SCHEMAS_POINTER: &str = "/components/schemas/";

/// Splits a reference into its document part and optional fragment.
fn split_reference(ref_str: &str) -> (&str, Option<&str>) {
    match ref_str.split_once('#') {
        Some((doc, frag)) => (doc, Some(frag)),
        None => (ref_str, None),
    }
}

/// Normalizes a `$ref` to a local JSON Pointer (e.g. `#/components/...`) if it targets the
/// current document as identified by `$self`.
///
/// Returns `None` if the reference is external or lacks a fragment.
pub(crate) fn normalize_ref_to_local(ref_str: &str, self_uri: Option<&str>) -> Option<String> {
    let (document, fragment) = split_reference(ref_str);
    let fragment = fragment?;

    if document.is_empty() {
        return Some(format!("#{}", fragment));
    }

    let self_uri = self_uri?;
    if ref_doc_matches_self(document, self_uri) {
        return Some(format!("#{}", fragment));
    }
    None
}

/// What a schema `$ref` points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SchemaRef {
    /// `#/components/schemas/<name>` (possibly via `$self`), carrying the decoded `<name>`.
    Local(String),
    /// Any other target, kept verbatim. It has no declaration and is left to the generator.
    Opaque(String),
}

/// Classifies a schema `$ref` as a local component schema or an opaque target.
pub(crate) fn classify_schema_ref(ref_str: &str, self_uri: Option<&str>) -> SchemaRef {
    match local_schema_name(ref_str, self_uri) {
        Some(name) => SchemaRef::Local(name),
        None => SchemaRef::Opaque(ref_str.to_string()),
    }
}

/// Extracts the component schema name from a local `$ref`, if it is one.
pub(crate) fn local_schema_name(ref_str: &str, self_uri: Option<&str>) -> Option<String> {
    let local = normalize_ref_to_local(ref_str, self_uri)?;
    let name_seg = local.trim_start_matches('#').strip_prefix(SCHEMAS_POINTER)?;

    // Pointers deeper than the schema itself (e.g. `.../User/properties/id`) are not declarations.
    if name_seg.is_empty() || name_seg.contains('/') {
        return None;
    }
    Some(decode_pointer_segment(name_seg))
}

/// Decodes a JSON Pointer segment (handles `~1` and `~0`).
pub(crate) fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}

fn ref_doc_matches_self(ref_doc: &str, self_uri: &str) -> bool {
    if ref_doc == self_uri {
        return true;
    }

    if let (Ok(ref_url), Ok(self_url)) = (Url::parse(ref_doc), Url::parse(self_uri)) {
        return ref_url.scheme() == self_url.scheme()
            && ref_url.host() == self_url.host()
            && ref_url.port() == self_url.port()
            && ref_url.path() == self_url.path();
    }

    // If `$self` is an absolute-path reference (e.g. "/api/openapi"), compare path.
    if self_uri.starts_with('/') {
        if let Ok(ref_url) = Url::parse(ref_doc) {
            return ref_url.path() == self_uri;
        }
    }

    // Fallback: compare raw relative paths.
    if !self_uri.contains("://") && !ref_doc.contains("://") {
        return Path::new(ref_doc) == Path::new(self_uri);
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_ref_local_passthrough() {
        let normalized = normalize_ref_to_local("#/components/schemas/User", None).unwrap();
        assert_eq!(normalized, "#/components/schemas/User");
    }

    #[test]
    fn test_normalize_ref_self_absolute_match() {
        let self_uri = Some("https://example.com/openapi.yaml");
        let ref_str = "https://example.com/openapi.yaml#/components/schemas/User";
        let normalized = normalize_ref_to_local(ref_str, self_uri).unwrap();
        assert_eq!(normalized, "#/components/schemas/User");
    }

    #[test]
    fn test_normalize_ref_self_path_match() {
        let self_uri = Some("/api/openapi.yaml");
        let ref_str = "https://example.com/api/openapi.yaml#/components/schemas/User";
        let normalized = normalize_ref_to_local(ref_str, self_uri).unwrap();
        assert_eq!(normalized, "#/components/schemas/User");
    }

    #[test]
    fn test_normalize_ref_external_without_self() {
        assert!(normalize_ref_to_local("other.yaml#/components/schemas/User", None).is_none());
    }

    #[test]
    fn test_classify_schema_ref_local_and_opaque() {
        let local = |s: &str| SchemaRef::Local(s.to_string());
        let opaque = |s: &str| SchemaRef::Opaque(s.to_string());

        assert_eq!(classify_schema_ref("#/components/schemas/Pet", None), local("Pet"));
        assert_eq!(
            classify_schema_ref("#/components/parameters/Limit", None),
            opaque("#/components/parameters/Limit")
        );
        assert_eq!(
            classify_schema_ref("common.yaml#/components/schemas/Pet", None),
            opaque("common.yaml#/components/schemas/Pet")
        );
        assert_eq!(classify_schema_ref("common.yaml", None), opaque("common.yaml"));
        assert_eq!(classify_schema_ref("./pet.json", None), opaque("./pet.json"));
        assert_eq!(
            classify_schema_ref(
                "https://example.com/openapi.yaml#/components/schemas/Pet",
                Some("https://example.com/openapi.yaml")
            ),
            local("Pet")
        );
    }

    #[test]
    fn test_nested_pointer_is_not_a_declaration() {
        assert!(local_schema_name("#/components/schemas/User/properties/id", None).is_none());
    }

    #[test]
    fn test_decode_pointer_segment_percent_encoding() {
        let encoded = "User%20Profile~1details";
        let decoded = decode_pointer_segment(encoded);
        assert_eq!(decoded, "User Profile/details");
    }
}
