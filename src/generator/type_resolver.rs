//! Schema node to TypeScript type expression.

use itertools::Itertools;

use super::text::{doc_inline, literal_text, member_name, string_literal};
use crate::document::{ReferenceOr, Schema, SchemaKind};

pub(crate) const ANY: &str = "any";
/// Type of an enumeration without values.
const NEVER: &str = "never";

/// Renders `node` as a type expression, or `None` when the node has no
/// renderable type (an object without properties, a missing or unknown type).
///
/// References are only named, never followed, optionally qualified with
/// `prefix` (`Models.User`).
pub fn resolve(node: &ReferenceOr<Schema>, prefix: Option<&str>) -> Option<String> {
    match node {
        ReferenceOr::Reference { .. } => {
            let name = node.reference_name()?;
            Some(match prefix {
                Some(prefix) => format!("{prefix}.{name}"),
                None => name.to_owned(),
            })
        }
        ReferenceOr::Item(schema) => resolve_schema(schema, prefix),
    }
}

fn resolve_schema(schema: &Schema, prefix: Option<&str>) -> Option<String> {
    match schema.kind? {
        SchemaKind::String => Some(match &schema.enumeration {
            Some(values) if values.is_empty() => NEVER.to_owned(),
            Some(values) => values
                .iter()
                .map(|value| string_literal(&literal_text(value)))
                .join(" | "),
            None if schema.format.as_deref() == Some("binary") => "Blob".to_owned(),
            None => "string".to_owned(),
        }),
        SchemaKind::Boolean => Some("boolean".to_owned()),
        SchemaKind::Number | SchemaKind::Integer => Some(match &schema.enumeration {
            Some(values) if values.is_empty() => NEVER.to_owned(),
            Some(values) => values.iter().map(literal_text).join(" | "),
            None => "number".to_owned(),
        }),
        SchemaKind::Null => Some("null".to_owned()),
        SchemaKind::Array => {
            let element = schema
                .items
                .as_deref()
                .and_then(|items| resolve(items, prefix))
                .unwrap_or_else(|| ANY.to_owned());
            Some(format!("{element}[]"))
        }
        SchemaKind::Object => {
            let properties = schema.properties.as_ref()?;
            if properties.is_empty() {
                return Some("{}".to_owned());
            }
            let members = properties
                .iter()
                .map(|(name, property)| {
                    let doc = property
                        .as_item()
                        .and_then(|p| p.description.as_deref())
                        .map(doc_inline)
                        .unwrap_or_default();
                    format!("{doc}{}", property_signature(name, property, prefix))
                })
                .join("; ");
            Some(format!("{{ {members} }}"))
        }
        SchemaKind::Unknown => None,
    }
}

/// `name?: type`, optional unless the property sets `nullable: false`.
pub(crate) fn property_signature(
    name: &str,
    property: &ReferenceOr<Schema>,
    prefix: Option<&str>,
) -> String {
    let optional = if is_required_property(property) { "" } else { "?" };
    let ty = resolve(property, prefix).unwrap_or_else(|| ANY.to_owned());
    format!("{}{optional}: {ty}", member_name(name))
}

pub(crate) fn is_required_property(property: &ReferenceOr<Schema>) -> bool {
    property.as_item().and_then(|schema| schema.nullable) == Some(false)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn node(value: serde_json::Value) -> ReferenceOr<Schema> {
        serde_json::from_value(value).unwrap()
    }

    fn resolved(value: serde_json::Value) -> Option<String> {
        resolve(&node(value), None)
    }

    #[test]
    fn primitives_map_to_fixed_tokens() {
        assert_eq!(resolved(json!({ "type": "string" })).unwrap(), "string");
        assert_eq!(resolved(json!({ "type": "boolean" })).unwrap(), "boolean");
        assert_eq!(resolved(json!({ "type": "number" })).unwrap(), "number");
        assert_eq!(resolved(json!({ "type": "integer", "format": "int64" })).unwrap(), "number");
        assert_eq!(resolved(json!({ "type": "null" })).unwrap(), "null");
    }

    #[test]
    fn binary_strings_are_blobs() {
        assert_eq!(
            resolved(json!({ "type": "string", "format": "binary" })).unwrap(),
            "Blob"
        );
    }

    #[test]
    fn string_enums_are_quoted_unions_in_declared_order() {
        assert_eq!(
            resolved(json!({ "type": "string", "enum": ["b", "a", "c"] })).unwrap(),
            "'b' | 'a' | 'c'"
        );
    }

    #[test]
    fn numeric_enums_are_bare_unions() {
        assert_eq!(
            resolved(json!({ "type": "integer", "enum": [3, 1, 2] })).unwrap(),
            "3 | 1 | 2"
        );
        assert_eq!(
            resolved(json!({ "type": "number", "enum": [0.5, 1] })).unwrap(),
            "0.5 | 1"
        );
    }

    #[test]
    fn empty_enums_have_no_inhabitants() {
        assert_eq!(resolved(json!({ "type": "string", "enum": [] })).unwrap(), "never");
        assert_eq!(resolved(json!({ "type": "integer", "enum": [] })).unwrap(), "never");
        assert_eq!(
            resolved(json!({ "type": "object", "properties": { "status": { "type": "string", "enum": [] } } }))
                .unwrap(),
            "{ status?: never }"
        );
    }

    #[test]
    fn references_use_the_component_name() {
        let reference = node(json!({ "$ref": "#/components/schemas/Pet" }));
        assert_eq!(resolve(&reference, None).unwrap(), "Pet");
        assert_eq!(resolve(&reference, Some("Models")).unwrap(), "Models.Pet");
    }

    #[test]
    fn arrays() {
        assert_eq!(resolved(json!({ "type": "array" })).unwrap(), "any[]");
        assert_eq!(
            resolved(json!({ "type": "array", "items": { "type": "string" } })).unwrap(),
            "string[]"
        );
        assert_eq!(
            resolved(json!({
                "type": "array",
                "items": { "type": "array", "items": { "$ref": "#/components/schemas/Tag" } }
            }))
            .unwrap(),
            "Tag[][]"
        );
        assert_eq!(
            resolved(json!({ "type": "array", "items": { "type": "object" } })).unwrap(),
            "any[]"
        );
    }

    #[test]
    fn prefix_reaches_nested_references() {
        let array = node(json!({ "type": "array", "items": { "$ref": "#/components/schemas/Tag" } }));
        assert_eq!(resolve(&array, Some("Models")).unwrap(), "Models.Tag[]");
    }

    #[test]
    fn objects_become_record_literals_in_insertion_order() {
        let ty = resolved(json!({
            "type": "object",
            "properties": {
                "name": { "type": "string", "nullable": false },
                "id": { "type": "integer", "description": "Primary key" },
                "x-tag": { "type": "object" }
            }
        }))
        .unwrap();
        assert_eq!(
            ty,
            "{ name: string; /** @description Primary key */ id?: number; 'x-tag'?: any }"
        );
    }

    #[test]
    fn objects_without_properties_are_absent() {
        assert_eq!(resolved(json!({ "type": "object" })), None);
        assert_eq!(resolved(json!({ "type": "object", "properties": {} })).unwrap(), "{}");
    }

    #[test]
    fn untyped_and_unknown_schemas_are_absent() {
        assert_eq!(resolved(json!({ "description": "anything" })), None);
        assert_eq!(resolved(json!({ "type": "file" })), None);
    }

    #[test]
    fn resolution_is_deterministic() {
        let schema = node(json!({
            "type": "object",
            "properties": {
                "b": { "type": "array", "items": { "type": "string", "enum": ["x", "y"] } },
                "a": { "$ref": "#/components/schemas/A" }
            }
        }));
        assert_eq!(resolve(&schema, None), resolve(&schema, None));
    }
}
