//! `$ref` discovery inside OpenAPI schema fragments

use serde_json::Value as JsonValue;
use std::collections::BTreeSet;

const REF_KEY: &str = "$ref";

/// Bare schema name from a JSON pointer such as `#/components/schemas/Pet`
///
/// Returns everything after the final `/`; a pointer without `/` is returned
/// unchanged.
pub fn schema_name_from_pointer(pointer: &str) -> &str {
    pointer.rsplit('/').next().unwrap_or(pointer)
}

/// Collect the distinct schema names referenced anywhere under `schema`
///
/// Walks nested objects and arrays; every string found at a `$ref` key
/// contributes its bare schema name. The value under a `$ref` key is not
/// descended into.
pub fn collect_schema_references(schema: &JsonValue) -> BTreeSet<String> {
    let mut refs = BTreeSet::new();
    collect_into(schema, &mut refs);
    refs
}

fn collect_into(value: &JsonValue, refs: &mut BTreeSet<String>) {
    match value {
        JsonValue::Object(map) => {
            for (key, child) in map {
                if key == REF_KEY {
                    if let Some(pointer) = child.as_str() {
                        refs.insert(schema_name_from_pointer(pointer).to_string());
                    }
                } else {
                    collect_into(child, refs);
                }
            }
        }
        JsonValue::Array(items) => {
            for item in items {
                collect_into(item, refs);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_name_from_pointer() {
        assert_eq!(schema_name_from_pointer("#/components/schemas/Pet"), "Pet");
        assert_eq!(schema_name_from_pointer("Pet"), "Pet");
        assert_eq!(schema_name_from_pointer("other.json#/defs/Tag"), "Tag");
    }

    #[test]
    fn test_collects_nested_refs_without_duplicates() {
        let schema = json!({
            "type": "object",
            "properties": {
                "data": {
                    "type": "array",
                    "items": {"$ref": "#/components/schemas/Pet"}
                },
                "owner": {"$ref": "#/components/schemas/User"},
                "previous": {"$ref": "#/components/schemas/Pet"}
            },
            "allOf": [
                {"$ref": "#/components/schemas/Envelope"},
                {"oneOf": [{"$ref": "#/components/schemas/User"}]}
            ]
        });

        let refs = collect_schema_references(&schema);
        let names: Vec<&str> = refs.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["Envelope", "Pet", "User"]);
    }

    #[test]
    fn test_scalar_and_empty_values_have_no_refs() {
        assert!(collect_schema_references(&json!("string")).is_empty());
        assert!(collect_schema_references(&json!({})).is_empty());
        assert!(collect_schema_references(&json!([1, 2, null])).is_empty());
    }

    #[test]
    fn test_non_string_ref_is_ignored() {
        let schema = json!({"$ref": {"nested": "#/components/schemas/Pet"}});
        assert!(collect_schema_references(&schema).is_empty());
    }

    #[test]
    fn test_walk_is_repeatable() {
        let schema = json!({"items": [{"$ref": "#/a/B"}, {"$ref": "#/a/C"}]});
        assert_eq!(
            collect_schema_references(&schema),
            collect_schema_references(&schema)
        );
    }
}
