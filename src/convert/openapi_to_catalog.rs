//! OpenAPI to catalog converter
//!
//! Converts an OpenAPI 3.x JSON document into catalog import records:
//! - the API itself
//! - one Data Structure per `components.schemas` entry
//! - one Data Element per schema property, linked to its schema and to any
//!   schema it references
//! - one endpoint asset per `path` + `method`, linked to the API
//! - one Code Value per response code, linked to its endpoint and to every
//!   schema reachable from its response body
//!
//! Records are emitted in the document's own key order.

use crate::convert::ConversionError;
use crate::convert::references::{collect_schema_references, schema_name_from_pointer};
use crate::models::import_record::{
    API_ENDPOINT_RELATION, AssetIdentifier, CODE_VALUE_TYPE, DATA_ELEMENT_RELATION,
    DATA_ELEMENT_TYPE, DATA_STRUCTURE_TYPE, DomainRef, ImportRecord, RelationDirection,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::path::Path;
use tracing::{debug, error, info};

/// Description used for the API asset when `info.description` is absent
pub const DEFAULT_API_DESCRIPTION: &str = "No description provided";

/// Operation keys of an OpenAPI path item
const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Separator between the parts of a Code Value name
const CODE_VALUE_SEPARATOR: &str = ">";

/// Governance names used to scope every generated record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterSettings {
    /// Community owning all referenced domains
    pub community_name: String,
    /// Domain for schemas, properties and endpoints
    pub data_assets_domain: String,
    /// Domain for the API asset
    pub api_assets_domain: String,
    /// Domain for response code values
    pub code_values_domain: String,
    /// Catalog type of the API asset
    pub api_type: String,
    /// Catalog type of endpoint assets
    pub endpoint_type: String,
}

impl ConverterSettings {
    fn data_assets(&self) -> DomainRef {
        DomainRef::new(&self.data_assets_domain, &self.community_name)
    }

    fn api_assets(&self) -> DomainRef {
        DomainRef::new(&self.api_assets_domain, &self.community_name)
    }

    fn code_values(&self) -> DomainRef {
        DomainRef::new(&self.code_values_domain, &self.community_name)
    }
}

/// OpenAPI to catalog converter
#[derive(Debug, Clone)]
pub struct OpenAPIToCatalogConverter {
    settings: ConverterSettings,
}

impl OpenAPIToCatalogConverter {
    pub fn new(settings: ConverterSettings) -> Self {
        Self { settings }
    }

    /// Read an OpenAPI JSON file and convert it
    pub fn convert_file(&self, path: &Path) -> Result<Vec<ImportRecord>, ConversionError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConversionError::Io(format!("{}: {}", path.display(), e)))?;
        self.convert_str(&content)
    }

    /// Parse OpenAPI JSON content and convert it
    pub fn convert_str(&self, content: &str) -> Result<Vec<ImportRecord>, ConversionError> {
        let document: JsonValue = serde_json::from_str(content)
            .map_err(|e| ConversionError::InvalidJson(e.to_string()))?;
        self.convert(&document)
    }

    /// Convert a parsed OpenAPI document into import records
    ///
    /// # Returns
    ///
    /// `[API record] + [schema and property records] + [endpoint and response
    /// code records]`, or an error if `info.title` or `info.description`
    /// cannot be extracted. Either failure aborts the whole conversion.
    pub fn convert(&self, document: &JsonValue) -> Result<Vec<ImportRecord>, ConversionError> {
        let (title, description) = extract_title_and_description(document)?;

        let mut records = vec![ImportRecord::asset(
            title.as_str(),
            self.settings.api_assets(),
            self.settings.api_type.as_str(),
            description,
        )];

        let schema_records = self.convert_schemas(document);
        let path_records = self.convert_paths(document, &title);

        info!(
            "Converted OpenAPI '{}': {} schema/property records, {} endpoint/response records",
            title,
            schema_records.len(),
            path_records.len()
        );

        records.extend(schema_records);
        records.extend(path_records);
        Ok(records)
    }

    /// One Data Structure per schema, each followed by its Data Elements
    fn convert_schemas(&self, document: &JsonValue) -> Vec<ImportRecord> {
        let Some(schemas) = document
            .get("components")
            .and_then(|c| c.get("schemas"))
            .and_then(JsonValue::as_object)
            .filter(|s| !s.is_empty())
        else {
            error!("No schemas found in the OpenAPI document");
            return Vec::new();
        };

        let mut records = Vec::new();
        for (schema_name, schema) in schemas {
            debug!("Converting schema '{}'", schema_name);
            records.push(ImportRecord::asset(
                schema_name.as_str(),
                self.settings.data_assets(),
                DATA_STRUCTURE_TYPE,
                "",
            ));
            records.extend(self.convert_properties(schema_name, schema));
        }
        records
    }

    fn convert_properties(&self, schema_name: &str, schema: &JsonValue) -> Vec<ImportRecord> {
        let Some(properties) = schema.get("properties").and_then(JsonValue::as_object) else {
            return Vec::new();
        };

        properties
            .iter()
            .map(|(property_name, property)| {
                let description = property
                    .get("description")
                    .and_then(JsonValue::as_str)
                    .unwrap_or_default();

                let mut record = ImportRecord::asset(
                    property_name.as_str(),
                    self.settings.data_assets(),
                    DATA_ELEMENT_TYPE,
                    description,
                )
                .with_relation(
                    DATA_ELEMENT_RELATION,
                    RelationDirection::Source,
                    AssetIdentifier::new(schema_name, self.settings.data_assets()),
                );

                if let Some(pointer) = property_reference(property) {
                    record.add_relation(
                        DATA_ELEMENT_RELATION,
                        RelationDirection::Target,
                        AssetIdentifier::new(
                            schema_name_from_pointer(pointer),
                            self.settings.data_assets(),
                        ),
                    );
                }

                record
            })
            .collect()
    }

    /// One endpoint per `path` + `method`, each followed by its response codes
    fn convert_paths(&self, document: &JsonValue, title: &str) -> Vec<ImportRecord> {
        let Some(paths) = document.get("paths").and_then(JsonValue::as_object) else {
            return Vec::new();
        };

        let mut records = Vec::new();
        for (path, path_item) in paths {
            let Some(operations) = path_item.as_object() else {
                continue;
            };

            for (method, operation) in operations {
                if !HTTP_METHODS.contains(&method.to_ascii_lowercase().as_str()) {
                    continue;
                }

                let endpoint_name = format!("{} {}", method.to_uppercase(), path);
                let description = operation
                    .get("description")
                    .and_then(JsonValue::as_str)
                    .unwrap_or_default();

                debug!("Converting endpoint '{}'", endpoint_name);
                records.push(
                    ImportRecord::asset(
                        endpoint_name.as_str(),
                        self.settings.data_assets(),
                        self.settings.endpoint_type.as_str(),
                        description,
                    )
                    .with_relation(
                        API_ENDPOINT_RELATION,
                        RelationDirection::Target,
                        AssetIdentifier::new(title, self.settings.api_assets()),
                    ),
                );

                if let Some(responses) = operation.get("responses").and_then(JsonValue::as_object) {
                    for (code, response) in responses {
                        records.push(self.convert_response(title, &endpoint_name, code, response));
                    }
                }
            }
        }
        records
    }

    fn convert_response(
        &self,
        title: &str,
        endpoint_name: &str,
        code: &str,
        response: &JsonValue,
    ) -> ImportRecord {
        let code_name = code.to_uppercase();
        let name = [title, endpoint_name, code_name.as_str()].join(CODE_VALUE_SEPARATOR);
        let description = response
            .get("description")
            .and_then(JsonValue::as_str)
            .unwrap_or_default();

        let mut record = ImportRecord::asset(
            name,
            self.settings.code_values(),
            CODE_VALUE_TYPE,
            description,
        )
        .with_display_name(code_name.to_lowercase())
        .with_relation(
            DATA_ELEMENT_RELATION,
            RelationDirection::Source,
            AssetIdentifier::new(endpoint_name, self.settings.data_assets()),
        );

        for schema_name in response_body_references(response) {
            record.add_relation(
                DATA_ELEMENT_RELATION,
                RelationDirection::Target,
                AssetIdentifier::new(schema_name, self.settings.data_assets()),
            );
        }

        record
    }
}

/// Read `info.title` and `info.description`
///
/// An absent description falls back to [`DEFAULT_API_DESCRIPTION`]. A
/// description that is present but empty or not a string fails the whole
/// extraction, just like a missing title, even though only the title is used
/// to name derived assets.
fn extract_title_and_description(
    document: &JsonValue,
) -> Result<(String, String), ConversionError> {
    let info = document
        .get("info")
        .and_then(JsonValue::as_object)
        .ok_or(ConversionError::MissingTitle)?;

    let title = info
        .get("title")
        .and_then(JsonValue::as_str)
        .filter(|t| !t.is_empty())
        .ok_or(ConversionError::MissingTitle)?;

    let description = match info.get("description") {
        None => DEFAULT_API_DESCRIPTION,
        Some(JsonValue::String(d)) if !d.is_empty() => d.as_str(),
        Some(other) => {
            return Err(ConversionError::InvalidDescription(format!(
                "expected a non-empty string, found {}",
                other
            )));
        }
    };

    Ok((title.to_string(), description.to_string()))
}

/// `$ref` of a property, or of its `items` for array properties
fn property_reference(property: &JsonValue) -> Option<&str> {
    if let Some(pointer) = property.get("$ref") {
        return pointer.as_str();
    }
    property
        .get("items")
        .and_then(|items| items.get("$ref"))
        .and_then(JsonValue::as_str)
}

/// Schema names referenced by a response body, one walk per media type
///
/// Names are distinct within a media type's schema; a schema referenced under
/// several media types is listed once for each of them.
fn response_body_references(response: &JsonValue) -> Vec<String> {
    let Some(content) = response.get("content").and_then(JsonValue::as_object) else {
        return Vec::new();
    };
    content
        .values()
        .filter_map(|media_type| media_type.get("schema"))
        .flat_map(collect_schema_references)
        .collect()
}
