//! Tests for OpenAPI conversion and batch import

use catalog_sync::catalog::{
    BatchImporter, CatalogError, CatalogResult, ImportJobBackend, Job, JobState,
};
use catalog_sync::convert::{
    ConversionError, ConverterSettings, OpenAPIToCatalogConverter, collect_schema_references,
};
use catalog_sync::models::{
    API_ENDPOINT_RELATION, CODE_VALUE_TYPE, DATA_ELEMENT_RELATION, DATA_ELEMENT_TYPE,
    DATA_STRUCTURE_TYPE, ImportRecord, RelationDirection,
};
use serde_json::json;
use std::cell::RefCell;
use std::path::Path;
use std::time::Duration;
use uuid::Uuid;

fn settings() -> ConverterSettings {
    ConverterSettings {
        community_name: "Data Community".to_string(),
        data_assets_domain: "Data Assets".to_string(),
        api_assets_domain: "API Assets".to_string(),
        code_values_domain: "Code Values".to_string(),
        api_type: "API".to_string(),
        endpoint_type: "API Endpoint".to_string(),
    }
}

fn convert(document: serde_json::Value) -> Vec<ImportRecord> {
    OpenAPIToCatalogConverter::new(settings())
        .convert(&document)
        .unwrap()
}

fn names(records: &[ImportRecord]) -> Vec<&str> {
    records.iter().map(ImportRecord::name).collect()
}

#[test]
fn test_pet_store_schemas() {
    let records = convert(json!({
        "openapi": "3.0.0",
        "info": {"title": "Pet Store", "description": "Pets"},
        "components": {
            "schemas": {
                "Pet": {
                    "type": "object",
                    "properties": {
                        "tag": {"$ref": "#/components/schemas/Tag", "description": "Pet tag"}
                    }
                },
                "Tag": {"type": "object"}
            }
        },
        "paths": {}
    }));

    assert_eq!(names(&records), vec!["Pet Store", "Pet", "tag", "Tag"]);

    let api = &records[0];
    assert_eq!(api.type_name(), "API");
    assert_eq!(api.description(), Some("Pets"));
    assert_eq!(api.identifier.domain.name, "API Assets");
    assert_eq!(api.identifier.domain.community.name, "Data Community");

    let pet = &records[1];
    assert_eq!(pet.type_name(), DATA_STRUCTURE_TYPE);
    assert_eq!(pet.description(), Some(""));
    assert!(pet.relations.is_empty());

    let tag = &records[2];
    assert_eq!(tag.type_name(), DATA_ELEMENT_TYPE);
    assert_eq!(tag.description(), Some("Pet tag"));
    let sources = tag.related(DATA_ELEMENT_RELATION, RelationDirection::Source);
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].name, "Pet");
    assert_eq!(sources[0].domain.name, "Data Assets");
    let targets = tag.related(DATA_ELEMENT_RELATION, RelationDirection::Target);
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].name, "Tag");
}

#[test]
fn test_pet_store_records_serialize_to_import_shape() {
    let records = convert(json!({
        "info": {"title": "Pet Store"},
        "components": {
            "schemas": {
                "Pet": {"properties": {"tag": {"$ref": "#/components/schemas/Tag"}}},
                "Tag": {}
            }
        }
    }));

    let body = serde_json::to_value(&records).unwrap();
    assert_eq!(body[0]["attributes"]["Description"][0]["value"], "No description provided");
    assert_eq!(body[2]["resourceType"], "Asset");
    assert_eq!(body[2]["type"]["name"], "Data Element");
    assert_eq!(
        body[2]["relations"]["00000000-0000-0000-0000-000000007017:SOURCE"][0]["name"],
        "Pet"
    );
    assert_eq!(
        body[2]["relations"]["00000000-0000-0000-0000-000000007017:TARGET"][0]["domain"]["community"]
            ["name"],
        "Data Community"
    );
}

#[test]
fn test_pets_get_endpoint_and_response_code() {
    let records = convert(json!({
        "info": {"title": "Pet Store"},
        "components": {"schemas": {"Pet": {}}},
        "paths": {
            "/pets": {
                "summary": "Pets collection",
                "parameters": [],
                "get": {
                    "description": "List all pets",
                    "responses": {
                        "200": {"description": "A list of pets"}
                    }
                }
            }
        }
    }));

    assert_eq!(
        names(&records),
        vec!["Pet Store", "Pet", "GET /pets", "Pet Store>GET /pets>200"]
    );

    let endpoint = &records[2];
    assert_eq!(endpoint.type_name(), "API Endpoint");
    assert_eq!(endpoint.description(), Some("List all pets"));
    let apis = endpoint.related(API_ENDPOINT_RELATION, RelationDirection::Target);
    assert_eq!(apis.len(), 1);
    assert_eq!(apis[0].name, "Pet Store");
    assert_eq!(apis[0].domain.name, "API Assets");

    let code = &records[3];
    assert_eq!(code.type_name(), CODE_VALUE_TYPE);
    assert_eq!(code.display_name.as_deref(), Some("200"));
    assert_eq!(code.description(), Some("A list of pets"));
    assert_eq!(code.identifier.domain.name, "Code Values");
    let sources = code.related(DATA_ELEMENT_RELATION, RelationDirection::Source);
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].name, "GET /pets");
    assert!(
        code.related(DATA_ELEMENT_RELATION, RelationDirection::Target)
            .is_empty()
    );
}

#[test]
fn test_default_response_code_is_uppercased_in_name() {
    let records = convert(json!({
        "info": {"title": "Pet Store"},
        "paths": {
            "/pets/{id}": {
                "delete": {"responses": {"default": {"description": "Unexpected error"}}}
            }
        }
    }));

    let code = records.last().unwrap();
    assert_eq!(code.name(), "Pet Store>DELETE /pets/{id}>DEFAULT");
    assert_eq!(code.display_name.as_deref(), Some("default"));
}

fn response_targets(response: serde_json::Value) -> Vec<String> {
    let records = convert(json!({
        "info": {"title": "Pet Store"},
        "components": {"schemas": {"Pet": {}, "Error": {}, "Owner": {}}},
        "paths": {"/pets": {"get": {"responses": {"200": response}}}}
    }));

    let code = records.last().unwrap();
    assert_eq!(code.name(), "Pet Store>GET /pets>200");
    code.related(DATA_ELEMENT_RELATION, RelationDirection::Target)
        .iter()
        .map(|t| t.name.clone())
        .collect()
}

#[test]
fn test_response_targets_one_per_distinct_reference() {
    let targets = response_targets(json!({
        "description": "Pets",
        "content": {
            "application/json": {
                "schema": {
                    "oneOf": [
                        {"type": "array", "items": {"$ref": "#/components/schemas/Pet"}},
                        {"$ref": "#/components/schemas/Pet"},
                        {"$ref": "#/components/schemas/Owner"},
                        {"properties": {"err": {"$ref": "#/components/schemas/Error"}}}
                    ]
                }
            }
        }
    }));
    assert_eq!(targets, vec!["Error", "Owner", "Pet"]);
}

#[test]
fn test_response_targets_repeat_across_media_types() {
    let targets = response_targets(json!({
        "description": "Pets",
        "content": {
            "application/json": {
                "schema": {"type": "array", "items": {"$ref": "#/components/schemas/Pet"}}
            },
            "application/xml": {
                "schema": {
                    "oneOf": [
                        {"$ref": "#/components/schemas/Pet"},
                        {"$ref": "#/components/schemas/Owner"}
                    ]
                }
            },
            "text/plain": {}
        }
    }));
    assert_eq!(targets, vec!["Pet", "Owner", "Pet"]);
}

#[test]
fn test_properties_sharing_a_reference_each_get_a_target() {
    let records = convert(json!({
        "info": {"title": "Pet Store"},
        "components": {
            "schemas": {
                "Pet": {
                    "properties": {
                        "primaryTag": {"$ref": "#/components/schemas/Tag"},
                        "tags": {"type": "array", "items": {"$ref": "#/components/schemas/Tag"}},
                        "name": {"type": "string"}
                    }
                },
                "Tag": {}
            }
        }
    }));

    assert_eq!(
        names(&records),
        vec!["Pet Store", "Pet", "primaryTag", "tags", "name", "Tag"]
    );
    for property in &records[2..4] {
        let targets = property.related(DATA_ELEMENT_RELATION, RelationDirection::Target);
        assert_eq!(targets.len(), 1, "{}", property.name());
        assert_eq!(targets[0].name, "Tag");
        assert_eq!(
            property.related(DATA_ELEMENT_RELATION, RelationDirection::Source)[0].name,
            "Pet"
        );
    }
    assert!(
        records[4]
            .related(DATA_ELEMENT_RELATION, RelationDirection::Target)
            .is_empty()
    );
}

#[test]
fn test_reference_walk_is_idempotent() {
    let schema = json!({
        "allOf": [
            {"$ref": "#/components/schemas/Base"},
            {"properties": {
                "child": {"$ref": "#/components/schemas/Child"},
                "list": {"items": {"$ref": "#/components/schemas/Base"}}
            }}
        ]
    });

    let first = collect_schema_references(&schema);
    let second = collect_schema_references(&schema);
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn test_non_operation_keys_are_ignored() {
    let records = convert(json!({
        "info": {"title": "Pet Store"},
        "paths": {
            "/pets": {
                "parameters": [{"name": "limit"}],
                "servers": [],
                "post": {"responses": {}}
            }
        }
    }));
    assert_eq!(names(&records), vec!["Pet Store", "POST /pets"]);
}

#[test]
fn test_missing_schemas_still_converts_paths() {
    let records = convert(json!({
        "info": {"title": "Pet Store"},
        "paths": {"/health": {"get": {"responses": {"204": {"description": "ok"}}}}}
    }));
    assert_eq!(
        names(&records),
        vec!["Pet Store", "GET /health", "Pet Store>GET /health>204"]
    );
}

#[test]
fn test_title_and_description_failures_abort() {
    let converter = OpenAPIToCatalogConverter::new(settings());

    assert!(matches!(
        converter.convert(&json!({"paths": {}})),
        Err(ConversionError::MissingTitle)
    ));
    assert!(matches!(
        converter.convert(&json!({"info": {"title": ""}})),
        Err(ConversionError::MissingTitle)
    ));
    assert!(matches!(
        converter.convert(&json!({"info": {"title": "Pet Store", "description": ""}})),
        Err(ConversionError::InvalidDescription(_))
    ));
    assert!(matches!(
        converter.convert_str("{not json"),
        Err(ConversionError::InvalidJson(_))
    ));
}

#[test]
fn test_convert_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("openapi.json");
    std::fs::write(
        &path,
        r#"{"info": {"title": "Pet Store"}, "components": {"schemas": {"Pet": {}}}}"#,
    )
    .unwrap();

    let records = OpenAPIToCatalogConverter::new(settings())
        .convert_file(&path)
        .unwrap();
    assert_eq!(names(&records), vec!["Pet Store", "Pet"]);

    assert!(matches!(
        OpenAPIToCatalogConverter::new(settings()).convert_file(&dir.path().join("missing.json")),
        Err(ConversionError::Io(_))
    ));
}

/// Import backend that records the uploaded batch and replays job states
struct RecordingJobs {
    states: RefCell<Vec<JobState>>,
    uploads: RefCell<Vec<(String, serde_json::Value)>>,
    uploaded_path: RefCell<Option<std::path::PathBuf>>,
}

impl RecordingJobs {
    fn new(mut states: Vec<JobState>) -> Self {
        states.reverse();
        Self {
            states: RefCell::new(states),
            uploads: RefCell::new(Vec::new()),
            uploaded_path: RefCell::new(None),
        }
    }

    fn next_job(&self) -> Job {
        Job {
            id: Uuid::from_u128(77),
            state: self.states.borrow_mut().pop().unwrap_or(JobState::Running),
        }
    }
}

impl ImportJobBackend for RecordingJobs {
    fn submit_import(&self, file: &Path, file_name: &str) -> CatalogResult<Job> {
        let content = std::fs::read_to_string(file).map_err(|e| CatalogError::Io(e.to_string()))?;
        self.uploads.borrow_mut().push((
            file_name.to_string(),
            serde_json::from_str(&content).unwrap(),
        ));
        *self.uploaded_path.borrow_mut() = Some(file.to_path_buf());
        Ok(self.next_job())
    }

    fn get_job(&self, _id: &Uuid) -> CatalogResult<Job> {
        Ok(self.next_job())
    }
}

#[test]
fn test_batch_import_submits_one_job_and_removes_file() {
    let records = convert(json!({
        "info": {"title": "Pet Store"},
        "components": {"schemas": {"Pet": {}}},
        "paths": {"/pets": {"get": {"responses": {"200": {"description": "ok"}}}}}
    }));

    let backend = RecordingJobs::new(vec![JobState::Waiting, JobState::Completed]);
    let job = BatchImporter::new(&backend)
        .with_poll_interval(Duration::ZERO)
        .import(&records)
        .unwrap();

    assert_eq!(job.state, JobState::Completed);

    let uploads = backend.uploads.borrow();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].0, "temp_import_data.json");
    assert_eq!(uploads[0].1.as_array().unwrap().len(), records.len());

    let path = backend.uploaded_path.borrow().clone().unwrap();
    assert!(!path.exists());
}

#[test]
fn test_batch_import_returns_canceled_job() {
    let backend = RecordingJobs::new(vec![JobState::Running, JobState::Canceling, JobState::Canceled]);
    let job = BatchImporter::new(&backend)
        .with_poll_interval(Duration::ZERO)
        .import(&[])
        .unwrap();
    assert_eq!(job.state, JobState::Canceled);
}
