//! Governance resource files
//!
//! Each governance object is described by one JSON file under
//! `resources/<Kind>/`. Records are kept as raw JSON objects; the request
//! builders decide which fields they read.

pub mod loader;

pub use loader::{LoadResult, ResourceLoader};

use serde_json::{Map, Value as JsonValue};
use std::path::PathBuf;

/// Error while loading a resource file
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("File {path} is not valid JSON: {message}")]
    InvalidJson { path: PathBuf, message: String },

    #[error("File {path} does not contain a JSON object")]
    NotAnObject { path: PathBuf },

    #[error("File {path} is missing required fields: {missing:?}")]
    MissingFields { path: PathBuf, missing: Vec<String> },
}

/// One governance object read from a resource file
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRecord {
    /// File the record was read from
    pub source: PathBuf,
    /// Raw JSON fields
    pub fields: Map<String, JsonValue>,
}

impl ResourceRecord {
    pub fn new(source: impl Into<PathBuf>, fields: Map<String, JsonValue>) -> Self {
        Self {
            source: source.into(),
            fields,
        }
    }

    /// Build a record from a JSON object literal, for callers without a file
    pub fn from_value(value: JsonValue) -> Option<Self> {
        match value {
            JsonValue::Object(fields) => Some(Self::new(PathBuf::new(), fields)),
            _ => None,
        }
    }

    pub fn get(&self, field: &str) -> Option<&JsonValue> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Required fields absent from this record
    pub fn missing_fields(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|field| !self.contains(field))
            .map(|field| field.to_string())
            .collect()
    }

    /// The `id` field as a string, if present
    pub fn id(&self) -> Option<&str> {
        self.get("id").and_then(JsonValue::as_str)
    }

    /// Short label for log lines: `name`, else `id`, else the file name
    pub fn label(&self) -> String {
        if let Some(name) = self.get("name").and_then(JsonValue::as_str) {
            return name.to_string();
        }
        if let Some(id) = self.id() {
            return id.to_string();
        }
        self.source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "<unnamed>".to_string())
    }
}
