//! Resource directory loading
//!
//! Loads every `*.json` file of a kind directory, validating required fields.
//!
//! Directory structure:
//! - `resources/`
//!   - `AssetType/*.json`
//!   - `Community/*.json`
//!   - `Domain/*.json`
//!   - `RelationType/*.json`
//!   - `Assignment/*.json`
//!
//! A missing kind directory yields no records and no errors. Malformed files
//! and files missing required fields are logged and reported in
//! [`LoadResult::errors`]; loading continues with the next file.

use super::{LoadError, ResourceRecord};
use crate::models::ObjectKind;
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Outcome of loading one kind directory
#[derive(Debug, Default)]
#[must_use = "load results carry errors that should be counted"]
pub struct LoadResult {
    /// Valid records, in file name order
    pub records: Vec<ResourceRecord>,
    /// Files that were skipped
    pub errors: Vec<LoadError>,
}

/// Loader rooted at a resources directory
#[derive(Debug, Clone)]
pub struct ResourceLoader {
    root: PathBuf,
}

impl ResourceLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the files of one kind
    pub fn kind_dir(&self, kind: ObjectKind) -> PathBuf {
        self.root.join(kind.directory())
    }

    /// Load the records of one kind, validating its required fields
    pub fn load_kind(&self, kind: ObjectKind) -> LoadResult {
        let result = load_directory(&self.kind_dir(kind), kind.required_fields());
        info!(
            "Loaded {} {} records ({} rejected)",
            result.records.len(),
            kind,
            result.errors.len()
        );
        result
    }
}

/// Load every `*.json` file in `dir`, rejecting records missing `required` fields
pub fn load_directory(dir: &Path, required: &[&str]) -> LoadResult {
    let mut result = LoadResult::default();

    if !dir.is_dir() {
        return result;
    }

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            let err = LoadError::Io {
                path: dir.to_path_buf(),
                message: e.to_string(),
            };
            error!("{}", err);
            result.errors.push(err);
            return result;
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    for path in files {
        match load_file(&path, required) {
            Ok(record) => result.records.push(record),
            Err(err) => {
                error!("{}", err);
                result.errors.push(err);
            }
        }
    }

    result
}

/// Load and validate a single resource file
pub fn load_file(path: &Path, required: &[&str]) -> Result<ResourceRecord, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let value: JsonValue = serde_json::from_str(&content).map_err(|e| LoadError::InvalidJson {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let JsonValue::Object(fields) = value else {
        return Err(LoadError::NotAnObject {
            path: path.to_path_buf(),
        });
    };

    let record = ResourceRecord::new(path, fields);
    let missing = record.missing_fields(required);
    if !missing.is_empty() {
        return Err(LoadError::MissingFields {
            path: path.to_path_buf(),
            missing,
        });
    }

    Ok(record)
}
