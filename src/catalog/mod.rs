//! Catalog backends
//!
//! The sync and import pipelines talk to the catalog through two traits:
//! [`CatalogBackend`] for the governance REST resources and
//! [`ImportJobBackend`] for bulk import jobs. [`CatalogClient`] implements
//! both over HTTP; tests substitute in-memory fakes.

pub mod client;
pub mod import_job;

pub use client::CatalogClient;
pub use import_job::BatchImporter;

use crate::models::ObjectKind;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::path::Path;
use std::time::Duration;
use uuid::Uuid;

/// Error returned by catalog backends
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Catalog returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(String),

    /// The call went through but the response body did not have the expected shape
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Import job {job_id} did not finish within {waited:?}")]
    JobTimeout { job_id: Uuid, waited: Duration },
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Object returned by the catalog; only `id` and `name` are interpreted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogObject {
    pub id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl CatalogObject {
    pub fn new(id: Uuid, name: Option<String>) -> Self {
        Self {
            id,
            name,
            extra: Map::new(),
        }
    }
}

/// Paged search response
#[derive(Debug, Clone, Deserialize)]
pub struct PagedResponse {
    #[serde(default)]
    pub results: Vec<CatalogObject>,
}

/// Governance REST operations, one resource collection per [`ObjectKind`]
pub trait CatalogBackend {
    /// Fetch a single object by id; a missing object is [`CatalogError::NotFound`]
    fn fetch(&self, kind: ObjectKind, id: &Uuid) -> CatalogResult<CatalogObject>;

    /// Search a collection with query parameters
    fn search(&self, kind: ObjectKind, query: &[(&str, String)])
    -> CatalogResult<Vec<CatalogObject>>;

    /// Create an object
    fn add(&self, kind: ObjectKind, body: &JsonValue) -> CatalogResult<CatalogObject>;

    /// Change an existing object
    fn change(&self, kind: ObjectKind, id: &Uuid, body: &JsonValue)
    -> CatalogResult<CatalogObject>;
}

/// Import job state as reported by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobState {
    Waiting,
    Running,
    Canceling,
    Completed,
    Canceled,
    Error,
    #[serde(other)]
    Unknown,
}

impl JobState {
    /// Whether polling should stop
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobState::Completed | JobState::Canceled | JobState::Error
        )
    }
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            JobState::Waiting => "WAITING",
            JobState::Running => "RUNNING",
            JobState::Canceling => "CANCELING",
            JobState::Completed => "COMPLETED",
            JobState::Canceled => "CANCELED",
            JobState::Error => "ERROR",
            JobState::Unknown => "UNKNOWN",
        };
        write!(f, "{}", label)
    }
}

/// Asynchronous import job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub state: JobState,
}

/// Bulk import operations
pub trait ImportJobBackend {
    /// Upload an import file and start a job
    fn submit_import(&self, file: &Path, file_name: &str) -> CatalogResult<Job>;

    /// Current state of a job
    fn get_job(&self, id: &Uuid) -> CatalogResult<Job>;
}
