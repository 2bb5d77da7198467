//! Governance object upsert engine
//!
//! For every resource record the engine decides whether the object already
//! exists in the catalog and issues a change or an add call accordingly:
//!
//! 1. A record with `id` is probed by id (assignments are changed directly).
//! 2. A record without `id`, or whose id is unknown, is looked up by natural
//!    key when the kind has one.
//! 3. A match is updated; no match is created.
//!
//! Every outcome lands in the kind's [`CategoryStats`]. Failures are logged and
//! never stop the run.

pub mod kinds;

pub use kinds::{
    AssetTypes, Assignments, Communities, Domains, GovernanceKind, LookupStrategy, NaturalKey,
    RelationTypes,
};

use crate::catalog::{CatalogBackend, CatalogError};
use crate::models::{CategoryStats, SyncStats};
use crate::requests::{RequestError, RequestMode};
use crate::resources::{ResourceLoader, ResourceRecord};
use serde_json::Value as JsonValue;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Result of upserting a single record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
    Failed,
}

/// Where a record should be written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Update(Uuid),
    Create,
}

#[derive(Debug, thiserror::Error)]
enum UpsertError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Failed to encode request: {0}")]
    Encode(String),
}

/// Drives create-or-update calls against a catalog backend
pub struct UpsertEngine<'a, B: CatalogBackend> {
    backend: &'a B,
}

impl<'a, B: CatalogBackend> UpsertEngine<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Load and upsert every kind in order, accumulating into `stats`
    ///
    /// Files rejected by the loader count as errors of their category.
    pub fn sync_all(&self, loader: &ResourceLoader, stats: &mut SyncStats) {
        self.sync_kind::<AssetTypes>(loader, stats);
        self.sync_kind::<Communities>(loader, stats);
        self.sync_kind::<Domains>(loader, stats);
        self.sync_kind::<RelationTypes>(loader, stats);
        self.sync_kind::<Assignments>(loader, stats);
    }

    /// Load and upsert the records of one kind
    pub fn sync_kind<K: GovernanceKind>(&self, loader: &ResourceLoader, stats: &mut SyncStats) {
        let loaded = loader.load_kind(K::KIND);
        let category = stats.category_mut(K::KIND);
        category.errors += loaded.errors.len();

        for record in &loaded.records {
            self.upsert::<K>(record, category);
        }
    }

    /// Create or update one record, counting the outcome
    pub fn upsert<K: GovernanceKind>(
        &self,
        record: &ResourceRecord,
        stats: &mut CategoryStats,
    ) -> UpsertOutcome {
        let label = record.label();
        let outcome = match self.try_upsert::<K>(record) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Failed to sync {} '{}': {}", K::KIND, label, e);
                UpsertOutcome::Failed
            }
        };

        match outcome {
            UpsertOutcome::Created => {
                info!("{} created: {}", capitalize(&K::KIND.to_string()), label);
                stats.created += 1;
            }
            UpsertOutcome::Updated => {
                info!("{} updated: {}", capitalize(&K::KIND.to_string()), label);
                stats.updated += 1;
            }
            UpsertOutcome::Failed => stats.errors += 1,
        }
        outcome
    }

    fn try_upsert<K: GovernanceKind>(
        &self,
        record: &ResourceRecord,
    ) -> Result<UpsertOutcome, UpsertError> {
        let record_id = record_id(record)?;

        if K::LOOKUP == LookupStrategy::ChangeDirect
            && let Some(id) = record_id
        {
            match self.write::<K>(record, Target::Update(id)) {
                Err(UpsertError::Catalog(e)) if e.is_not_found() => {
                    info!("{} {} not found, creating it", K::KIND, id);
                }
                other => return other,
            }
            return self.write::<K>(record, Target::Create);
        }

        let target = self.resolve::<K>(record, record_id)?;
        self.write::<K>(record, target)
    }

    /// Decide whether the record maps to an existing object
    fn resolve<K: GovernanceKind>(
        &self,
        record: &ResourceRecord,
        record_id: Option<Uuid>,
    ) -> Result<Target, UpsertError> {
        if let Some(id) = record_id {
            match self.backend.fetch(K::KIND, &id) {
                Ok(existing) => return Ok(Target::Update(existing.id)),
                Err(e) if e.is_not_found() => {
                    info!("{} {} not found by id", K::KIND, id);
                }
                Err(e) => return Err(e.into()),
            }
        }

        if K::LOOKUP != LookupStrategy::ProbeThenNaturalKey {
            return Ok(Target::Create);
        }

        let key = K::natural_key(record)?;
        let matches = self.backend.search(K::KIND, &key)?;
        if matches.len() > 1 {
            warn!(
                "{} matches found for {} '{}', updating the first",
                matches.len(),
                K::KIND,
                record.label()
            );
        }
        Ok(matches
            .first()
            .map_or(Target::Create, |existing| Target::Update(existing.id)))
    }

    fn write<K: GovernanceKind>(
        &self,
        record: &ResourceRecord,
        target: Target,
    ) -> Result<UpsertOutcome, UpsertError> {
        let (mode, outcome) = match target {
            Target::Update(id) => (RequestMode::Change(id), UpsertOutcome::Updated),
            Target::Create => (RequestMode::Add, UpsertOutcome::Created),
        };

        let request = K::build_request(record, mode)?;
        let body: JsonValue =
            serde_json::to_value(&request).map_err(|e| UpsertError::Encode(e.to_string()))?;

        let result = match target {
            Target::Update(id) => self.backend.change(K::KIND, &id, &body),
            Target::Create => self.backend.add(K::KIND, &body),
        };

        match result {
            Ok(_) => Ok(outcome),
            Err(CatalogError::UnexpectedShape(message)) if K::SHAPE_ERRORS_COUNT_AS_SUCCESS => {
                warn!(
                    "{} '{}' written but the response could not be read: {}",
                    K::KIND,
                    record.label(),
                    message
                );
                Ok(outcome)
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn record_id(record: &ResourceRecord) -> Result<Option<Uuid>, RequestError> {
    match record.get("id") {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(id)) => {
            Uuid::parse_str(id)
                .map(Some)
                .map_err(|e| RequestError::InvalidField {
                    field: "id".to_string(),
                    message: e.to_string(),
                })
        }
        Some(other) => Err(RequestError::InvalidField {
            field: "id".to_string(),
            message: format!("expected a UUID string, found {}", other),
        }),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
