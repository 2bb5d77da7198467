//! Catalog request builders
//!
//! Builds the typed add/change request bodies for the five governance object
//! kinds from raw resource records. Required fields are copied verbatim;
//! allow-listed optional fields are overlaid only when the record carries
//! them, so unset fields are left out of the request body entirely.

pub mod asset_type;
pub mod assignment;
pub mod community;
pub mod domain;
pub mod relation_type;

pub use asset_type::AssetTypeRequest;
pub use assignment::{ArticulationRuleRequest, AssignmentRequest, CharacteristicTypeReference};
pub use community::CommunityRequest;
pub use domain::DomainRequest;
pub use relation_type::RelationTypeRequest;

use crate::resources::ResourceRecord;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// Error while building a request from a record
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestError {
    #[error("Missing required field '{0}'")]
    MissingField(String),

    #[error("Field '{field}' has an invalid value: {message}")]
    InvalidField { field: String, message: String },
}

/// Whether a request creates an object or changes an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    /// Create request; carries the record's own `id` if it has one
    Add,
    /// Change request targeting an existing object
    Change(Uuid),
}

impl RequestMode {
    /// Id carried by the request body
    fn request_id(&self, record: &ResourceRecord) -> Result<Option<Uuid>, RequestError> {
        match self {
            RequestMode::Add => optional(record, "id"),
            RequestMode::Change(id) => Ok(Some(*id)),
        }
    }

    pub fn is_change(&self) -> bool {
        matches!(self, RequestMode::Change(_))
    }
}

/// Read a required field, converting it to `T`
pub(crate) fn required<T: DeserializeOwned>(
    record: &ResourceRecord,
    field: &str,
) -> Result<T, RequestError> {
    let value = record
        .get(field)
        .ok_or_else(|| RequestError::MissingField(field.to_string()))?;
    T::deserialize(value).map_err(|e| RequestError::InvalidField {
        field: field.to_string(),
        message: e.to_string(),
    })
}

/// Read a required field, falling back to `default` when absent
pub(crate) fn required_or<T: DeserializeOwned>(
    record: &ResourceRecord,
    field: &str,
    default: T,
) -> Result<T, RequestError> {
    Ok(optional(record, field)?.unwrap_or(default))
}

/// Read an optional field; absent and `null` both yield `None`
pub(crate) fn optional<T: DeserializeOwned>(
    record: &ResourceRecord,
    field: &str,
) -> Result<Option<T>, RequestError> {
    match record.get(field) {
        None => Ok(None),
        Some(value) => Option::<T>::deserialize(value).map_err(|e| RequestError::InvalidField {
            field: field.to_string(),
            message: e.to_string(),
        }),
    }
}
