//! Relation type requests

use super::{RequestError, RequestMode, optional, required};
use crate::resources::ResourceRecord;
use serde::Serialize;
use uuid::Uuid;

/// Add or change request for a relation type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationTypeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub source_type_id: Uuid,
    pub role: String,
    pub target_type_id: Uuid,
    pub co_role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RelationTypeRequest {
    pub fn build(record: &ResourceRecord, mode: RequestMode) -> Result<Self, RequestError> {
        Ok(Self {
            id: mode.request_id(record)?,
            source_type_id: required(record, "source_type_id")?,
            role: required(record, "role")?,
            target_type_id: required(record, "target_type_id")?,
            co_role: required(record, "co_role")?,
            description: optional(record, "description")?,
        })
    }
}
