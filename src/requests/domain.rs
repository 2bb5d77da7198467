//! Domain requests

use super::{RequestError, RequestMode, optional, required};
use crate::resources::ResourceRecord;
use serde::Serialize;
use uuid::Uuid;

/// Add or change request for a domain
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    pub community_id: Uuid,
    pub type_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excluded_from_auto_hyperlinking: Option<bool>,
}

impl DomainRequest {
    pub fn build(record: &ResourceRecord, mode: RequestMode) -> Result<Self, RequestError> {
        Ok(Self {
            id: mode.request_id(record)?,
            name: required(record, "name")?,
            community_id: required(record, "community_id")?,
            type_id: required(record, "type_id")?,
            description: optional(record, "description")?,
            excluded_from_auto_hyperlinking: optional(record, "excluded_from_auto_hyperlinking")?,
        })
    }
}
