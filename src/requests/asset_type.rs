//! Asset type requests

use super::{RequestError, RequestMode, optional, required, required_or};
use crate::resources::ResourceRecord;
use serde::Serialize;
use uuid::Uuid;

/// Symbol type applied when a record does not name one
pub const DEFAULT_SYMBOL_TYPE: &str = "NONE";

/// Add or change request for an asset type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetTypeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    pub symbol_type: String,
    pub display_name_enabled: bool,
    pub rating_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acronym_code: Option<String>,
}

impl AssetTypeRequest {
    pub fn build(record: &ResourceRecord, mode: RequestMode) -> Result<Self, RequestError> {
        Ok(Self {
            id: mode.request_id(record)?,
            name: required(record, "name")?,
            symbol_type: required_or(record, "symbol_type", DEFAULT_SYMBOL_TYPE.to_string())?,
            display_name_enabled: required_or(record, "display_name_enabled", false)?,
            rating_enabled: required_or(record, "rating_enabled", false)?,
            description: optional(record, "description")?,
            parent_id: optional(record, "parent_id")?,
            color: optional(record, "color")?,
            icon_code: optional(record, "icon_code")?,
            acronym_code: optional(record, "acronym_code")?,
        })
    }
}
