//! Assignment requests
//!
//! Assignments carry two nested list fields. Entries are parsed from the
//! record's snake_case keys and serialized in the catalog's camelCase; keys the
//! catalog does not know are dropped.

use super::{RequestError, RequestMode, optional, required};
use crate::resources::ResourceRecord;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Articulation rule inside an assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct ArticulationRuleRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub operation: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_type_id: Option<Uuid>,
}

/// Characteristic type (attribute or relation type) attached to an assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacteristicTypeReference {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Add or change request for an assignment
///
/// `asset_type_id` is only sent when creating; a change request identifies the
/// assignment by `id` alone.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_type_id: Option<Uuid>,
    pub status_ids: Vec<Uuid>,
    pub default_status_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub characteristic_types: Option<Vec<CharacteristicTypeReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub articulation_rules: Option<Vec<ArticulationRuleRequest>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_rule_ids: Option<Vec<Uuid>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_quality_rule_ids: Option<Vec<Uuid>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_type_ids: Option<Vec<Uuid>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope_id: Option<Uuid>,
}

impl AssignmentRequest {
    pub fn build(record: &ResourceRecord, mode: RequestMode) -> Result<Self, RequestError> {
        let asset_type_id = if mode.is_change() {
            None
        } else {
            Some(required(record, "asset_type_id")?)
        };

        Ok(Self {
            id: mode.request_id(record)?,
            asset_type_id,
            status_ids: required(record, "status_ids")?,
            default_status_id: required(record, "default_status_id")?,
            characteristic_types: optional(record, "characteristic_types")?,
            articulation_rules: optional(record, "articulation_rules")?,
            validation_rule_ids: optional(record, "validation_rule_ids")?,
            data_quality_rule_ids: optional(record, "data_quality_rule_ids")?,
            domain_type_ids: optional(record, "domain_type_ids")?,
            scope_id: optional(record, "scope_id")?,
        })
    }
}
