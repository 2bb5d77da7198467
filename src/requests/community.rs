//! Community requests

use super::{RequestError, RequestMode, optional, required};
use crate::resources::ResourceRecord;
use serde::Serialize;
use uuid::Uuid;

/// Add or change request for a community
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CommunityRequest {
    pub fn build(record: &ResourceRecord, mode: RequestMode) -> Result<Self, RequestError> {
        Ok(Self {
            id: mode.request_id(record)?,
            name: required(record, "name")?,
            parent_id: optional(record, "parent_id")?,
            description: optional(record, "description")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_community_request() {
        let record = ResourceRecord::from_value(json!({
            "name": "Finance",
            "description": "Finance community",
            "parent_id": "00000000-0000-0000-0000-0000000000aa"
        }))
        .unwrap();

        let request = CommunityRequest::build(&record, RequestMode::Add).unwrap();
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "name": "Finance",
                "parentId": "00000000-0000-0000-0000-0000000000aa",
                "description": "Finance community"
            })
        );
    }
}
