//! Per-kind upsert behaviour
//!
//! Each governance object kind is a marker type implementing
//! [`GovernanceKind`], which ties together its request builder, its natural
//! key and the lookup strategy the engine applies.

use crate::models::ObjectKind;
use crate::requests::{
    AssetTypeRequest, AssignmentRequest, CommunityRequest, DomainRequest, RelationTypeRequest,
    RequestError, RequestMode, required,
};
use crate::resources::ResourceRecord;
use serde::Serialize;
use uuid::Uuid;

/// How an existing catalog object is located before writing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStrategy {
    /// Fetch by `id`; when absent or not found, search by natural key
    ProbeThenNaturalKey,
    /// Fetch by `id`; otherwise create
    ProbeOnly,
    /// Change by `id` without fetching; a 404 falls back to create
    ChangeDirect,
}

/// Query parameters for a natural-key search
pub type NaturalKey = Vec<(&'static str, String)>;

/// Behaviour shared by every governance object kind
pub trait GovernanceKind {
    type Request: Serialize;

    const KIND: ObjectKind;
    const LOOKUP: LookupStrategy;

    /// Treat a response-shape failure after a successful write as success.
    ///
    /// Only assignments set this: the catalog's assignment responses do not
    /// always decode, and such writes are counted as created or updated.
    const SHAPE_ERRORS_COUNT_AS_SUCCESS: bool = false;

    fn build_request(record: &ResourceRecord, mode: RequestMode)
    -> Result<Self::Request, RequestError>;

    /// Search parameters identifying the object without its id
    fn natural_key(_record: &ResourceRecord) -> Result<NaturalKey, RequestError> {
        Ok(Vec::new())
    }
}

fn exact_name(record: &ResourceRecord) -> Result<NaturalKey, RequestError> {
    let name: String = required(record, "name")?;
    Ok(vec![("name", name), ("nameMatchMode", "EXACT".to_string())])
}

pub struct AssetTypes;

impl GovernanceKind for AssetTypes {
    type Request = AssetTypeRequest;
    const KIND: ObjectKind = ObjectKind::AssetType;
    const LOOKUP: LookupStrategy = LookupStrategy::ProbeThenNaturalKey;

    fn build_request(
        record: &ResourceRecord,
        mode: RequestMode,
    ) -> Result<Self::Request, RequestError> {
        AssetTypeRequest::build(record, mode)
    }

    fn natural_key(record: &ResourceRecord) -> Result<NaturalKey, RequestError> {
        exact_name(record)
    }
}

pub struct Communities;

impl GovernanceKind for Communities {
    type Request = CommunityRequest;
    const KIND: ObjectKind = ObjectKind::Community;
    const LOOKUP: LookupStrategy = LookupStrategy::ProbeThenNaturalKey;

    fn build_request(
        record: &ResourceRecord,
        mode: RequestMode,
    ) -> Result<Self::Request, RequestError> {
        CommunityRequest::build(record, mode)
    }

    fn natural_key(record: &ResourceRecord) -> Result<NaturalKey, RequestError> {
        let mut key = exact_name(record)?;
        key.push(("sortField", "NAME".to_string()));
        Ok(key)
    }
}

pub struct Domains;

impl GovernanceKind for Domains {
    type Request = DomainRequest;
    const KIND: ObjectKind = ObjectKind::Domain;
    const LOOKUP: LookupStrategy = LookupStrategy::ProbeThenNaturalKey;

    fn build_request(
        record: &ResourceRecord,
        mode: RequestMode,
    ) -> Result<Self::Request, RequestError> {
        DomainRequest::build(record, mode)
    }

    /// Domain names are only unique within a community
    fn natural_key(record: &ResourceRecord) -> Result<NaturalKey, RequestError> {
        let community_id: Uuid = required(record, "community_id")?;
        let mut key = exact_name(record)?;
        key.push(("communityId", community_id.to_string()));
        Ok(key)
    }
}

pub struct RelationTypes;

impl GovernanceKind for RelationTypes {
    type Request = RelationTypeRequest;
    const KIND: ObjectKind = ObjectKind::RelationType;
    const LOOKUP: LookupStrategy = LookupStrategy::ProbeOnly;

    fn build_request(
        record: &ResourceRecord,
        mode: RequestMode,
    ) -> Result<Self::Request, RequestError> {
        RelationTypeRequest::build(record, mode)
    }
}

pub struct Assignments;

impl GovernanceKind for Assignments {
    type Request = AssignmentRequest;
    const KIND: ObjectKind = ObjectKind::Assignment;
    const LOOKUP: LookupStrategy = LookupStrategy::ChangeDirect;
    const SHAPE_ERRORS_COUNT_AS_SUCCESS: bool = true;

    fn build_request(
        record: &ResourceRecord,
        mode: RequestMode,
    ) -> Result<Self::Request, RequestError> {
        AssignmentRequest::build(record, mode)
    }
}
