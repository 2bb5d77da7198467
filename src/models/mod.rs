//! Models module for the catalog sync tools
//!
//! Defines the import records submitted to the catalog and the governance
//! object kinds with their per-run counters.

pub mod governance;
pub mod import_record;

pub use governance::{CategoryStats, ObjectKind, SyncStats};
pub use import_record::{
    API_ENDPOINT_RELATION, AssetIdentifier, AttributeValue, CODE_VALUE_TYPE, CommunityRef,
    DATA_ELEMENT_RELATION, DATA_ELEMENT_TYPE, DATA_STRUCTURE_TYPE, DomainRef, ImportRecord,
    RelationDirection, RelationTypeId, TypeRef,
};
