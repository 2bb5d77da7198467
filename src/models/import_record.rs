//! Catalog import records
//!
//! Defines the flat asset records submitted to the catalog's JSON import job.
//! Relations reference other assets by name, so the order of records in a
//! batch does not matter to the catalog.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Resource type carried by every import record
pub const ASSET_RESOURCE_TYPE: &str = "Asset";

/// Name of the single attribute written on every record
pub const DESCRIPTION_ATTRIBUTE: &str = "Description";

/// Catalog type name for schema assets
pub const DATA_STRUCTURE_TYPE: &str = "Data Structure";

/// Catalog type name for schema property assets
pub const DATA_ELEMENT_TYPE: &str = "Data Element";

/// Catalog type name for response code assets
pub const CODE_VALUE_TYPE: &str = "Code Value";

/// Relation type linking properties to schemas and response codes to endpoints
/// and schemas (`00000000-0000-0000-0000-000000007017`)
pub const DATA_ELEMENT_RELATION: RelationTypeId = RelationTypeId(Uuid::from_u128(0x7017));

/// Relation type linking endpoints to their API (`00000000-0000-0000-0000-000000007005`)
pub const API_ENDPOINT_RELATION: RelationTypeId = RelationTypeId(Uuid::from_u128(0x7005));

/// Identifier of a predefined catalog relation type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelationTypeId(pub Uuid);

impl fmt::Display for RelationTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Which end of a relation the record sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RelationDirection {
    Source,
    Target,
}

impl fmt::Display for RelationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationDirection::Source => write!(f, "SOURCE"),
            RelationDirection::Target => write!(f, "TARGET"),
        }
    }
}

/// Build the `"<relationTypeId>:<SOURCE|TARGET>"` key used in `relations`
pub fn relation_key(relation_type: RelationTypeId, direction: RelationDirection) -> String {
    format!("{}:{}", relation_type, direction)
}

/// Community reference, resolved by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityRef {
    pub name: String,
}

/// Domain reference, resolved by name within a community
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRef {
    pub name: String,
    pub community: CommunityRef,
}

impl DomainRef {
    pub fn new(name: impl Into<String>, community: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            community: CommunityRef {
                name: community.into(),
            },
        }
    }
}

/// Asset identifier: asset name plus its domain
///
/// Used both as the record's own identifier and as the target of a relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetIdentifier {
    pub name: String,
    pub domain: DomainRef,
}

impl AssetIdentifier {
    pub fn new(name: impl Into<String>, domain: DomainRef) -> Self {
        Self {
            name: name.into(),
            domain,
        }
    }
}

/// Catalog asset type reference, resolved by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    pub name: String,
}

/// Single attribute value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub value: String,
}

/// One asset in a catalog import batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRecord {
    /// Always `"Asset"`
    pub resource_type: String,
    /// Asset name and domain
    pub identifier: AssetIdentifier,
    /// Optional display name shown instead of the full name
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub display_name: Option<String>,
    /// Catalog asset type
    #[serde(rename = "type")]
    pub asset_type: TypeRef,
    /// Attribute type name to values
    #[serde(default)]
    pub attributes: BTreeMap<String, Vec<AttributeValue>>,
    /// `"<relationTypeId>:<SOURCE|TARGET>"` to related assets
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub relations: BTreeMap<String, Vec<AssetIdentifier>>,
}

impl ImportRecord {
    /// Create an asset record with a Description attribute and no relations
    pub fn asset(
        name: impl Into<String>,
        domain: DomainRef,
        asset_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let mut attributes = BTreeMap::new();
        attributes.insert(
            DESCRIPTION_ATTRIBUTE.to_string(),
            vec![AttributeValue {
                value: description.into(),
            }],
        );

        Self {
            resource_type: ASSET_RESOURCE_TYPE.to_string(),
            identifier: AssetIdentifier::new(name, domain),
            display_name: None,
            asset_type: TypeRef {
                name: asset_type.into(),
            },
            attributes,
            relations: BTreeMap::new(),
        }
    }

    /// Set the display name
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Append a relation entry, keeping earlier entries under the same key
    pub fn add_relation(
        &mut self,
        relation_type: RelationTypeId,
        direction: RelationDirection,
        target: AssetIdentifier,
    ) {
        self.relations
            .entry(relation_key(relation_type, direction))
            .or_default()
            .push(target);
    }

    /// Builder form of [`ImportRecord::add_relation`]
    pub fn with_relation(
        mut self,
        relation_type: RelationTypeId,
        direction: RelationDirection,
        target: AssetIdentifier,
    ) -> Self {
        self.add_relation(relation_type, direction, target);
        self
    }

    /// Related assets under a relation key, empty if none
    pub fn related(
        &self,
        relation_type: RelationTypeId,
        direction: RelationDirection,
    ) -> &[AssetIdentifier] {
        self.relations
            .get(&relation_key(relation_type, direction))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Description attribute value, if set
    pub fn description(&self) -> Option<&str> {
        self.attributes
            .get(DESCRIPTION_ATTRIBUTE)
            .and_then(|values| values.first())
            .map(|v| v.value.as_str())
    }

    pub fn name(&self) -> &str {
        &self.identifier.name
    }

    pub fn type_name(&self) -> &str {
        &self.asset_type.name
    }
}
