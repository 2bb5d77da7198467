//! Governance object kinds and sync counters

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of governance object synchronized into the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObjectKind {
    AssetType,
    Community,
    Domain,
    RelationType,
    Assignment,
}

impl ObjectKind {
    /// All kinds, in the order they are synchronized
    pub const ALL: [ObjectKind; 5] = [
        ObjectKind::AssetType,
        ObjectKind::Community,
        ObjectKind::Domain,
        ObjectKind::RelationType,
        ObjectKind::Assignment,
    ];

    /// Directory name under the resources root (`resources/<Kind>/*.json`)
    pub fn directory(&self) -> &'static str {
        match self {
            ObjectKind::AssetType => "AssetType",
            ObjectKind::Community => "Community",
            ObjectKind::Domain => "Domain",
            ObjectKind::RelationType => "RelationType",
            ObjectKind::Assignment => "Assignment",
        }
    }

    /// Category label used in the sync report
    pub fn category(&self) -> &'static str {
        match self {
            ObjectKind::AssetType => "assets",
            ObjectKind::Community => "communities",
            ObjectKind::Domain => "domains",
            ObjectKind::RelationType => "relation_types",
            ObjectKind::Assignment => "assignments",
        }
    }

    /// REST resource path segment under `/rest/2.0`
    pub fn resource_path(&self) -> &'static str {
        match self {
            ObjectKind::AssetType => "assetTypes",
            ObjectKind::Community => "communities",
            ObjectKind::Domain => "domains",
            ObjectKind::RelationType => "relationTypes",
            ObjectKind::Assignment => "assignments",
        }
    }

    /// Fields every input record of this kind must carry
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            ObjectKind::AssetType => &[
                "name",
                "symbol_type",
                "display_name_enabled",
                "rating_enabled",
            ],
            ObjectKind::Community => &["name"],
            ObjectKind::Domain => &["name", "community_id", "type_id"],
            ObjectKind::RelationType => &["source_type_id", "role", "target_type_id", "co_role"],
            ObjectKind::Assignment => &["asset_type_id", "status_ids", "default_status_id"],
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::AssetType => write!(f, "asset type"),
            ObjectKind::Community => write!(f, "community"),
            ObjectKind::Domain => write!(f, "domain"),
            ObjectKind::RelationType => write!(f, "relation type"),
            ObjectKind::Assignment => write!(f, "assignment"),
        }
    }
}

/// Counters for one category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub created: usize,
    pub updated: usize,
    pub errors: usize,
}

/// Per-run counters for every governance category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStats {
    pub assets: CategoryStats,
    pub communities: CategoryStats,
    pub domains: CategoryStats,
    pub relation_types: CategoryStats,
    pub assignments: CategoryStats,
}

impl SyncStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self, kind: ObjectKind) -> &CategoryStats {
        match kind {
            ObjectKind::AssetType => &self.assets,
            ObjectKind::Community => &self.communities,
            ObjectKind::Domain => &self.domains,
            ObjectKind::RelationType => &self.relation_types,
            ObjectKind::Assignment => &self.assignments,
        }
    }

    pub fn category_mut(&mut self, kind: ObjectKind) -> &mut CategoryStats {
        match kind {
            ObjectKind::AssetType => &mut self.assets,
            ObjectKind::Community => &mut self.communities,
            ObjectKind::Domain => &mut self.domains,
            ObjectKind::RelationType => &mut self.relation_types,
            ObjectKind::Assignment => &mut self.assignments,
        }
    }

    /// Sum of the error counters over all categories
    pub fn total_errors(&self) -> usize {
        ObjectKind::ALL
            .iter()
            .map(|kind| self.category(*kind).errors)
            .sum()
    }

    /// Render the Category / Created / Updated / Failed summary table
    pub fn format_table(&self) -> String {
        let headers = ["Category", "Created", "Updated", "Failed"];
        let rows: Vec<[String; 4]> = ObjectKind::ALL
            .iter()
            .map(|kind| {
                let stats = self.category(*kind);
                [
                    kind.category().to_string(),
                    stats.created.to_string(),
                    stats.updated.to_string(),
                    stats.errors.to_string(),
                ]
            })
            .collect();

        let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.len());
            }
        }

        let separator = format!(
            "+-{}-+",
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-")
        );

        let mut output = String::new();
        output.push_str(&separator);
        output.push('\n');

        let header: Vec<String> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| format!("{:^width$}", h, width = widths[i]))
            .collect();
        output.push_str(&format!("| {} |", header.join(" | ")));
        output.push('\n');
        output.push_str(&separator);
        output.push('\n');

        for row in &rows {
            let cells: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(i, c)| format!("{:^width$}", c, width = widths[i]))
                .collect();
            output.push_str(&format!("| {} |", cells.join(" | ")));
            output.push('\n');
        }

        output.push_str(&separator);
        output
    }
}
