// gameplan-core/src/domain/taxonomy/snapshot.rs
//
// Raw reference data exactly as exported by the master-data side.
// Nothing here is checked yet: the graph builder does that.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
}

impl NodeRecord {
    pub fn named(name: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    /// Owning business unit. Unmapped categories exist in production data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_unit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceSnapshot {
    #[serde(default)]
    pub business_units: Vec<NodeRecord>,
    #[serde(default)]
    pub categories: Vec<CategoryRecord>,
    #[serde(default)]
    pub ranges: Vec<NodeRecord>,
    #[serde(default)]
    pub campaigns: Vec<NodeRecord>,

    // --- Junction views (category <-> range, range -> campaign) ---
    #[serde(default)]
    pub category_ranges: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub range_categories: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub range_campaigns: BTreeMap<String, Vec<String>>,

    /// Primary ownership: campaign -> its single range.
    #[serde(default)]
    pub campaign_range: BTreeMap<String, String>,
    /// Many-to-many override list for shared campaigns.
    #[serde(default)]
    pub campaign_compatibility: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub shared_campaigns: Vec<String>,

    // --- Hand-curated alias tables ---
    #[serde(default)]
    pub campaign_aliases: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub category_aliases: BTreeMap<String, Vec<String>>,
}

impl ReferenceSnapshot {
    pub fn from_json(content: &str) -> Result<Self, DomainError> {
        serde_json::from_str(content).map_err(|e| DomainError::ReferenceUnreadable {
            format: "json".into(),
            reason: e.to_string(),
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, DomainError> {
        serde_yaml::from_str(content).map_err(|e| DomainError::ReferenceUnreadable {
            format: "yaml".into(),
            reason: e.to_string(),
        })
    }
}
