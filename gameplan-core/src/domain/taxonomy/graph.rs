// gameplan-core/src/domain/taxonomy/graph.rs
//
// Master Reference Graph: business units, categories, ranges, campaigns and
// the edges between them, built once per validation run from a snapshot.
// Dirty reference data is the normal case: anomalies become diagnostics,
// never errors.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, instrument, warn};

use super::names::NameKey;
use super::snapshot::ReferenceSnapshot;
use crate::domain::error::DomainError;
use crate::domain::issue::Severity;

type Edges = BTreeMap<NameKey, BTreeSet<NameKey>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    BusinessUnit,
    Category,
    Range,
    Campaign,
}

impl Entity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::BusinessUnit => "business unit",
            Self::Category => "category",
            Self::Range => "range",
            Self::Campaign => "campaign",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    DanglingReference,
    DuplicateName,
    BlankName,
    AsymmetricJunction,
    PrimaryNotInOverride,
}

/// A data-quality anomaly found while building the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphDiagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub business_units: usize,
    pub categories: usize,
    pub ranges: usize,
    pub campaigns: usize,
    pub category_range_edges: usize,
    pub range_campaign_edges: usize,
    pub primary_mappings: usize,
    pub shared_campaigns: usize,
    pub diagnostics: usize,
}

#[derive(Debug, Clone)]
struct Node {
    #[allow(dead_code)]
    id: Option<u64>,
    name: String,
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceGraph {
    business_units: BTreeMap<NameKey, Node>,
    categories: BTreeMap<NameKey, Node>,
    ranges: BTreeMap<NameKey, Node>,
    campaigns: BTreeMap<NameKey, Node>,

    category_owner: BTreeMap<NameKey, NameKey>,
    category_ranges: Edges,
    range_categories: Edges,
    range_campaigns: Edges,
    campaign_range: BTreeMap<NameKey, NameKey>,
    campaign_overrides: Edges,
    shared_campaigns: BTreeSet<NameKey>,
    campaign_aliases: Edges,
    category_aliases: Edges,

    diagnostics: Vec<GraphDiagnostic>,
}

impl ReferenceGraph {
    /// Parses a JSON snapshot and builds the graph. Unparsable input is the
    /// only fatal case.
    pub fn from_json(content: &str) -> Result<Self, DomainError> {
        Ok(Self::load(&ReferenceSnapshot::from_json(content)?))
    }

    pub fn from_yaml(content: &str) -> Result<Self, DomainError> {
        Ok(Self::load(&ReferenceSnapshot::from_yaml(content)?))
    }

    #[instrument(skip_all, fields(
        categories = snapshot.categories.len(),
        ranges = snapshot.ranges.len(),
        campaigns = snapshot.campaigns.len()
    ))]
    pub fn load(snapshot: &ReferenceSnapshot) -> Self {
        let mut graph = Self::default();

        // 1. Nodes (business units first: categories point at them)
        for bu in &snapshot.business_units {
            graph.insert_node(Entity::BusinessUnit, bu.id, &bu.name);
        }
        for range in &snapshot.ranges {
            graph.insert_node(Entity::Range, range.id, &range.name);
        }
        for campaign in &snapshot.campaigns {
            graph.insert_node(Entity::Campaign, campaign.id, &campaign.name);
        }
        for category in &snapshot.categories {
            let Some(key) = graph.insert_node(Entity::Category, category.id, &category.name)
            else {
                continue;
            };
            let owner = category
                .business_unit
                .as_deref()
                .filter(|bu| !bu.trim().is_empty());
            if let Some(bu) = owner {
                let edge = format!("categories['{}'].business_unit", category.name);
                if let Some(bu_key) = graph.resolve(Entity::BusinessUnit, bu, &edge) {
                    graph.category_owner.insert(key, bu_key);
                }
            }
        }

        // 2. Edges
        graph.link_category_ranges(&snapshot.category_ranges, &snapshot.range_categories);
        graph.range_campaigns = graph.link_many(
            Entity::Range,
            Entity::Campaign,
            "range_campaigns",
            &snapshot.range_campaigns,
        );
        graph.link_primary_ranges(&snapshot.campaign_range);
        graph.campaign_overrides = graph.link_many(
            Entity::Campaign,
            Entity::Range,
            "campaign_compatibility",
            &snapshot.campaign_compatibility,
        );
        for name in &snapshot.shared_campaigns {
            if let Some(key) = graph.resolve(Entity::Campaign, name, "shared_campaigns") {
                graph.shared_campaigns.insert(key);
            }
        }
        graph.enforce_primary_in_overrides();

        // 3. Alias tables
        graph.campaign_aliases = graph.link_many(
            Entity::Campaign,
            Entity::Range,
            "campaign_aliases",
            &snapshot.campaign_aliases,
        );
        graph.category_aliases = graph.link_many(
            Entity::Category,
            Entity::Range,
            "category_aliases",
            &snapshot.category_aliases,
        );

        if !graph.diagnostics.is_empty() {
            warn!(
                count = graph.diagnostics.len(),
                "Reference snapshot contains anomalies (tolerated)"
            );
        }
        info!(stats = ?graph.stats(), "Reference graph built");
        graph
    }

    // --- BUILD HELPERS ---

    fn nodes(&self, entity: Entity) -> &BTreeMap<NameKey, Node> {
        match entity {
            Entity::BusinessUnit => &self.business_units,
            Entity::Category => &self.categories,
            Entity::Range => &self.ranges,
            Entity::Campaign => &self.campaigns,
        }
    }

    fn nodes_mut(&mut self, entity: Entity) -> &mut BTreeMap<NameKey, Node> {
        match entity {
            Entity::BusinessUnit => &mut self.business_units,
            Entity::Category => &mut self.categories,
            Entity::Range => &mut self.ranges,
            Entity::Campaign => &mut self.campaigns,
        }
    }

    fn note(&mut self, kind: DiagnosticKind, message: String) {
        debug!(?kind, %message, "reference anomaly");
        self.diagnostics.push(GraphDiagnostic {
            kind,
            severity: Severity::Warning,
            message,
        });
    }

    fn insert_node(&mut self, entity: Entity, id: Option<u64>, name: &str) -> Option<NameKey> {
        let key = NameKey::new(name);
        if key.is_empty() {
            self.note(
                DiagnosticKind::BlankName,
                format!("A {} with a blank name was ignored", entity.label()),
            );
            return None;
        }

        let existing = self.nodes(entity).get(&key).map(|n| n.name.clone());
        match existing {
            Some(kept) if kept != name.trim() => {
                self.note(
                    DiagnosticKind::DuplicateName,
                    format!(
                        "{} '{}' duplicates '{}' with different casing; keeping '{}'",
                        entity.label(),
                        name.trim(),
                        kept,
                        kept
                    ),
                );
            }
            Some(_) => {}
            None => {
                self.nodes_mut(entity).insert(
                    key.clone(),
                    Node {
                        id,
                        name: name.trim().to_string(),
                    },
                );
            }
        }
        Some(key)
    }

    /// Looks an edge endpoint up; a missing node is recorded and dropped.
    fn resolve(&mut self, entity: Entity, name: &str, edge: &str) -> Option<NameKey> {
        let key = NameKey::new(name);
        if key.is_empty() {
            self.note(
                DiagnosticKind::BlankName,
                format!("{} contains a blank {} name", edge, entity.label()),
            );
            return None;
        }
        if self.nodes(entity).contains_key(&key) {
            return Some(key);
        }

        let err = DomainError::MalformedReferenceData {
            entity: entity.label().to_string(),
            name: name.trim().to_string(),
            edge: edge.to_string(),
        };
        self.note(DiagnosticKind::DanglingReference, err.to_string());
        None
    }

    fn link_many(
        &mut self,
        from: Entity,
        to: Entity,
        table: &str,
        source: &BTreeMap<String, Vec<String>>,
    ) -> Edges {
        let mut edges = Edges::new();
        for (parent, children) in source {
            let Some(parent_key) = self.resolve(from, parent, table) else {
                continue;
            };
            let edge = format!("{}['{}']", table, parent);
            let set = edges.entry(parent_key).or_default();
            for child in children {
                if let Some(child_key) = self.resolve(to, child, &edge) {
                    set.insert(child_key);
                }
            }
        }
        edges
    }

    fn link_category_ranges(
        &mut self,
        forward: &BTreeMap<String, Vec<String>>,
        reverse: &BTreeMap<String, Vec<String>>,
    ) {
        let declared_forward: BTreeSet<(NameKey, NameKey)> = self
            .link_many(Entity::Category, Entity::Range, "category_ranges", forward)
            .into_iter()
            .flat_map(|(cat, ranges)| ranges.into_iter().map(move |r| (cat.clone(), r)))
            .collect();
        let declared_reverse: BTreeSet<(NameKey, NameKey)> = self
            .link_many(Entity::Range, Entity::Category, "range_categories", reverse)
            .into_iter()
            .flat_map(|(range, cats)| cats.into_iter().map(move |c| (c, range.clone())))
            .collect();

        // Only compare the views when the export ships both of them
        if !forward.is_empty() && !reverse.is_empty() {
            for (cat, range) in declared_forward.symmetric_difference(&declared_reverse) {
                let (present, missing) = if declared_forward.contains(&(cat.clone(), range.clone()))
                {
                    ("category_ranges", "range_categories")
                } else {
                    ("range_categories", "category_ranges")
                };
                let message = format!(
                    "Category '{}' / range '{}' is listed in {} but not in {}; views merged",
                    self.display(Entity::Category, cat),
                    self.display(Entity::Range, range),
                    present,
                    missing
                );
                self.note(DiagnosticKind::AsymmetricJunction, message);
            }
        }

        for (cat, range) in declared_forward.union(&declared_reverse) {
            self.category_ranges
                .entry(cat.clone())
                .or_default()
                .insert(range.clone());
            self.range_categories
                .entry(range.clone())
                .or_default()
                .insert(cat.clone());
        }
    }

    fn link_primary_ranges(&mut self, source: &BTreeMap<String, String>) {
        for (campaign, range) in source {
            let Some(campaign_key) = self.resolve(Entity::Campaign, campaign, "campaign_range")
            else {
                continue;
            };
            let edge = format!("campaign_range['{}']", campaign);
            if let Some(range_key) = self.resolve(Entity::Range, range, &edge) {
                self.campaign_range.insert(campaign_key, range_key);
            }
        }
    }

    /// The primary range must always belong to a campaign's override set.
    fn enforce_primary_in_overrides(&mut self) {
        let missing: Vec<(NameKey, NameKey)> = self
            .campaign_overrides
            .iter()
            .filter_map(|(campaign, ranges)| {
                self.campaign_range
                    .get(campaign)
                    .filter(|primary| !ranges.contains(*primary))
                    .map(|primary| (campaign.clone(), primary.clone()))
            })
            .collect();

        for (campaign, primary) in missing {
            let message = format!(
                "Primary range '{}' of campaign '{}' was missing from its override list; added",
                self.display(Entity::Range, &primary),
                self.display(Entity::Campaign, &campaign)
            );
            self.note(DiagnosticKind::PrimaryNotInOverride, message);
            self.campaign_overrides
                .entry(campaign)
                .or_default()
                .insert(primary);
        }
    }

    // --- QUERIES (case-insensitive, display casing preserved) ---

    pub fn has(&self, entity: Entity, name: &str) -> bool {
        self.nodes(entity).contains_key(&NameKey::new(name))
    }

    /// Canonical spelling of a node, if it exists.
    pub fn canonical(&self, entity: Entity, name: &str) -> Option<&str> {
        self.nodes(entity)
            .get(&NameKey::new(name))
            .map(|n| n.name.as_str())
    }

    pub fn has_business_unit(&self, name: &str) -> bool {
        self.has(Entity::BusinessUnit, name)
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.has(Entity::Category, name)
    }

    pub fn has_range(&self, name: &str) -> bool {
        self.has(Entity::Range, name)
    }

    pub fn has_campaign(&self, name: &str) -> bool {
        self.has(Entity::Campaign, name)
    }

    pub fn category_business_unit(&self, category: &str) -> Option<&str> {
        self.category_owner
            .get(&NameKey::new(category))
            .map(|bu| self.display(Entity::BusinessUnit, bu))
    }

    pub fn ranges_of_category(&self, category: &str) -> Vec<&str> {
        self.display_all(
            Entity::Range,
            self.category_ranges.get(&NameKey::new(category)),
        )
    }

    pub fn categories_of_range(&self, range: &str) -> Vec<&str> {
        self.display_all(
            Entity::Category,
            self.range_categories.get(&NameKey::new(range)),
        )
    }

    pub fn campaigns_of_range(&self, range: &str) -> Vec<&str> {
        self.display_all(
            Entity::Campaign,
            self.range_campaigns.get(&NameKey::new(range)),
        )
    }

    pub fn range_of_campaign(&self, campaign: &str) -> Option<&str> {
        self.campaign_range
            .get(&NameKey::new(campaign))
            .map(|r| self.display(Entity::Range, r))
    }

    pub fn campaign_overrides(&self, campaign: &str) -> Vec<&str> {
        self.display_all(
            Entity::Range,
            self.campaign_overrides.get(&NameKey::new(campaign)),
        )
    }

    pub fn is_shared_campaign(&self, campaign: &str) -> bool {
        self.shared_campaigns.contains(&NameKey::new(campaign))
    }

    pub fn campaign_aliases(&self, campaign: &str) -> Vec<&str> {
        self.display_all(
            Entity::Range,
            self.campaign_aliases.get(&NameKey::new(campaign)),
        )
    }

    pub fn category_aliases(&self, category: &str) -> Vec<&str> {
        self.display_all(
            Entity::Range,
            self.category_aliases.get(&NameKey::new(category)),
        )
    }

    /// No category, range or campaign at all: nothing can validate.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.ranges.is_empty() && self.campaigns.is_empty()
    }

    pub fn diagnostics(&self) -> &[GraphDiagnostic] {
        &self.diagnostics
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            business_units: self.business_units.len(),
            categories: self.categories.len(),
            ranges: self.ranges.len(),
            campaigns: self.campaigns.len(),
            category_range_edges: self.category_ranges.values().map(BTreeSet::len).sum(),
            range_campaign_edges: self.range_campaigns.values().map(BTreeSet::len).sum(),
            primary_mappings: self.campaign_range.len(),
            shared_campaigns: self.shared_campaigns.len(),
            diagnostics: self.diagnostics.len(),
        }
    }

    // --- KEY-LEVEL ACCESS (resolver / compatibility map) ---

    pub(crate) fn display<'a>(&'a self, entity: Entity, key: &'a NameKey) -> &'a str {
        self.nodes(entity)
            .get(key)
            .map(|n| n.name.as_str())
            .unwrap_or(key.as_str())
    }

    fn display_all<'a>(
        &'a self,
        entity: Entity,
        keys: Option<&'a BTreeSet<NameKey>>,
    ) -> Vec<&'a str> {
        keys.map(|set| set.iter().map(|k| self.display(entity, k)).collect())
            .unwrap_or_default()
    }

    pub(crate) fn campaign_keys(&self) -> impl Iterator<Item = &NameKey> {
        self.campaigns.keys()
    }

    pub(crate) fn primary_range_key(&self, campaign: &NameKey) -> Option<&NameKey> {
        self.campaign_range.get(campaign)
    }

    pub(crate) fn override_keys(&self, campaign: &NameKey) -> Option<&BTreeSet<NameKey>> {
        self.campaign_overrides.get(campaign)
    }

    pub(crate) fn is_shared_key(&self, campaign: &NameKey) -> bool {
        self.shared_campaigns.contains(campaign)
    }

    pub(crate) fn campaign_alias_keys(&self, campaign: &NameKey) -> Option<&BTreeSet<NameKey>> {
        self.campaign_aliases.get(campaign)
    }

    pub(crate) fn category_alias_keys(&self, category: &NameKey) -> Option<&BTreeSet<NameKey>> {
        self.category_aliases.get(category)
    }

    pub(crate) fn category_range_keys(&self, category: &NameKey) -> Option<&BTreeSet<NameKey>> {
        self.category_ranges.get(category)
    }

    /// Junction membership: does `range` list `campaign` in range_campaigns?
    pub(crate) fn junction_contains(&self, range: &NameKey, campaign: &NameKey) -> bool {
        self.range_campaigns
            .get(range)
            .is_some_and(|set| set.contains(campaign))
    }

    /// Does any range list this campaign in range_campaigns?
    pub(crate) fn junction_mentions(&self, campaign: &NameKey) -> bool {
        self.range_campaigns
            .values()
            .any(|set| set.contains(campaign))
    }

    /// Ranges whose range_campaigns entry lists this campaign.
    pub(crate) fn junction_range_keys<'a>(
        &'a self,
        campaign: &'a NameKey,
    ) -> impl Iterator<Item = &'a NameKey> + 'a {
        self.range_campaigns
            .iter()
            .filter(move |(_, set)| set.contains(campaign))
            .map(|(range, _)| range)
    }
}
