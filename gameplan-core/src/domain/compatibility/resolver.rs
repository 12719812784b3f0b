// gameplan-core/src/domain/compatibility/resolver.rs
//
// Answers "is campaign X valid under range Y?" and "is range Y valid under
// category Z?" with the tiered lookup:
//   shared override list -> primary mapping -> alias table -> invalid.
// All comparisons go through NameKey (trim + case-fold).

use std::collections::BTreeSet;

use super::map::CompatibilityMap;
use crate::domain::taxonomy::graph::Entity;
use crate::domain::taxonomy::{NameKey, ReferenceGraph};

/// Which tier accepted the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    Primary,
    SharedOverride,
    SelfReference,
    Alias,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Valid(MatchTier),
    /// Wrong parent. `expected` lists the valid parents, display casing.
    Invalid { expected: Vec<String> },
    /// The child has no mapping at all (unlinked campaign).
    Unmapped,
}

impl Resolution {
    pub fn is_valid(&self) -> bool {
        matches!(self, Resolution::Valid(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignResolution {
    pub resolution: Resolution,
    /// Set when the override map and the junction set disagree.
    pub integrity_note: Option<String>,
}

impl CampaignResolution {
    fn clean(resolution: Resolution) -> Self {
        Self {
            resolution,
            integrity_note: None,
        }
    }
}

pub struct CompatibilityResolver<'g> {
    graph: &'g ReferenceGraph,
    map: CompatibilityMap,
}

impl<'g> CompatibilityResolver<'g> {
    pub fn new(graph: &'g ReferenceGraph) -> Self {
        Self {
            graph,
            map: CompatibilityMap::build(graph),
        }
    }

    pub fn graph(&self) -> &'g ReferenceGraph {
        self.graph
    }

    pub fn map(&self) -> &CompatibilityMap {
        &self.map
    }

    pub fn campaign_in_range(&self, campaign: &str, range: &str) -> CampaignResolution {
        let campaign = NameKey::new(campaign);
        let range = NameKey::new(range);

        if self.graph.is_shared_key(&campaign) {
            return self.shared_campaign_in_range(&campaign, &range);
        }

        let Some(primary) = self.graph.primary_range_key(&campaign) else {
            return CampaignResolution::clean(Resolution::Unmapped);
        };
        if *primary == range {
            return CampaignResolution::clean(Resolution::Valid(MatchTier::Primary));
        }
        if self.has_campaign_alias(&campaign, &range) {
            return CampaignResolution::clean(Resolution::Valid(MatchTier::Alias));
        }
        CampaignResolution::clean(Resolution::Invalid {
            expected: self.valid_ranges_for(&campaign),
        })
    }

    fn shared_campaign_in_range(&self, campaign: &NameKey, range: &NameKey) -> CampaignResolution {
        let overrides = self.graph.override_keys(campaign);
        let primary = self.graph.primary_range_key(campaign);
        let in_junction_anywhere = self.graph.junction_mentions(campaign);

        if overrides.is_none() && primary.is_none() && !in_junction_anywhere {
            return CampaignResolution::clean(Resolution::Unmapped);
        }

        let in_override =
            overrides.is_some_and(|set| set.contains(range)) || primary == Some(range);

        // Junction set wins when it knows about the campaign at all
        let (member, integrity_note) = if in_junction_anywhere {
            let in_junction = self.graph.junction_contains(range, campaign);
            let note = (in_junction != in_override).then(|| {
                format!(
                    "Shared campaign '{}' / range '{}': override map says {}, range_campaigns says {} (range_campaigns used)",
                    self.graph.display(Entity::Campaign, campaign),
                    self.graph.display(Entity::Range, range),
                    yes_no(in_override),
                    yes_no(in_junction)
                )
            });
            (in_junction, note)
        } else {
            (in_override, None)
        };

        let resolution = if member {
            Resolution::Valid(MatchTier::SharedOverride)
        } else if self.has_campaign_alias(campaign, range) {
            Resolution::Valid(MatchTier::Alias)
        } else {
            Resolution::Invalid {
                expected: self.valid_ranges_for(campaign),
            }
        };

        CampaignResolution {
            resolution,
            integrity_note,
        }
    }

    pub fn range_in_category(&self, category: &str, range: &str) -> Resolution {
        let category = NameKey::new(category);
        let range = NameKey::new(range);

        let explicit = self.graph.category_range_keys(&category);
        if explicit.is_some_and(|set| set.contains(&range)) {
            return Resolution::Valid(MatchTier::Primary);
        }
        // A category named like its range is valid without an explicit edge
        if !category.is_empty() && category == range {
            return Resolution::Valid(MatchTier::SelfReference);
        }
        if self
            .graph
            .category_alias_keys(&category)
            .is_some_and(|set| set.contains(&range))
        {
            return Resolution::Valid(MatchTier::Alias);
        }

        let mut expected: BTreeSet<&NameKey> = explicit.map(|s| s.iter().collect()).unwrap_or_default();
        if let Some(aliases) = self.graph.category_alias_keys(&category) {
            expected.extend(aliases.iter());
        }
        Resolution::Invalid {
            expected: expected
                .into_iter()
                .map(|k| self.graph.display(Entity::Range, k).to_string())
                .collect(),
        }
    }

    /// Every range the campaign may legitimately serve, display casing.
    /// Mirrors the tiers of `campaign_in_range`, so a range refused there is
    /// never listed here.
    pub fn valid_ranges_for(&self, campaign: &NameKey) -> Vec<String> {
        let mut keys: BTreeSet<&NameKey> = BTreeSet::new();

        if !self.graph.is_shared_key(campaign) {
            keys.extend(self.graph.primary_range_key(campaign));
        } else if self.graph.junction_mentions(campaign) {
            keys.extend(self.graph.junction_range_keys(campaign));
        } else if let Some(forward) = self.map.forward(campaign) {
            // primary + overrides + aliases
            keys.extend(forward.iter());
        }
        if let Some(aliases) = self.graph.campaign_alias_keys(campaign) {
            keys.extend(aliases.iter());
        }

        keys.into_iter()
            .map(|k| self.graph.display(Entity::Range, k).to_string())
            .collect()
    }

    fn has_campaign_alias(&self, campaign: &NameKey, range: &NameKey) -> bool {
        self.graph
            .campaign_alias_keys(campaign)
            .is_some_and(|set| set.contains(range))
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::taxonomy::{CategoryRecord, NodeRecord, ReferenceSnapshot};

    fn snapshot() -> ReferenceSnapshot {
        let mut s = ReferenceSnapshot {
            categories: ["Men", "Hair"]
                .into_iter()
                .map(|name| CategoryRecord {
                    name: name.into(),
                    ..Default::default()
                })
                .collect(),
            ranges: ["Men", "Deo", "Brand (Institutional)", "Shampoo", "Conditioner"]
                .into_iter()
                .map(NodeRecord::named)
                .collect(),
            campaigns: ["Search AWON", "Fresh Launch", "Unlinked Promo", "Gen Z Push"]
                .into_iter()
                .map(NodeRecord::named)
                .collect(),
            shared_campaigns: vec!["Search AWON".into()],
            ..Default::default()
        };
        s.category_ranges
            .insert("Hair".into(), vec!["Shampoo".into(), "Conditioner".into()]);
        s.category_ranges.insert("Men".into(), vec!["Deo".into()]);
        s.category_aliases.insert("Hair".into(), vec!["Deo".into()]);
        s.campaign_range.insert("Search AWON".into(), "Deo".into());
        s.campaign_range.insert("Fresh Launch".into(), "Shampoo".into());
        s.campaign_compatibility.insert(
            "Search AWON".into(),
            vec!["Deo".into(), "Brand (Institutional)".into()],
        );
        s.campaign_aliases
            .insert("Fresh Launch".into(), vec!["Conditioner".into()]);
        s.range_campaigns
            .insert("Shampoo".into(), vec!["Fresh Launch".into(), "Gen Z Push".into()]);
        s
    }

    #[test]
    fn test_primary_mapping_ignores_casing() {
        let graph = ReferenceGraph::load(&snapshot());
        let resolver = CompatibilityResolver::new(&graph);
        for (campaign, range) in [
            ("Fresh Launch", "Shampoo"),
            ("FRESH LAUNCH", "shampoo"),
            ("  fresh launch ", "SHAMPOO "),
        ] {
            assert_eq!(
                resolver.campaign_in_range(campaign, range).resolution,
                Resolution::Valid(MatchTier::Primary)
            );
        }
        assert!(resolver.range_in_category("hair", "SHAMPOO").is_valid());
        assert!(resolver.range_in_category("HAIR", "shampoo").is_valid());
    }

    #[test]
    fn test_self_reference_category_range() {
        let graph = ReferenceGraph::load(&snapshot());
        let resolver = CompatibilityResolver::new(&graph);
        assert_eq!(
            resolver.range_in_category("Men", "men"),
            Resolution::Valid(MatchTier::SelfReference)
        );
    }

    #[test]
    fn test_category_alias_and_invalid_lists_alternatives() {
        let graph = ReferenceGraph::load(&snapshot());
        let resolver = CompatibilityResolver::new(&graph);
        assert_eq!(
            resolver.range_in_category("Hair", "Deo"),
            Resolution::Valid(MatchTier::Alias)
        );
        assert_eq!(
            resolver.range_in_category("Men", "Shampoo"),
            Resolution::Invalid {
                expected: vec!["Deo".to_string()]
            }
        );
    }

    #[test]
    fn test_shared_campaign_accepts_every_override_range_only() {
        let graph = ReferenceGraph::load(&snapshot());
        let resolver = CompatibilityResolver::new(&graph);
        for range in graph.campaign_overrides("Search AWON") {
            let res = resolver.campaign_in_range("search awon", range);
            assert_eq!(res.resolution, Resolution::Valid(MatchTier::SharedOverride));
            assert_eq!(res.integrity_note, None);
        }
        let res = resolver.campaign_in_range("Search AWON", "Shampoo");
        assert_eq!(
            res.resolution,
            Resolution::Invalid {
                expected: vec!["Brand (Institutional)".to_string(), "Deo".to_string()]
            }
        );
    }

    #[test]
    fn test_campaign_alias_rescues_strict_mismatch() {
        let graph = ReferenceGraph::load(&snapshot());
        let resolver = CompatibilityResolver::new(&graph);
        assert_eq!(
            resolver
                .campaign_in_range("Fresh Launch", "Conditioner")
                .resolution,
            Resolution::Valid(MatchTier::Alias)
        );
        assert_eq!(
            resolver.campaign_in_range("Fresh Launch", "Deo").resolution,
            Resolution::Invalid {
                expected: vec!["Conditioner".to_string(), "Shampoo".to_string()]
            }
        );
    }

    #[test]
    fn test_campaign_without_primary_is_unmapped_even_if_listed_by_a_range() {
        let graph = ReferenceGraph::load(&snapshot());
        let resolver = CompatibilityResolver::new(&graph);
        assert_eq!(
            resolver.campaign_in_range("Gen Z Push", "Shampoo").resolution,
            Resolution::Unmapped
        );
        assert_eq!(
            resolver.campaign_in_range("Unlinked Promo", "Deo").resolution,
            Resolution::Unmapped
        );
        assert_eq!(
            resolver.campaign_in_range("Never Heard Of", "Deo").resolution,
            Resolution::Unmapped
        );
    }

    #[test]
    fn test_override_entries_of_unshared_campaign_are_not_offered() {
        let mut s = snapshot();
        s.campaign_compatibility
            .insert("Fresh Launch".into(), vec!["Shampoo".into(), "Men".into()]);
        let graph = ReferenceGraph::load(&s);
        let resolver = CompatibilityResolver::new(&graph);

        let res = resolver.campaign_in_range("Fresh Launch", "Men");
        let Resolution::Invalid { expected } = res.resolution else {
            panic!("expected Invalid, got {:?}", res.resolution);
        };
        assert!(!expected.iter().any(|r| r == "Men"));
        assert_eq!(expected, vec!["Conditioner".to_string(), "Shampoo".to_string()]);
    }

    #[test]
    fn test_junction_rejected_range_is_not_offered() {
        let mut s = snapshot();
        s.range_campaigns
            .insert("Deo".into(), vec!["Search AWON".into()]);
        let graph = ReferenceGraph::load(&s);
        let resolver = CompatibilityResolver::new(&graph);

        for range in ["Brand (Institutional)", "Shampoo"] {
            let res = resolver.campaign_in_range("Search AWON", range);
            let Resolution::Invalid { expected } = res.resolution else {
                panic!("expected Invalid for {}, got {:?}", range, res.resolution);
            };
            assert!(!expected.iter().any(|r| r == range));
            assert_eq!(expected, vec!["Deo".to_string()]);
        }
    }

    #[test]
    fn test_junction_set_wins_over_override_map() {
        let mut s = snapshot();
        s.range_campaigns
            .insert("Deo".into(), vec!["Search AWON".into()]);
        let graph = ReferenceGraph::load(&s);
        let resolver = CompatibilityResolver::new(&graph);

        // Override lists Brand (Institutional) but the junction does not
        let res = resolver.campaign_in_range("Search AWON", "Brand (Institutional)");
        assert!(!res.resolution.is_valid());
        assert!(res.integrity_note.unwrap().contains("range_campaigns used"));

        let res = resolver.campaign_in_range("Search AWON", "Deo");
        assert_eq!(res.resolution, Resolution::Valid(MatchTier::SharedOverride));
        assert_eq!(res.integrity_note, None);
    }
}
