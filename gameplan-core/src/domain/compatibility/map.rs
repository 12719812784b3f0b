// gameplan-core/src/domain/compatibility/map.rs

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::taxonomy::{NameKey, ReferenceGraph};

/// Precomputed `campaign -> ranges` (primary + overrides + aliases) and its
/// inverse. Symmetric by construction.
#[derive(Debug, Clone, Default)]
pub struct CompatibilityMap {
    forward: BTreeMap<NameKey, BTreeSet<NameKey>>,
    inverse: BTreeMap<NameKey, BTreeSet<NameKey>>,
}

impl CompatibilityMap {
    pub fn build(graph: &ReferenceGraph) -> Self {
        let mut map = Self::default();

        for campaign in graph.campaign_keys() {
            let mut ranges = BTreeSet::new();
            if let Some(primary) = graph.primary_range_key(campaign) {
                ranges.insert(primary.clone());
            }
            if let Some(overrides) = graph.override_keys(campaign) {
                ranges.extend(overrides.iter().cloned());
            }
            if let Some(aliases) = graph.campaign_alias_keys(campaign) {
                ranges.extend(aliases.iter().cloned());
            }
            if ranges.is_empty() {
                continue;
            }

            for range in &ranges {
                map.inverse
                    .entry(range.clone())
                    .or_default()
                    .insert(campaign.clone());
            }
            map.forward.insert(campaign.clone(), ranges);
        }

        map
    }

    pub fn forward(&self, campaign: &NameKey) -> Option<&BTreeSet<NameKey>> {
        self.forward.get(campaign)
    }

    pub fn inverse(&self, range: &NameKey) -> Option<&BTreeSet<NameKey>> {
        self.inverse.get(range)
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    pub fn is_symmetric(&self) -> bool {
        let forward_ok = self.forward.iter().all(|(campaign, ranges)| {
            ranges
                .iter()
                .all(|r| self.inverse.get(r).is_some_and(|c| c.contains(campaign)))
        });
        let inverse_ok = self.inverse.iter().all(|(range, campaigns)| {
            campaigns
                .iter()
                .all(|c| self.forward.get(c).is_some_and(|r| r.contains(range)))
        });
        forward_ok && inverse_ok
    }
}
