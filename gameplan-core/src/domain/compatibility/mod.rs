// gameplan-core/src/domain/compatibility/mod.rs

pub mod map;
pub mod resolver;

pub use map::CompatibilityMap;
pub use resolver::{CampaignResolution, CompatibilityResolver, MatchTier, Resolution};
