// gameplan-core/src/domain/rules/media.rs

use regex::Regex;
use std::sync::OnceLock;

use super::row::{Field, GamePlanRow};
use crate::domain::project::RuleSettings;
use crate::domain::taxonomy::names::same_name;

fn re_media_separator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\s*(?:[,+/&;|]|\band\b)\s*").unwrap_or_else(|_| {
            // Hardcoded pattern, cannot fail
            Regex::new("$^").unwrap_or_else(|_| unreachable!())
        })
    })
}

/// Which demographic channels a row carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MediaChannels {
    pub tv: bool,
    pub digital: bool,
}

impl MediaChannels {
    /// "TV + Digital", "TV, Digital", "tv/digital"... plus the subtype.
    pub fn of(row: &GamePlanRow, rules: &RuleSettings) -> Self {
        let mut channels = Self::default();

        let tokens = row
            .get(Field::Media)
            .map(|media| {
                re_media_separator()
                    .split(media)
                    .filter(|t| !t.trim().is_empty())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        for token in tokens.iter().copied().chain(row.get(Field::MediaSubtype)) {
            if listed(&rules.tv_media, token) || listed(&rules.broadcast_subtypes, token) {
                channels.tv = true;
            }
            if listed(&rules.digital_media, token) {
                channels.digital = true;
            }
        }

        channels
    }

    pub fn both(&self) -> bool {
        self.tv && self.digital
    }

    pub fn exactly_one(&self) -> bool {
        self.tv != self.digital
    }
}

/// Broadcast subtypes carry real TV targeting, so their TV demographics are
/// mandatory. Every other subtype (OOH, Print, Radio...) leaves them optional.
pub fn is_broadcast_subtype(subtype: Option<&str>, rules: &RuleSettings) -> bool {
    subtype.is_some_and(|s| listed(&rules.broadcast_subtypes, s))
}

pub(crate) fn listed(values: &[String], candidate: &str) -> bool {
    values.iter().any(|v| same_name(v, candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channels(media: &str, subtype: Option<&str>) -> MediaChannels {
        let mut row = GamePlanRow::new().with(Field::Media, media);
        if let Some(s) = subtype {
            row.set(Field::MediaSubtype, s);
        }
        MediaChannels::of(&row, &RuleSettings::default())
    }

    #[test]
    fn test_mixed_media_notations() {
        for media in ["TV + Digital", "tv, digital", "TV/Digital", "Digital and TV"] {
            let c = channels(media, None);
            assert!(c.both(), "{media} should carry both channels");
        }
    }

    #[test]
    fn test_single_channel() {
        let c = channels("TV", None);
        assert!(c.tv && !c.digital);
        assert!(c.exactly_one());

        let c = channels("Digital", None);
        assert!(c.digital && !c.tv);
    }

    #[test]
    fn test_broadcast_subtype_implies_tv() {
        let c = channels("Traditional", Some("Open TV"));
        assert!(c.tv);
        assert!(!c.digital);
        assert_eq!(channels("Traditional", Some("Print")), MediaChannels::default());
    }

    #[test]
    fn test_broadcast_subtypes() {
        let rules = RuleSettings::default();
        assert!(is_broadcast_subtype(Some("paytv"), &rules));
        assert!(is_broadcast_subtype(Some(" Open TV "), &rules));
        assert!(!is_broadcast_subtype(Some("OOH"), &rules));
        assert!(!is_broadcast_subtype(Some("Search"), &rules));
        assert!(!is_broadcast_subtype(None, &rules));
    }
}
