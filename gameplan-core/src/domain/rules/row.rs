// gameplan-core/src/domain/rules/row.rs
//
// Typed game plan row. The upload side hands us flat header -> value
// records; headers are matched here once so the rule battery can rely on
// known field names.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

fn re_header_noise() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[^a-z0-9+]+").unwrap_or_else(|_| {
            // Hardcoded pattern, cannot fail
            Regex::new("$^").unwrap_or_else(|_| unreachable!())
        })
    })
}

/// "TV Demo Min. Age" -> "tv demo min age"
fn normalize_header(header: &str) -> String {
    re_header_noise()
        .replace_all(&header.trim().to_lowercase(), " ")
        .trim()
        .to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    BusinessUnit,
    Category,
    Range,
    Campaign,
    Media,
    MediaSubtype,
    TvGender,
    TvMinAge,
    TvMaxAge,
    DigitalGender,
    DigitalMinAge,
    DigitalMaxAge,
    DigitalSameAsTv,
}

impl Field {
    pub const ALL: [Field; 13] = [
        Field::BusinessUnit,
        Field::Category,
        Field::Range,
        Field::Campaign,
        Field::Media,
        Field::MediaSubtype,
        Field::TvGender,
        Field::TvMinAge,
        Field::TvMaxAge,
        Field::DigitalGender,
        Field::DigitalMinAge,
        Field::DigitalMaxAge,
        Field::DigitalSameAsTv,
    ];

    /// Column name used in issues (spreadsheet header).
    pub fn column(&self) -> &'static str {
        match self {
            Self::BusinessUnit => "Business Unit",
            Self::Category => "Category",
            Self::Range => "Range",
            Self::Campaign => "Campaign",
            Self::Media => "Media",
            Self::MediaSubtype => "Media Subtype",
            Self::TvGender => "TV Demo Gender",
            Self::TvMinAge => "TV Demo Min. Age",
            Self::TvMaxAge => "TV Demo Max. Age",
            Self::DigitalGender => "Digital Demo Gender",
            Self::DigitalMinAge => "Digital Demo Min. Age",
            Self::DigitalMaxAge => "Digital Demo Max. Age",
            Self::DigitalSameAsTv => "Is Digital target the same as TV?",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::BusinessUnit => &["bu", "business unit", "businessunit", "business_unit"],
            Self::Category => &["category"],
            Self::Range => &["range"],
            Self::Campaign => &["campaign"],
            Self::Media => &["media", "media type"],
            Self::MediaSubtype => &["media subtype", "media sub type", "subtype"],
            Self::TvGender => &["tv demo gender", "tv gender"],
            Self::TvMinAge => &["tv demo min age", "min tv age", "tv min age"],
            Self::TvMaxAge => &["tv demo max age", "max tv age", "tv max age"],
            Self::DigitalGender => &["digital demo gender", "digital gender"],
            Self::DigitalMinAge => &["digital demo min age", "min digital age", "digital min age"],
            Self::DigitalMaxAge => &["digital demo max age", "max digital age", "digital max age"],
            Self::DigitalSameAsTv => &[
                "is digital target the same as tv",
                "digital same as tv",
                "same as tv",
            ],
        }
    }

    /// Matches a raw spreadsheet header, ignoring case and punctuation.
    pub fn from_header(header: &str) -> Option<Field> {
        let normalized = normalize_header(header);
        Field::ALL.into_iter().find(|field| {
            field
                .aliases()
                .iter()
                .any(|alias| normalize_header(alias) == normalized)
        })
    }
}

/// Gender / min age / max age triple, kept as raw strings: the age rules
/// own the parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographic {
    pub gender: Option<String>,
    pub min_age: Option<String>,
    pub max_age: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamePlanRow {
    pub business_unit: Option<String>,
    pub category: Option<String>,
    pub range: Option<String>,
    pub campaign: Option<String>,
    pub media: Option<String>,
    pub media_subtype: Option<String>,
    #[serde(default)]
    pub tv: Demographic,
    #[serde(default)]
    pub digital: Demographic,
    pub digital_same_as_tv: Option<String>,
    /// Columns the rule battery does not know about, kept verbatim.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: BTreeMap<String, String>,
}

impl GamePlanRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a row from a raw header -> value record.
    pub fn from_record<'a, I>(record: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut row = Self::default();
        for (header, value) in record {
            match Field::from_header(header) {
                Some(field) => row.set(field, value),
                None => {
                    row.extras
                        .insert(header.trim().to_string(), value.trim().to_string());
                }
            }
        }
        row
    }

    pub fn with(mut self, field: Field, value: &str) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: Field, value: &str) {
        let value = non_blank(value).map(str::to_string);
        let slot = match field {
            Field::BusinessUnit => &mut self.business_unit,
            Field::Category => &mut self.category,
            Field::Range => &mut self.range,
            Field::Campaign => &mut self.campaign,
            Field::Media => &mut self.media,
            Field::MediaSubtype => &mut self.media_subtype,
            Field::TvGender => &mut self.tv.gender,
            Field::TvMinAge => &mut self.tv.min_age,
            Field::TvMaxAge => &mut self.tv.max_age,
            Field::DigitalGender => &mut self.digital.gender,
            Field::DigitalMinAge => &mut self.digital.min_age,
            Field::DigitalMaxAge => &mut self.digital.max_age,
            Field::DigitalSameAsTv => &mut self.digital_same_as_tv,
        };
        *slot = value;
    }

    /// Trimmed, non-blank value of a field.
    pub fn get(&self, field: Field) -> Option<&str> {
        let raw = match field {
            Field::BusinessUnit => &self.business_unit,
            Field::Category => &self.category,
            Field::Range => &self.range,
            Field::Campaign => &self.campaign,
            Field::Media => &self.media,
            Field::MediaSubtype => &self.media_subtype,
            Field::TvGender => &self.tv.gender,
            Field::TvMinAge => &self.tv.min_age,
            Field::TvMaxAge => &self.tv.max_age,
            Field::DigitalGender => &self.digital.gender,
            Field::DigitalMinAge => &self.digital.min_age,
            Field::DigitalMaxAge => &self.digital.max_age,
            Field::DigitalSameAsTv => &self.digital_same_as_tv,
        };
        raw.as_deref().and_then(non_blank)
    }
}

pub(crate) fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
