// gameplan-core/src/domain/rules/demographics.rs
//
// TV / Digital demographic rules: the "same as TV" parity flag and the
// media subtypes that make TV demographics mandatory.

use super::media::{MediaChannels, is_broadcast_subtype, listed};
use super::row::{Field, GamePlanRow};
use crate::domain::issue::ValidationIssue;
use crate::domain::project::RuleSettings;

/// (TV field, Digital counterpart)
const PARITY_PAIRS: [(Field, Field); 3] = [
    (Field::TvGender, Field::DigitalGender),
    (Field::TvMinAge, Field::DigitalMinAge),
    (Field::TvMaxAge, Field::DigitalMaxAge),
];

const TV_DEMOGRAPHICS: [Field; 3] = [Field::TvGender, Field::TvMinAge, Field::TvMaxAge];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParityFlag {
    Same,
    Different,
    /// Blank or not a recognised yes/no value.
    Unknown,
}

impl ParityFlag {
    pub fn read(row: &GamePlanRow, rules: &RuleSettings) -> Self {
        match row.get(Field::DigitalSameAsTv) {
            Some(v) if listed(&rules.affirmative_values, v) => Self::Same,
            Some(v) if listed(&rules.negative_values, v) => Self::Different,
            _ => Self::Unknown,
        }
    }
}

pub fn check_parity(row_index: usize, row: &GamePlanRow, rules: &RuleSettings) -> Vec<ValidationIssue> {
    match ParityFlag::read(row, rules) {
        ParityFlag::Different => Vec::new(),
        ParityFlag::Same => parity_mismatches(row_index, row),
        ParityFlag::Unknown => missing_flag(row_index, row, rules).into_iter().collect(),
    }
}

fn parity_mismatches(row_index: usize, row: &GamePlanRow) -> Vec<ValidationIssue> {
    PARITY_PAIRS
        .iter()
        .filter_map(|&(tv_field, digital_field)| {
            // Blank digital value inherits the TV one
            let digital = row.get(digital_field)?;
            let tv = row.get(tv_field);
            if tv == Some(digital) {
                return None;
            }
            Some(ValidationIssue::critical(
                row_index,
                digital_field.column(),
                format!(
                    "Digital target is flagged as same as TV but '{}' ({}) differs from '{}' ({})",
                    digital_field.column(),
                    digital,
                    tv_field.column(),
                    tv.unwrap_or("blank")
                ),
                Some(digital),
            ))
        })
        .collect()
}

fn missing_flag(row_index: usize, row: &GamePlanRow, rules: &RuleSettings) -> Option<ValidationIssue> {
    let channels = MediaChannels::of(row, rules);
    let raw = row.get(Field::DigitalSameAsTv);
    let what = match raw {
        Some(v) => format!("'{}' is not a yes/no answer", v),
        None => "is missing".to_string(),
    };
    let column = Field::DigitalSameAsTv.column();

    if channels.both() {
        Some(ValidationIssue::critical(
            row_index,
            column,
            format!("Row carries TV and Digital but the parity flag {}", what),
            raw,
        ))
    } else if channels.exactly_one() {
        Some(ValidationIssue::warning(
            row_index,
            column,
            format!("Parity flag {}", what),
            raw,
        ))
    } else {
        None
    }
}

pub fn check_subtype_requirements(
    row_index: usize,
    row: &GamePlanRow,
    rules: &RuleSettings,
) -> Vec<ValidationIssue> {
    let subtype = row.get(Field::MediaSubtype);
    if !is_broadcast_subtype(subtype, rules) {
        return Vec::new();
    }
    let subtype = subtype.unwrap_or_default();

    TV_DEMOGRAPHICS
        .iter()
        .filter(|field| row.get(**field).is_none())
        .map(|field| {
            ValidationIssue::critical(
                row_index,
                field.column(),
                format!("{} is required for media subtype '{}'", field.column(), subtype),
                None,
            )
        })
        .collect()
}
