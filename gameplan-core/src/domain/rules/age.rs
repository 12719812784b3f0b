// gameplan-core/src/domain/rules/age.rs
//
// Age-range well-formedness. Ages are numeric strings; the max-age field
// also accepts "+" for "no upper bound".

use regex::Regex;
use std::sync::OnceLock;

use super::row::{Field, GamePlanRow};
use crate::domain::issue::ValidationIssue;

pub const OPEN_ENDED: &str = "+";

fn re_age() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\d+(\.\d+)?$").unwrap_or_else(|_| {
            // Hardcoded pattern, cannot fail
            Regex::new("$^").unwrap_or_else(|_| unreachable!())
        })
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AgeValue {
    Years(f64),
    OpenEnded,
}

/// Parses an age cell. Thousands separators are stripped first.
/// Returns None for anything that is neither a number nor the sentinel.
pub fn parse_age(raw: &str) -> Option<AgeValue> {
    let cleaned = raw.trim().replace(',', "");
    if cleaned == OPEN_ENDED {
        return Some(AgeValue::OpenEnded);
    }
    if !re_age().is_match(&cleaned) {
        return None;
    }
    cleaned.parse::<f64>().ok().map(AgeValue::Years)
}

#[derive(Debug, Clone, Copy)]
pub struct AgePair {
    pub label: &'static str,
    pub min: Field,
    pub max: Field,
}

pub const TV_AGES: AgePair = AgePair {
    label: "TV",
    min: Field::TvMinAge,
    max: Field::TvMaxAge,
};

pub const DIGITAL_AGES: AgePair = AgePair {
    label: "Digital",
    min: Field::DigitalMinAge,
    max: Field::DigitalMaxAge,
};

pub fn check_age_pair(row_index: usize, row: &GamePlanRow, pair: AgePair) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let min_raw = row.get(pair.min);
    let max_raw = row.get(pair.max);

    // 1. Minimum: a number, never the sentinel
    let min_years = match min_raw.map(|raw| (raw, parse_age(raw))) {
        None => None,
        Some((raw, Some(AgeValue::OpenEnded))) => {
            issues.push(ValidationIssue::critical(
                row_index,
                pair.min.column(),
                format!(
                    "{} min age cannot be '{}': the open-ended marker is only allowed on the max age",
                    pair.label, OPEN_ENDED
                ),
                Some(raw),
            ));
            None
        }
        Some((_, Some(AgeValue::Years(years)))) => Some(years),
        Some((raw, None)) => {
            issues.push(ValidationIssue::critical(
                row_index,
                pair.min.column(),
                format!("{} min age '{}' is not a number", pair.label, raw),
                Some(raw),
            ));
            None
        }
    };

    // 2. Maximum: the sentinel, or strictly above the minimum
    if let Some(raw) = max_raw {
        match parse_age(raw) {
            Some(AgeValue::OpenEnded) => {}
            Some(AgeValue::Years(max_years)) => {
                if let Some(min_years) = min_years
                    && max_years <= min_years
                {
                    issues.push(ValidationIssue::critical(
                        row_index,
                        pair.max.column(),
                        format!(
                            "{} max age must exceed min age (min {}, max {})",
                            pair.label,
                            min_raw.unwrap_or_default(),
                            raw
                        ),
                        Some(raw),
                    ));
                }
            }
            None => {
                issues.push(ValidationIssue::critical(
                    row_index,
                    pair.max.column(),
                    format!(
                        "{} max age '{}' must be a number or '{}'",
                        pair.label, raw, OPEN_ENDED
                    ),
                    Some(raw),
                ));
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::issue::Severity;

    fn tv(min: &str, max: &str) -> Vec<ValidationIssue> {
        let row = GamePlanRow::new()
            .with(Field::TvMinAge, min)
            .with(Field::TvMaxAge, max);
        check_age_pair(4, &row, TV_AGES)
    }

    #[test]
    fn test_parse_age() {
        assert_eq!(parse_age("18"), Some(AgeValue::Years(18.0)));
        assert_eq!(parse_age(" 1,000 "), Some(AgeValue::Years(1000.0)));
        assert_eq!(parse_age("+"), Some(AgeValue::OpenEnded));
        assert_eq!(parse_age("18+"), None);
        assert_eq!(parse_age("-5"), None);
        assert_eq!(parse_age("abc"), None);
    }

    #[test]
    fn test_sentinel_min_is_always_critical() {
        for max in ["", "+", "65", "10"] {
            let issues = tv("+", max);
            assert_eq!(issues.len(), 1, "max = {max:?}");
            assert_eq!(issues[0].severity(), Severity::Critical);
            assert_eq!(issues[0].column(), "TV Demo Min. Age");
        }
    }

    #[test]
    fn test_open_ended_max_is_valid() {
        assert!(tv("18", "+").is_empty());
        assert!(tv("55", "+").is_empty());
    }

    #[test]
    fn test_max_must_exceed_min() {
        let issues = tv("55", "34");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].column(), "TV Demo Max. Age");
        assert!(issues[0].message().contains("max age must exceed min age"));

        assert_eq!(tv("25", "25").len(), 1);
        assert!(tv("25", "54").is_empty());
    }

    #[test]
    fn test_thousand_separators_are_stripped() {
        assert!(tv("1,000", "2,000").is_empty());
        assert_eq!(tv("2,000", "1,000").len(), 1);
    }

    #[test]
    fn test_garbage_values() {
        let issues = tv("twenty", "sixty");
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.severity() == Severity::Critical));
    }

    #[test]
    fn test_missing_values_are_not_this_rules_business() {
        let row = GamePlanRow::new();
        assert!(check_age_pair(0, &row, DIGITAL_AGES).is_empty());
        assert!(tv("", "40").is_empty());
    }
}
