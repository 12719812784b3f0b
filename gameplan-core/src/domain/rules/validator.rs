// gameplan-core/src/domain/rules/validator.rs
//
// Runs the whole rule battery on one row. Every rule runs; a failing rule
// never hides the next one.

use super::age::{DIGITAL_AGES, TV_AGES, check_age_pair};
use super::demographics::{check_parity, check_subtype_requirements};
use super::row::{Field, GamePlanRow};
use crate::domain::compatibility::{CompatibilityResolver, Resolution};
use crate::domain::issue::{Severity, ValidationIssue};
use crate::domain::project::RuleSettings;
use crate::domain::taxonomy::ReferenceGraph;
use crate::domain::taxonomy::graph::Entity;
use crate::domain::taxonomy::names::same_name;

pub struct RowValidator<'g> {
    resolver: CompatibilityResolver<'g>,
    rules: &'g RuleSettings,
    unlinked_campaign_severity: Severity,
}

impl<'g> RowValidator<'g> {
    pub fn new(graph: &'g ReferenceGraph, rules: &'g RuleSettings) -> Self {
        Self {
            resolver: CompatibilityResolver::new(graph),
            rules,
            unlinked_campaign_severity: Severity::Critical,
        }
    }

    pub fn with_unlinked_campaign_severity(mut self, severity: Severity) -> Self {
        self.unlinked_campaign_severity = severity;
        self
    }

    fn graph(&self) -> &'g ReferenceGraph {
        self.resolver.graph()
    }

    pub fn validate(&self, row_index: usize, row: &GamePlanRow) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        // 1. Taxonomy: presence, existence, casing
        let business_unit = self.known(row_index, row, Field::BusinessUnit, Entity::BusinessUnit, &mut issues);
        let category = self.known(row_index, row, Field::Category, Entity::Category, &mut issues);
        let range = self.known(row_index, row, Field::Range, Entity::Range, &mut issues);
        for field in [Field::Category, Field::Range, Field::Campaign] {
            if row.get(field).is_none() {
                issues.push(ValidationIssue::critical(
                    row_index,
                    field.column(),
                    format!("{} is required", field.column()),
                    None,
                ));
            }
        }
        if let Some(campaign) = row.get(Field::Campaign) {
            self.suggest_casing(row_index, Field::Campaign, Entity::Campaign, campaign, &mut issues);
        }

        // 2. Ownership
        if let Some(category) = category {
            issues.extend(self.check_business_unit(row_index, category, business_unit));
        }

        // 3. Structure
        if let (Some(category), Some(range)) = (category, range) {
            issues.extend(self.check_range(row_index, category, range));
        }
        if let Some(campaign) = row.get(Field::Campaign) {
            issues.extend(self.check_campaign(row_index, campaign, range));
        }

        // 4. Demographics
        issues.extend(check_age_pair(row_index, row, TV_AGES));
        issues.extend(check_age_pair(row_index, row, DIGITAL_AGES));
        issues.extend(check_parity(row_index, row, self.rules));
        issues.extend(check_subtype_requirements(row_index, row, self.rules));

        issues
    }

    /// Returns the row value when it names a node of the graph.
    fn known<'r>(
        &self,
        row_index: usize,
        row: &'r GamePlanRow,
        field: Field,
        entity: Entity,
        issues: &mut Vec<ValidationIssue>,
    ) -> Option<&'r str> {
        let value = row.get(field)?;
        if !self.graph().has(entity, value) {
            issues.push(ValidationIssue::critical(
                row_index,
                field.column(),
                format!("Unknown {} '{}'", entity.label(), value),
                Some(value),
            ));
            return None;
        }
        self.suggest_casing(row_index, field, entity, value, issues);
        Some(value)
    }

    fn suggest_casing(
        &self,
        row_index: usize,
        field: Field,
        entity: Entity,
        value: &str,
        issues: &mut Vec<ValidationIssue>,
    ) {
        if let Some(canonical) = self.graph().canonical(entity, value)
            && canonical != value
        {
            issues.push(ValidationIssue::suggestion(
                row_index,
                field.column(),
                format!("Use the reference spelling '{}'", canonical),
                Some(value),
            ));
        }
    }

    fn check_business_unit(
        &self,
        row_index: usize,
        category: &str,
        declared: Option<&str>,
    ) -> Option<ValidationIssue> {
        let Some(owner) = self.graph().category_business_unit(category) else {
            return Some(ValidationIssue::warning(
                row_index,
                Field::Category.column(),
                format!("Category '{}' is not linked to any business unit", category),
                Some(category),
            ));
        };
        // Blank business unit: inferred from the category
        let declared = declared?;
        (!same_name(owner, declared)).then(|| {
            ValidationIssue::critical(
                row_index,
                Field::BusinessUnit.column(),
                format!(
                    "Business unit mismatch: category '{}' belongs to '{}', not '{}'",
                    category, owner, declared
                ),
                Some(declared),
            )
        })
    }

    fn check_range(&self, row_index: usize, category: &str, range: &str) -> Option<ValidationIssue> {
        match self.resolver.range_in_category(category, range) {
            Resolution::Valid(_) | Resolution::Unmapped => None,
            Resolution::Invalid { expected } => Some(ValidationIssue::critical(
                row_index,
                Field::Range.column(),
                format!(
                    "Range '{}' is not valid for category '{}' ({})",
                    range,
                    category,
                    alternatives("valid ranges", &expected)
                ),
                Some(range),
            )),
        }
    }

    fn check_campaign(
        &self,
        row_index: usize,
        campaign: &str,
        range: Option<&str>,
    ) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let resolved = self.resolver.campaign_in_range(campaign, range.unwrap_or_default());

        match resolved.resolution {
            Resolution::Valid(_) => {}
            Resolution::Unmapped => issues.push(ValidationIssue::new(
                row_index,
                Field::Campaign.column(),
                self.unlinked_campaign_severity,
                format!("Campaign '{}' has no range mapping", campaign),
                Some(campaign),
            )),
            // Without a usable range only the unmapped case is reportable
            Resolution::Invalid { .. } if range.is_none() => {}
            Resolution::Invalid { expected } => issues.push(ValidationIssue::critical(
                row_index,
                Field::Campaign.column(),
                format!(
                    "Campaign '{}' does not belong to range '{}' ({})",
                    campaign,
                    range.unwrap_or_default(),
                    alternatives("valid ranges", &expected)
                ),
                Some(campaign),
            )),
        }

        if let Some(note) = resolved.integrity_note {
            issues.push(ValidationIssue::warning(
                row_index,
                Field::Campaign.column(),
                note,
                Some(campaign),
            ));
        }
        issues
    }
}

fn alternatives(label: &str, expected: &[String]) -> String {
    if expected.is_empty() {
        format!("no {} on record", label)
    } else {
        format!("{}: {}", label, expected.join(", "))
    }
}
