// gameplan-core/tests/scenarios.rs
//
// End-to-end runs against the reference export in tests/fixtures.

#![allow(clippy::unwrap_used)]

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

use gameplan_core::application::{BatchValidator, load_graph, run_validation};
use gameplan_core::domain::project::ProjectConfig;
use gameplan_core::domain::rules::Field;
use gameplan_core::infrastructure::adapters::SnapshotFile;
use gameplan_core::{GamePlanRow, ReferenceGraph, Severity};

const PARITY_COLUMN: &str = "Is Digital target the same as TV?";

fn fixture() -> Result<SnapshotFile> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("reference.json");
    Ok(SnapshotFile::new(path)?)
}

async fn graph() -> Result<Arc<ReferenceGraph>> {
    Ok(load_graph(&fixture()?).await?)
}

fn row(category: &str, range: &str, campaign: &str) -> GamePlanRow {
    GamePlanRow::new()
        .with(Field::Category, category)
        .with(Field::Range, range)
        .with(Field::Campaign, campaign)
}

#[tokio::test]
async fn fixture_is_clean_reference_data() -> Result<()> {
    let graph = graph().await?;
    assert!(graph.diagnostics().is_empty(), "{:?}", graph.diagnostics());
    assert_eq!(graph.stats().campaigns, 5);
    Ok(())
}

#[tokio::test]
async fn unknown_campaign_yields_a_single_critical() -> Result<()> {
    let rows = vec![row("Men", "Men", "Unknown Campaign X")];
    let outcome = run_validation(&fixture()?, &rows, &ProjectConfig::default()).await?;

    assert_eq!(outcome.issues.len(), 1);
    let issue = &outcome.issues[0];
    assert_eq!(issue.severity(), Severity::Critical);
    assert_eq!(issue.column(), "Campaign");
    assert!(issue.message().contains("no range mapping"));
    assert!(!outcome.can_import());
    Ok(())
}

#[tokio::test]
async fn shared_campaign_under_override_range_is_clean() -> Result<()> {
    let rows = vec![
        row("Corporate", "Brand (Institutional)", "Search AWON"),
        row("Hair", "Shampoo", "Search AWON"),
        row("Men", "Deo", "search awon"),
    ];
    let outcome = run_validation(&fixture()?, &rows, &ProjectConfig::default()).await?;

    // Only the casing hint on the last row
    assert_eq!(outcome.issues.len(), 1);
    assert_eq!(outcome.issues[0].severity(), Severity::Suggestion);
    assert_eq!(outcome.issues[0].row_index(), 4);
    assert!(outcome.can_import());
    Ok(())
}

#[tokio::test]
async fn shared_campaign_outside_its_overrides_is_critical() -> Result<()> {
    let rows = vec![row("Laundry", "Detergent", "Search AWON")];
    let outcome = run_validation(&fixture()?, &rows, &ProjectConfig::default()).await?;

    assert_eq!(outcome.issues.len(), 1);
    let message = outcome.issues[0].message();
    assert!(message.contains("Brand (Institutional)"));
    assert!(message.contains("Deo"));
    assert!(message.contains("Shampoo"));
    Ok(())
}

#[tokio::test]
async fn parity_flag_rule_on_ten_thousand_rows() -> Result<()> {
    let base = row("Men", "Deo", "Fresh Launch").with(Field::BusinessUnit, "Personal Care");
    let rows: Vec<GamePlanRow> = (0..10_000)
        .map(|i| {
            let media = if i % 2 == 0 { "TV" } else { "TV + Digital" };
            base.clone().with(Field::Media, media)
        })
        .collect();

    let outcome = run_validation(&fixture()?, &rows, &ProjectConfig::default()).await?;

    assert_eq!(outcome.summary.warning, 5_000);
    assert_eq!(outcome.summary.critical, 5_000);
    assert_eq!(outcome.summary.total, 10_000);
    assert_eq!(outcome.summary.by_column.get(PARITY_COLUMN), Some(&10_000));
    assert!(!outcome.summary.can_import);

    // The report stays bounded
    assert_eq!(outcome.report.issues.len(), 1_000);
    assert_eq!(outcome.report.total_issues, 10_000);
    assert!(outcome.report.truncated);
    Ok(())
}

#[tokio::test]
async fn parity_gating_with_open_ended_ages() -> Result<()> {
    let graph = graph().await?;
    let validator = BatchValidator::new(graph, &ProjectConfig::default());

    let aligned = row("Men", "Deo", "Fresh Launch")
        .with(Field::Media, "TV + Digital")
        .with(Field::DigitalSameAsTv, "Yes")
        .with(Field::TvMinAge, "25")
        .with(Field::TvMaxAge, "+")
        .with(Field::DigitalMinAge, "25")
        .with(Field::DigitalMaxAge, "+");
    let drifted = aligned.clone().with(Field::DigitalMaxAge, "65");

    let issues = validator.validate_all(&[aligned, drifted], 2).await;
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].row_index(), 3);
    assert_eq!(issues[0].severity(), Severity::Critical);
    assert_eq!(issues[0].column(), "Digital Demo Max. Age");
    Ok(())
}

#[tokio::test]
async fn split_batches_concatenate_to_the_full_run() -> Result<()> {
    let graph = graph().await?;
    let validator = BatchValidator::new(graph, &ProjectConfig::default());
    let rows = vec![
        row("Men", "Shampoo", "Silky Hair"),
        row("Hair", "Conditioner", "Silky Hair"),
        row("Hair", "Deo", "Fresh Launch").with(Field::TvMinAge, "+"),
        row("Laundry", "Detergent", "Orphan Promo"),
        row("Home", "Detergent", "Clean Start").with(Field::BusinessUnit, "Personal Care"),
    ];

    let full = validator.validate_all(&rows, 2).await;
    let mut split = validator.validate_all(&rows[..2], 2).await;
    split.extend(validator.validate_all(&rows[2..], 4).await);

    assert_eq!(split, full);
    assert!(!full.is_empty());
    Ok(())
}

#[tokio::test]
async fn unlinked_campaigns_can_be_downgraded() -> Result<()> {
    let mut config = ProjectConfig::default();
    config.validation.unlinked_campaign_severity = Severity::Warning;

    let rows = vec![row("Laundry", "Detergent", "Orphan Promo")];
    let outcome = run_validation(&fixture()?, &rows, &config).await?;

    assert_eq!(outcome.summary.warning, 1);
    assert!(outcome.can_import());
    Ok(())
}
