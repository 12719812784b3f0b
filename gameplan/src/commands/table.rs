// gameplan/src/commands/table.rs
//
// Terminal rendering of summaries, issues and graph stats.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};

use gameplan_core::domain::taxonomy::{GraphDiagnostic, GraphStats};
use gameplan_core::{Severity, ValidationIssue, ValidationSummary};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn severity_cell(severity: Severity) -> Cell {
    let color = match severity {
        Severity::Critical => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Suggestion => Color::Cyan,
    };
    Cell::new(severity.as_str()).fg(color)
}

pub fn summary_table(summary: &ValidationSummary) -> Table {
    let mut table = new_table();
    table.set_header(vec!["CRITICAL", "WARNING", "SUGGESTION", "TOTAL", "IMPORT"]);
    table.add_row(vec![
        Cell::new(summary.critical),
        Cell::new(summary.warning),
        Cell::new(summary.suggestion),
        Cell::new(summary.total),
        if summary.can_import {
            Cell::new("allowed").fg(Color::Green)
        } else {
            Cell::new("blocked").fg(Color::Red)
        },
    ]);
    table
}

pub fn issues_table(issues: &[ValidationIssue]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Row", "Severity", "Column", "Value", "Message"]);
    for issue in issues {
        table.add_row(vec![
            Cell::new(issue.row_index()),
            severity_cell(issue.severity()),
            Cell::new(issue.column()),
            Cell::new(issue.value().unwrap_or("")),
            Cell::new(issue.message()),
        ]);
    }
    table
}

pub fn stats_table(stats: &GraphStats) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Item", "Count"]);
    let rows = [
        ("Business units", stats.business_units),
        ("Categories", stats.categories),
        ("Ranges", stats.ranges),
        ("Campaigns", stats.campaigns),
        ("Category ↔ range edges", stats.category_range_edges),
        ("Range → campaign edges", stats.range_campaign_edges),
        ("Primary mappings", stats.primary_mappings),
        ("Shared campaigns", stats.shared_campaigns),
        ("Diagnostics", stats.diagnostics),
    ];
    for (label, count) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(count)]);
    }
    table
}

pub fn diagnostics_table(diagnostics: &[GraphDiagnostic]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Kind", "Message"]);
    for d in diagnostics {
        table.add_row(vec![Cell::new(format!("{:?}", d.kind)), Cell::new(&d.message)]);
    }
    table
}
