// gameplan/src/commands/validate.rs
//
// USE CASE: validate one CSV upload, or every CSV under a directory.
// Each file is its own batch; the reference graph is built once.

use anyhow::{Context, bail};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;
use walkdir::WalkDir;

use gameplan_core::application::{ValidationOutcome, validate_with_graph};
use gameplan_core::infrastructure::adapters::read_rows;
use gameplan_core::infrastructure::config::load_project_config_or_default;
use gameplan_core::infrastructure::fs::write_json;

use super::table::{issues_table, summary_table};
use crate::cli::OutputFormat;

pub struct ValidateArgs {
    pub reference: PathBuf,
    pub input: PathBuf,
    pub project_dir: PathBuf,
    pub limit: Option<usize>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

struct FileResult {
    path: PathBuf,
    rows: usize,
    outcome: ValidationOutcome,
}

pub async fn execute(args: ValidateArgs) -> anyhow::Result<()> {
    let start = Instant::now();
    let table_mode = args.format == OutputFormat::Table;

    // 1. Config (absent file => defaults)
    let mut config = load_project_config_or_default(&args.project_dir).with_context(|| {
        format!("Invalid project configuration in {}", args.project_dir.display())
    })?;
    if let Some(limit) = args.limit {
        config.validation.report_limit = limit.max(1);
    }

    // 2. Reference graph
    if table_mode {
        println!("⚙️  Loading reference data from {}...", args.reference.display());
    }
    let graph = super::load_reference(&args.reference).await?;
    let stats = graph.stats();
    if table_mode {
        println!(
            "   {} categories, {} ranges, {} campaigns",
            stats.categories, stats.ranges, stats.campaigns
        );
        if stats.diagnostics > 0 {
            println!(
                "   ⚠️  {} reference anomalies tolerated (run 'gameplan inspect' for details)",
                stats.diagnostics
            );
        }
    }

    // 3. Uploads
    let files = collect_uploads(&args.input)?;
    let mut results = Vec::with_capacity(files.len());
    for path in files {
        let rows = read_rows(&path)
            .with_context(|| format!("Failed to read upload {}", path.display()))?;
        debug!(file = %path.display(), rows = rows.len(), "upload read");
        let outcome = validate_with_graph(Arc::clone(&graph), &rows, &config).await;
        results.push(FileResult {
            path,
            rows: rows.len(),
            outcome,
        });
    }

    // 4. Output
    let can_import = results.iter().all(|r| r.outcome.can_import());
    let files: Vec<serde_json::Value> = results
        .iter()
        .map(|r| {
            json!({
                "file": r.path.display().to_string(),
                "rows": r.rows,
                "report": r.outcome.report,
            })
        })
        .collect();
    let report = json!({
        "reference": args.reference.display().to_string(),
        "canImport": can_import,
        "files": files,
    });

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => print_tables(&results),
    }

    if let Some(output) = &args.output {
        write_json(output, &report)
            .with_context(|| format!("Failed to write report to {}", output.display()))?;
        if table_mode {
            println!("📄 JSON report saved to {}", output.display());
        }
    }

    // 5. Import gate
    let blocked: Vec<&FileResult> = results.iter().filter(|r| !r.outcome.can_import()).collect();
    if !blocked.is_empty() {
        eprintln!("\n❌ Import blocked for {} file(s):", blocked.len());
        for r in &blocked {
            eprintln!(
                "   {} ({} critical)",
                r.path.display(),
                r.outcome.summary.critical
            );
        }
        std::process::exit(1);
    }

    if table_mode {
        println!(
            "\n✨ All {} file(s) can be imported ({:.2?})",
            results.len(),
            start.elapsed()
        );
    }
    Ok(())
}

fn print_tables(results: &[FileResult]) {
    for r in results {
        println!("\n📋 {} ({} rows)", r.path.display(), r.rows);
        println!("{}", summary_table(&r.outcome.summary));

        let report = &r.outcome.report;
        if !report.issues.is_empty() {
            println!("{}", issues_table(&report.issues));
        }
        if report.truncated {
            println!(
                "   ... {} more issue(s) not shown (raise --limit to see them)",
                report.hidden()
            );
        }
    }
}

/// A single file, or every *.csv below a directory (sorted, for stable output).
fn collect_uploads(input: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        bail!("❌ Input not found: {}", input.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(input).sort_by_file_name() {
        let entry = entry?;
        let is_csv = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
        if entry.file_type().is_file() && is_csv {
            files.push(entry.into_path());
        }
    }

    if files.is_empty() {
        bail!("❌ No CSV file found under {}", input.display());
    }
    Ok(files)
}
