// gameplan/src/commands/inspect.rs
//
// USE CASE: sanity-check a reference export before uploads are validated
// against it.

use std::path::PathBuf;

use super::table::{diagnostics_table, stats_table};

pub async fn execute(reference: PathBuf, check: bool) -> anyhow::Result<()> {
    println!("🔍 Inspecting reference data: {}", reference.display());

    let graph = super::load_reference(&reference).await?;

    println!("{}", stats_table(&graph.stats()));

    let diagnostics = graph.diagnostics();
    if diagnostics.is_empty() {
        println!("   ✅ No data-quality anomalies detected.");
        return Ok(());
    }

    eprintln!("\n⚠️  {} anomaly(ies) tolerated while building the graph:", diagnostics.len());
    println!("{}", diagnostics_table(diagnostics));

    if check {
        eprintln!("\n💥 --check mode: Failing due to reference anomalies.");
        std::process::exit(1);
    }

    Ok(())
}
