// gameplan/src/commands/mod.rs

pub mod inspect;
pub mod table;
pub mod validate;

use gameplan_core::GameplanError;
use gameplan_core::application::load_graph;
use gameplan_core::infrastructure::adapters::SnapshotFile;
use gameplan_core::ReferenceGraph;
use std::path::Path;
use std::sync::Arc;

/// Exit code when the reference data itself is unusable.
pub const EXIT_REFERENCE_ERROR: i32 = 2;

/// Loads the reference graph. Domain failures (unparsable or empty snapshot)
/// are rendered with miette and end the process.
pub async fn load_reference(path: &Path) -> anyhow::Result<Arc<ReferenceGraph>> {
    let source = SnapshotFile::new(path)?;
    match load_graph(&source).await {
        Ok(graph) => Ok(graph),
        Err(GameplanError::Domain(err)) => {
            eprintln!("{:?}", miette::Report::new(err));
            std::process::exit(EXIT_REFERENCE_ERROR);
        }
        Err(e) => Err(anyhow::Error::new(e)
            .context(format!("Failed to read reference data at {}", path.display()))),
    }
}
