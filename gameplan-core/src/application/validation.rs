// gameplan-core/src/application/validation.rs

use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, instrument};

// Imports Hexagonaux
use crate::application::orchestrator::BatchValidator;
use crate::application::report::IssueReport;
use crate::domain::error::DomainError;
use crate::domain::issue::{ValidationIssue, ValidationSummary};
use crate::domain::project::ProjectConfig;
use crate::domain::rules::GamePlanRow;
use crate::domain::taxonomy::ReferenceGraph;
use crate::error::GameplanError;
use crate::ports::reference::ReferenceSource;

/// Everything one validation run produced.
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    pub graph: Arc<ReferenceGraph>,
    pub issues: Vec<ValidationIssue>,
    pub summary: ValidationSummary,
    pub report: IssueReport,
}

impl ValidationOutcome {
    pub fn can_import(&self) -> bool {
        self.summary.can_import
    }
}

/// Builds the graph once, for reuse across several batches.
#[instrument(skip(source), fields(source = %source.describe()))]
pub async fn load_graph(source: &dyn ReferenceSource) -> Result<Arc<ReferenceGraph>, GameplanError> {
    let snapshot = source.load_snapshot().await.inspect_err(|e| {
        error!("❌ Reference data could not be loaded: {}", e);
    })?;
    let graph = ReferenceGraph::load(&snapshot);
    if graph.is_empty() {
        return Err(DomainError::GraphUnavailable(format!(
            "'{}' declares no category, range or campaign",
            source.describe()
        ))
        .into());
    }
    Ok(Arc::new(graph))
}

/// Load -> validate -> report. Per-row problems end up in the report; the
/// only error returned is the inability to build the reference graph.
pub async fn run_validation(
    source: &dyn ReferenceSource,
    rows: &[GamePlanRow],
    config: &ProjectConfig,
) -> Result<ValidationOutcome, GameplanError> {
    let graph = load_graph(source).await?;
    Ok(validate_with_graph(graph, rows, config).await)
}

pub async fn validate_with_graph(
    graph: Arc<ReferenceGraph>,
    rows: &[GamePlanRow],
    config: &ProjectConfig,
) -> ValidationOutcome {
    let start = Instant::now();
    let validator = BatchValidator::new(Arc::clone(&graph), config);

    let issues = validator
        .validate_all(rows, config.validation.first_data_row)
        .await;
    let summary = BatchValidator::summarize(&issues);
    let report = IssueReport::build(&issues, graph.diagnostics(), config.validation.report_limit);

    info!(
        rows = rows.len(),
        critical = summary.critical,
        warning = summary.warning,
        suggestion = summary.suggestion,
        can_import = summary.can_import,
        "✅ Validation finished in {:.2?}",
        start.elapsed()
    );

    ValidationOutcome {
        graph,
        issues,
        summary,
        report,
    }
}
