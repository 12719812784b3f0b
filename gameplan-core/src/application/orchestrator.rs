// gameplan-core/src/application/orchestrator.rs

use futures::stream::{self, Stream, StreamExt};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::domain::issue::{Severity, ValidationIssue, ValidationSummary};
use crate::domain::project::{ProjectConfig, RuleSettings};
use crate::domain::rules::{GamePlanRow, RowValidator};
use crate::domain::taxonomy::ReferenceGraph;

/// Runs the row rule battery over a whole upload, chunk by chunk.
///
/// The graph is shared read-only (`Arc`): several batches may be validated
/// against the same graph concurrently. Issues come out in row order and
/// carry absolute row indices whatever the chunk size.
#[derive(Debug, Clone)]
pub struct BatchValidator {
    graph: Arc<ReferenceGraph>,
    rules: RuleSettings,
    chunk_size: usize,
    unlinked_campaign_severity: Severity,
}

impl BatchValidator {
    pub fn new(graph: Arc<ReferenceGraph>, config: &ProjectConfig) -> Self {
        Self {
            graph,
            rules: config.rules.clone(),
            chunk_size: config.validation.chunk_size.max(1),
            unlinked_campaign_severity: config.validation.unlinked_campaign_severity,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn graph(&self) -> &Arc<ReferenceGraph> {
        &self.graph
    }

    fn row_validator(&self) -> RowValidator<'_> {
        RowValidator::new(&self.graph, &self.rules)
            .with_unlinked_campaign_severity(self.unlinked_campaign_severity)
    }

    /// Validates one chunk synchronously. `first_index` is the absolute
    /// index of `rows[0]`.
    pub fn validate_chunk(&self, rows: &[GamePlanRow], first_index: usize) -> Vec<ValidationIssue> {
        run_chunk(&self.row_validator(), rows, first_index)
    }

    /// One item per chunk, in input order. Dropping the stream aborts the
    /// batch; nothing needs cleaning up.
    pub fn chunk_stream<'a>(
        &'a self,
        rows: &'a [GamePlanRow],
        start_index_offset: usize,
    ) -> impl Stream<Item = Vec<ValidationIssue>> + 'a {
        let validator = self.row_validator();
        let chunk_size = self.chunk_size;
        stream::iter(rows.chunks(chunk_size).enumerate()).map(move |(n, chunk)| {
            let first = start_index_offset + n * chunk_size;
            debug!(chunk = n, first, rows = chunk.len(), "validating chunk");
            run_chunk(&validator, chunk, first)
        })
    }

    /// Validates every row. Yields to the runtime after each chunk so a
    /// large upload does not starve other tasks.
    #[instrument(skip(self, rows), fields(rows = rows.len(), chunk_size = self.chunk_size))]
    pub async fn validate_all(
        &self,
        rows: &[GamePlanRow],
        start_index_offset: usize,
    ) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let mut chunks = std::pin::pin!(self.chunk_stream(rows, start_index_offset));

        while let Some(chunk_issues) = chunks.next().await {
            issues.extend(chunk_issues);
            tokio::task::yield_now().await;
        }

        info!(issues = issues.len(), "batch validated");
        issues
    }

    pub fn summarize(issues: &[ValidationIssue]) -> ValidationSummary {
        ValidationSummary::from_issues(issues)
    }
}

fn run_chunk(
    validator: &RowValidator<'_>,
    rows: &[GamePlanRow],
    first_index: usize,
) -> Vec<ValidationIssue> {
    rows.iter()
        .enumerate()
        .flat_map(|(i, row)| validator.validate(first_index + i, row))
        .collect()
}
