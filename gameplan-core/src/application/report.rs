// gameplan-core/src/application/report.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::issue::{ValidationIssue, ValidationSummary};
use crate::domain::taxonomy::GraphDiagnostic;
use crate::infrastructure::error::InfrastructureError;

/// What the UI / import gate receives: the first `limit` issues, the true
/// total, and the summary computed over *all* issues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueReport {
    pub generated_at: DateTime<Utc>,
    pub total_issues: usize,
    pub truncated: bool,
    pub summary: ValidationSummary,
    pub issues: Vec<ValidationIssue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<GraphDiagnostic>,
}

impl IssueReport {
    pub fn build(issues: &[ValidationIssue], diagnostics: &[GraphDiagnostic], limit: usize) -> Self {
        let shown = limit.min(issues.len());
        Self {
            generated_at: Utc::now(),
            total_issues: issues.len(),
            truncated: shown < issues.len(),
            summary: ValidationSummary::from_issues(issues),
            issues: issues[..shown].to_vec(),
            diagnostics: diagnostics.to_vec(),
        }
    }

    pub fn can_import(&self) -> bool {
        self.summary.can_import
    }

    /// Issues left out of `issues` because of the cap.
    pub fn hidden(&self) -> usize {
        self.total_issues - self.issues.len()
    }

    pub fn to_json(&self) -> Result<String, InfrastructureError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
