// gameplan-core/src/domain/issue.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// Variants are declared from least to most severe so that `Ord` gives
// Suggestion < Warning < Critical for free.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    #[serde(alias = "suggestion")]
    Suggestion,
    #[serde(alias = "warning")]
    Warning,
    #[serde(alias = "critical")]
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Suggestion => "SUGGESTION",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
        }
    }

    /// Only critical issues block an import.
    pub fn blocks_import(&self) -> bool {
        matches!(self, Self::Critical)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "critical" => Ok(Self::Critical),
            "warning" => Ok(Self::Warning),
            "suggestion" => Ok(Self::Suggestion),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// One finding on one row. Built once by the rule battery and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    row_index: usize,
    column: String,
    severity: Severity,
    message: String,
    value: Option<String>,
}

impl ValidationIssue {
    pub fn new(
        row_index: usize,
        column: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        value: Option<&str>,
    ) -> Self {
        Self {
            row_index,
            column: column.into(),
            severity,
            message: message.into(),
            value: value.map(str::to_string),
        }
    }

    pub fn critical(
        row_index: usize,
        column: impl Into<String>,
        message: impl Into<String>,
        value: Option<&str>,
    ) -> Self {
        Self::new(row_index, column, Severity::Critical, message, value)
    }

    pub fn warning(
        row_index: usize,
        column: impl Into<String>,
        message: impl Into<String>,
        value: Option<&str>,
    ) -> Self {
        Self::new(row_index, column, Severity::Warning, message, value)
    }

    pub fn suggestion(
        row_index: usize,
        column: impl Into<String>,
        message: impl Into<String>,
        value: Option<&str>,
    ) -> Self {
        Self::new(row_index, column, Severity::Suggestion, message, value)
    }

    pub fn row_index(&self) -> usize {
        self.row_index
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] row {} · {}: {}",
            self.severity, self.row_index, self.column, self.message
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub critical: usize,
    pub warning: usize,
    pub suggestion: usize,
    pub total: usize,
    pub can_import: bool,
    /// Issue count per column, all severities included.
    pub by_column: BTreeMap<String, usize>,
}

impl ValidationSummary {
    pub fn from_issues(issues: &[ValidationIssue]) -> Self {
        let mut summary = Self::default();

        for issue in issues {
            match issue.severity {
                Severity::Critical => summary.critical += 1,
                Severity::Warning => summary.warning += 1,
                Severity::Suggestion => summary.suggestion += 1,
            }
            *summary.by_column.entry(issue.column.clone()).or_insert(0) += 1;
        }

        summary.total = issues.len();
        summary.can_import = summary.critical == 0;
        summary
    }
}
