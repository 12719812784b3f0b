pub mod compatibility;
pub mod error;
pub mod issue;
pub mod project;
pub mod rules;
pub mod taxonomy;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use error::DomainError;
pub use issue::{Severity, ValidationIssue, ValidationSummary};
