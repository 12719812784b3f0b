// gameplan-core/src/application/mod.rs

pub mod orchestrator;
pub mod report;
pub mod validation;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Le CLI fait simplement :
// `use gameplan_core::application::{run_validation, BatchValidator, IssueReport};`

pub use orchestrator::BatchValidator;
pub use report::IssueReport;
pub use validation::{ValidationOutcome, load_graph, run_validation, validate_with_graph};
