// gameplan-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum DomainError {
    /// An edge of the snapshot points at a node that is not declared.
    /// Never raised to callers: the graph records it as a diagnostic.
    #[error("Malformed reference data: {edge} references unknown {entity} '{name}'")]
    #[diagnostic(
        code(gameplan::domain::malformed_reference),
        help("The edge was dropped. Fix the reference export or add the missing {entity}.")
    )]
    MalformedReferenceData {
        entity: String,
        name: String,
        edge: String,
    },

    #[error("Reference snapshot could not be parsed as {format}: {reason}")]
    #[diagnostic(
        code(gameplan::domain::reference_unreadable),
        help("Check that the reference export is complete and well-formed.")
    )]
    ReferenceUnreadable { format: String, reason: String },

    #[error("Reference graph unavailable: {0}")]
    #[diagnostic(code(gameplan::domain::graph_unavailable))]
    GraphUnavailable(String),
}
