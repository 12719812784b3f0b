// gameplan-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameplanError {
    // --- ERREURS DU DOMAINE (Reference graph) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- ERREURS D'INFRASTRUCTURE (IO, Parsing) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),
}

// Shortcut so adapters can use `?` on raw IO calls
impl From<std::io::Error> for GameplanError {
    fn from(err: std::io::Error) -> Self {
        GameplanError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl GameplanError {
    /// True when the run could not even build its reference graph.
    pub fn is_fatal_reference_error(&self) -> bool {
        matches!(
            self,
            GameplanError::Domain(
                DomainError::ReferenceUnreadable { .. } | DomainError::GraphUnavailable(_)
            )
        )
    }
}
