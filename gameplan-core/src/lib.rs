// gameplan-core/src/lib.rs

// 1. Mandatory documentation for production code
#![allow(missing_docs)]

// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- MODULES HEXAGONAUX ---

// 1. Ports (Interfaces / Traits)
// Contract for wherever the reference snapshot comes from (file, DB export...)
pub mod ports;

// 2. Domain (Cœur du métier)
// Reference graph, compatibility resolver, row rule battery, issues.
// Ne dépend de RIEN d'autre (ni infra, ni app).
pub mod domain;

// 3. Infrastructure (Adapters)
// Snapshot files, CSV uploads, project configuration.
pub mod infrastructure;

// 4. Application (Use Cases)
// Batch orchestration, issue reporting, the end-to-end validation run.
pub mod application;

// --- GESTION DES ERREURS GLOBALE ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::GameplanError;

pub use application::{BatchValidator, IssueReport, ValidationOutcome, run_validation};
pub use domain::issue::{Severity, ValidationIssue, ValidationSummary};
pub use domain::rules::GamePlanRow;
pub use domain::taxonomy::{ReferenceGraph, ReferenceSnapshot};
