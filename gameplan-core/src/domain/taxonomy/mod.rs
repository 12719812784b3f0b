// gameplan-core/src/domain/taxonomy/mod.rs

pub mod graph;
pub mod names;
pub mod snapshot;

pub use graph::{DiagnosticKind, GraphDiagnostic, GraphStats, ReferenceGraph};
pub use names::NameKey;
pub use snapshot::{CategoryRecord, NodeRecord, ReferenceSnapshot};
