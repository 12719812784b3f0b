// gameplan-core/src/ports/reference.rs

// What a validation run needs from the outside world: one read-only copy of
// the master data. Where it lives (export file, DB dump, test fixture) is the
// adapter's business.

use crate::domain::taxonomy::ReferenceSnapshot;
use crate::error::GameplanError;
use async_trait::async_trait;

#[async_trait]
pub trait ReferenceSource: Send + Sync {
    async fn load_snapshot(&self) -> Result<ReferenceSnapshot, GameplanError>;

    // Human-readable origin, for logs and reports
    fn describe(&self) -> String;
}
