// gameplan-core/src/infrastructure/adapters/mod.rs

pub mod csv_rows;
pub mod snapshot_file;

pub use csv_rows::{parse_rows, read_rows};
pub use snapshot_file::{InMemorySnapshot, SnapshotFile};
