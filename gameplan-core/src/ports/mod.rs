// gameplan-core/src/ports/mod.rs

pub mod reference;

pub use reference::ReferenceSource;
