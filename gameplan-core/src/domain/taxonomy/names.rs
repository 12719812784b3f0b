// gameplan-core/src/domain/taxonomy/names.rs

use std::fmt;

/// Lookup key for taxonomy names: trimmed and case-folded.
/// Display casing lives on the node itself, never in the key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NameKey(String);

impl NameKey {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for NameKey {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<&String> for NameKey {
    fn from(raw: &String) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for NameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Case-insensitive equality on trimmed names.
pub fn same_name(a: &str, b: &str) -> bool {
    NameKey::new(a) == NameKey::new(b)
}
