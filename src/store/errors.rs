//! Store error types.

use std::io;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by the record store and its backends.
///
/// Only write-side errors reach callers during normal operation;
/// read-side failures observed while listing are reported to the
/// diagnostics sink and never escape the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unit with this name is already committed. The naming scheme
    /// guarantees uniqueness, so this indicates an external writer or
    /// a bug.
    #[error("unit already exists: {0}")]
    UnitExists(String),

    #[error("unit not found: {0}")]
    UnitNotFound(String),

    #[error("write failed for unit '{unit}': {source}")]
    WriteFailed {
        unit: String,
        #[source]
        source: io::Error,
    },

    #[error("read failed for unit '{unit}': {source}")]
    ReadFailed {
        unit: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to enumerate store namespace: {0}")]
    ListFailed(#[source] io::Error),

    #[error("serialization failed for unit '{unit}': {source}")]
    Serialize {
        unit: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Returns whether this error means the unit name was taken.
    pub fn is_unit_exists(&self) -> bool {
        matches!(self, StoreError::UnitExists(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_unit() {
        let err = StoreError::WriteFailed {
            unit: "appeal_3.json".to_string(),
            source: io::Error::new(io::ErrorKind::Other, "disk full"),
        };
        let display = err.to_string();
        assert!(display.contains("appeal_3.json"));
        assert!(display.contains("disk full"));
    }

    #[test]
    fn test_unit_exists_predicate() {
        assert!(StoreError::UnitExists("appeal_1.json".into()).is_unit_exists());
        assert!(!StoreError::UnitNotFound("appeal_1.json".into()).is_unit_exists());
    }
}
