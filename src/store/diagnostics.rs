//! Diagnostics for non-fatal read-side failures.
//!
//! A corrupted or invalid unit degrades the listing by one record; it
//! never fails the request. The sink makes those skips observable:
//! production forwards them to the structured logger, tests collect
//! them for assertions.

use std::sync::Mutex;

use crate::observability::Logger;

/// Receives per-unit skip events observed during listing.
pub trait Diagnostics: Send + Sync {
    fn unit_skipped(&self, unit: &str, cause: &str);
}

/// Forwards skip events to the structured logger.
#[derive(Debug, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn unit_skipped(&self, unit: &str, cause: &str) {
        Logger::warn("APPEAL_UNIT_SKIPPED", &[("unit", unit), ("cause", cause)]);
    }
}

/// Collects skip events for assertions.
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    events: Mutex<Vec<(String, String)>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// All `(unit, cause)` pairs recorded so far.
    pub fn events(&self) -> Vec<(String, String)> {
        self.events.lock().unwrap().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().unwrap().is_empty()
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn unit_skipped(&self, unit: &str, cause: &str) {
        self.events
            .lock()
            .unwrap()
            .push((unit.to_string(), cause.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_diagnostics_collects_events() {
        let diagnostics = MemoryDiagnostics::new();
        assert!(diagnostics.is_empty());

        diagnostics.unit_skipped("appeal_2.json", "checksum mismatch");

        let events = diagnostics.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, "appeal_2.json");
        assert_eq!(events[0].1, "checksum mismatch");
    }
}
