//! The appeal record store.

use std::fmt;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::appeal::{validate, AppealDraft, AppealRecord, ValidationPolicy};

use super::backend::StoreBackend;
use super::diagnostics::Diagnostics;
use super::errors::{StoreError, StoreResult};

/// Identifier of a persisted appeal: a dense 1..N sequence within the
/// store's namespace. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    pub fn value(&self) -> u64 {
        self.0
    }

    /// The durable unit this identifier names.
    pub fn unit_name(&self) -> String {
        unit_name(self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn unit_name(seq: u64) -> String {
    format!("appeal_{}.json", seq)
}

/// Extracts the sequence number from a unit name, if it is one of ours.
fn parse_unit_name(name: &str) -> Option<u64> {
    name.strip_prefix("appeal_")?
        .strip_suffix(".json")?
        .parse()
        .ok()
}

/// Persists validated appeals, one durable unit each.
///
/// Sequence assignment and unit commit happen under one lock, so
/// concurrent appends always produce distinct units. The counter is
/// seeded from the highest existing unit rather than the unit count:
/// after a failed write leaves a gap, the next append still cannot
/// land on a taken name.
pub struct AppealStore<B: StoreBackend> {
    backend: B,
    policy: ValidationPolicy,
    diagnostics: Arc<dyn Diagnostics>,
    next_seq: Mutex<u64>,
}

impl<B: StoreBackend> AppealStore<B> {
    /// Opens the store over a backend, scanning the namespace to seed
    /// the sequence counter.
    pub fn open(
        backend: B,
        policy: ValidationPolicy,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> StoreResult<Self> {
        let highest = backend
            .list()?
            .iter()
            .filter_map(|name| parse_unit_name(name))
            .max()
            .unwrap_or(0);

        Ok(Self {
            backend,
            policy,
            diagnostics,
            next_seq: Mutex::new(highest + 1),
        })
    }

    /// The policy records are re-validated against on read.
    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Commits one durable unit for a validated record and returns its
    /// identifier.
    ///
    /// The record trusts its validation; the store does not re-check
    /// on the write path. The sequence counter only advances after the
    /// unit is durably committed, so a failed write never consumes an
    /// identifier.
    pub fn append(&self, record: &AppealRecord) -> StoreResult<RecordId> {
        let mut next_seq = self.next_seq.lock().unwrap();

        let seq = *next_seq;
        let name = unit_name(seq);
        let bytes = serde_json::to_vec_pretty(record).map_err(|source| StoreError::Serialize {
            unit: name.clone(),
            source,
        })?;

        self.backend.put_new(&name, &bytes)?;
        *next_seq = seq + 1;

        Ok(RecordId(seq))
    }

    /// Enumerates all valid persisted records in ascending sequence
    /// order.
    ///
    /// Each unit is deserialized and re-validated; units failing
    /// either step are reported to the diagnostics sink and skipped.
    /// A single bad unit degrades the listing by one record, never
    /// fails it. Performs no writes.
    pub fn list_all(&self) -> StoreResult<Vec<AppealRecord>> {
        let mut units: Vec<(u64, String)> = self
            .backend
            .list()?
            .into_iter()
            .filter_map(|name| parse_unit_name(&name).map(|seq| (seq, name)))
            .collect();
        units.sort_unstable_by_key(|(seq, _)| *seq);

        let mut records = Vec::with_capacity(units.len());
        for (_, name) in units {
            let bytes = match self.backend.get(&name) {
                Ok(bytes) => bytes,
                Err(e) => {
                    self.diagnostics.unit_skipped(&name, &e.to_string());
                    continue;
                }
            };

            let draft: AppealDraft = match serde_json::from_slice(&bytes) {
                Ok(draft) => draft,
                Err(e) => {
                    self.diagnostics
                        .unit_skipped(&name, &format!("deserialize failed: {}", e));
                    continue;
                }
            };

            match validate(&draft, &self.policy) {
                Ok(record) => records.push(record),
                Err(errors) => {
                    self.diagnostics
                        .unit_skipped(&name, &format!("re-validation failed: {}", errors));
                }
            }
        }

        Ok(records)
    }
}
