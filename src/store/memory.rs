//! In-memory backend for tests and ephemeral deployments.

use std::collections::BTreeMap;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use super::backend::StoreBackend;
use super::errors::{StoreError, StoreResult};

/// Units held in a map, with optional write-failure injection.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    units: Mutex<BTreeMap<String, Vec<u8>>>,
    fail_writes: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `put_new` fail, to exercise the
    /// unwritable-medium path.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Replaces a unit's bytes in place, bypassing the no-overwrite
    /// rule. Exists so tests can plant corrupted units.
    pub fn corrupt(&self, name: &str, bytes: &[u8]) {
        self.units
            .lock()
            .unwrap()
            .insert(name.to_string(), bytes.to_vec());
    }

    pub fn len(&self) -> usize {
        self.units.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StoreBackend for MemoryBackend {
    fn put_new(&self, name: &str, bytes: &[u8]) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::WriteFailed {
                unit: name.to_string(),
                source: io::Error::new(io::ErrorKind::Other, "injected write failure"),
            });
        }

        let mut units = self.units.lock().unwrap();
        if units.contains_key(name) {
            return Err(StoreError::UnitExists(name.to_string()));
        }
        units.insert(name.to_string(), bytes.to_vec());
        Ok(())
    }

    fn get(&self, name: &str) -> StoreResult<Vec<u8>> {
        self.units
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::UnitNotFound(name.to_string()))
    }

    fn list(&self) -> StoreResult<Vec<String>> {
        Ok(self.units.lock().unwrap().keys().cloned().collect())
    }
}
