//! Backing medium for durable units.

use super::errors::StoreResult;

/// A namespace of named durable units.
///
/// The store is the only writer and never overwrites: `put_new` must
/// fail if the name is taken. Implementations must make a successful
/// `put_new` durable before returning.
pub trait StoreBackend: Send + Sync + std::fmt::Debug {
    /// Commit a new unit. Fails with `UnitExists` if the name is taken.
    fn put_new(&self, name: &str, bytes: &[u8]) -> StoreResult<()>;

    /// Read a unit's bytes.
    fn get(&self, name: &str) -> StoreResult<Vec<u8>>;

    /// List all unit names in the namespace, in no particular order.
    fn list(&self) -> StoreResult<Vec<String>>;
}
