/// Core traits for Puff
use crate::error::Result;
use async_trait::async_trait;

/// Key-value store trait
///
/// Implementers hold serialized collections under fixed keys. Callers read a
/// whole collection, mutate it in memory and write the whole collection
/// back; there are no partial updates at this level.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    ///
    /// Returns `Ok(None)` if nothing is stored under the key.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Replace several values in one write
    ///
    /// Either every entry is written or none is.
    async fn set_many(&self, entries: &[(&str, String)]) -> Result<()>;

    /// Remove the values stored under `keys`
    ///
    /// Missing keys are ignored.
    async fn remove(&self, keys: &[&str]) -> Result<()>;
}
