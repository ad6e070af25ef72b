use crate::error::StoreResult;

/// Raw bytes-in/bytes-out persistence for named resources.
///
/// All implementations must satisfy these invariants:
/// - `write` replaces the whole resource or fails leaving the prior content
///   intact; a concurrent reader never observes a partial write.
/// - `read` returns [`crate::StoreError::NotFound`] when nothing is stored
///   under the name.
/// - I/O errors are propagated, never retried or swallowed.
pub trait Backend: Send + Sync {
    /// Read the full content stored under `name`.
    fn read(&self, name: &str) -> StoreResult<Vec<u8>>;

    /// Store `data` under `name`, replacing any previous content.
    fn write(&self, name: &str, data: &[u8]) -> StoreResult<()>;
}

/// A distributed (or embedded) key-value store.
///
/// Keys map to whole blobs; there are no partial-key or range semantics.
/// Atomicity of `put` is whatever the store itself guarantees.
pub trait KvStore: Send + Sync {
    /// Store `value` under `key`.
    fn put(&self, key: &str, value: &[u8]) -> StoreResult<()>;

    /// Fetch the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;
}
