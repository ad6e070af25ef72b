use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::memory::InMemoryKvStore;
use crate::traits::{Backend, KvStore};

/// [`Backend`] over a key-value store; resource names are keys.
#[derive(Clone)]
pub struct KvBackend {
    store: Arc<dyn KvStore>,
}

impl KvBackend {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// A backend over a fresh [`InMemoryKvStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryKvStore::new()))
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn KvStore> {
        &self.store
    }
}

impl Backend for KvBackend {
    fn read(&self, name: &str) -> StoreResult<Vec<u8>> {
        let value = self.store.get(name)?.ok_or_else(|| StoreError::NotFound {
            name: name.to_string(),
        })?;
        debug!(key = name, len = value.len(), "kv get");
        Ok(value)
    }

    fn write(&self, name: &str, data: &[u8]) -> StoreResult<()> {
        self.store.put(name, data)?;
        debug!(key = name, len = data.len(), "kv put");
        Ok(())
    }
}

impl fmt::Debug for KvBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KvBackend").finish_non_exhaustive()
    }
}
