//! etcd v3 key-value store.
//!
//! The etcd client is async; qcfg's interface is blocking. Each store owns a
//! private current-thread tokio runtime and drives every request to
//! completion with `block_on`. Calling into this store from inside another
//! tokio runtime's worker thread panics, so async callers should go through
//! `spawn_blocking`.

use std::fmt;

use etcd_client::{Client, ConnectOptions};
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use crate::config::EtcdConfig;
use crate::error::{StoreError, StoreResult};
use crate::traits::KvStore;

/// [`KvStore`] backed by an etcd cluster.
pub struct EtcdKvStore {
    client: Client,
    runtime: Runtime,
    endpoints: Vec<String>,
}

impl EtcdKvStore {
    /// Connect to the cluster described by `config`.
    pub fn connect(config: &EtcdConfig) -> StoreResult<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| StoreError::Runtime(e.to_string()))?;

        let options = ConnectOptions::new()
            .with_connect_timeout(config.timeout())
            .with_timeout(config.timeout());
        let client = runtime
            .block_on(Client::connect(config.endpoints.clone(), Some(options)))
            .map_err(|e| StoreError::Kv(e.to_string()))?;

        debug!(endpoints = ?config.endpoints, "connected to etcd");
        Ok(Self {
            client,
            runtime,
            endpoints: config.endpoints.clone(),
        })
    }
}

impl KvStore for EtcdKvStore {
    fn put(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        let mut client = self.client.clone();
        self.runtime
            .block_on(client.put(key, value.to_vec(), None))
            .map_err(|e| StoreError::Kv(e.to_string()))?;
        Ok(())
    }

    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let mut client = self.client.clone();
        let response = self
            .runtime
            .block_on(client.get(key, None))
            .map_err(|e| StoreError::Kv(e.to_string()))?;
        Ok(response.kvs().first().map(|kv| kv.value().to_vec()))
    }
}

impl fmt::Debug for EtcdKvStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EtcdKvStore")
            .field("endpoints", &self.endpoints)
            .finish()
    }
}
