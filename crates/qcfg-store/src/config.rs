use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::backend::StoreBackend;
use crate::error::{StoreError, StoreResult};

/// Description of the backend a config handle should use.
///
/// ```toml
/// kind = "etcd"
/// endpoints = ["http://10.0.0.5:2379"]
/// timeout_ms = 3000
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BackendConfig {
    /// Resource names are local filesystem paths.
    #[default]
    File,
    /// Resource names are keys in an etcd cluster.
    Etcd(EtcdConfig),
}

/// Connection settings for the etcd backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EtcdConfig {
    /// Client URLs of the cluster members.
    pub endpoints: Vec<String>,
    /// Connect and per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for EtcdConfig {
    fn default() -> Self {
        Self {
            endpoints: vec!["http://127.0.0.1:2379".to_string()],
            timeout_ms: 5_000,
        }
    }
}

impl EtcdConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl BackendConfig {
    /// Parse a backend description from TOML text.
    pub fn from_toml(text: &str) -> StoreResult<Self> {
        toml::from_str(text).map_err(|e| StoreError::Config(e.to_string()))
    }

    /// Read and parse a backend description from a TOML file.
    pub fn from_file(path: &Path) -> StoreResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| StoreError::Io {
            name: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml(&text)
    }

    /// Build the described backend, connecting to the store if needed.
    pub fn open(&self) -> StoreResult<StoreBackend> {
        match self {
            Self::File => Ok(StoreBackend::file()),
            #[cfg(feature = "etcd")]
            Self::Etcd(config) => {
                let store = crate::etcd::EtcdKvStore::connect(config)?;
                Ok(StoreBackend::kv(crate::kv::KvBackend::new(std::sync::Arc::new(store))))
            }
            #[cfg(not(feature = "etcd"))]
            Self::Etcd(_) => Err(StoreError::Unsupported(
                "etcd support not compiled in (enable the `etcd` feature)".to_string(),
            )),
        }
    }
}
