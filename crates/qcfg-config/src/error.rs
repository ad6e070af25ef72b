use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The record does not satisfy the `Version` contract.
    #[error("invalid record: {0}")]
    Validation(#[from] qcfg_types::TypeError),

    #[error("store error: {0}")]
    Store(#[from] qcfg_store::StoreError),

    #[error("codec error: {0}")]
    Codec(#[from] qcfg_codec::CodecError),

    #[error("diff error: {0}")]
    Diff(#[from] qcfg_diff::DiffError),

    /// The pre-overwrite copy to `<name>.old` could not be written.
    #[error("backup to {name} failed: {source}")]
    Backup {
        name: String,
        #[source]
        source: qcfg_store::StoreError,
    },

    /// A thread panicked while holding the handle's lock.
    #[error("config lock poisoned")]
    LockPoisoned,
}

impl ConfigError {
    /// `true` when the backend had nothing stored under the resource name.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Store(e) if e.is_not_found())
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
