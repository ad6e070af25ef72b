use std::fmt;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info};

use qcfg_codec::{decode_merged, encode, Format};
use qcfg_diff::{DiffError, DiffMode};
use qcfg_store::{Backend, FileBackend, StoreBackend};
use qcfg_types::{check_record, fields, record_version, Field, Fields, Record};

use crate::error::{ConfigError, ConfigResult};

/// Suffix of the pre-overwrite copy written by file-backed saves.
const BACKUP_SUFFIX: &str = ".old";

/// A record bound to a backend.
///
/// `save`, `load`, and `update` take the lock exclusively; `version`,
/// `data`, `snapshot`, `diff`, and `Display` share it. Independent handles
/// never contend with each other.
#[derive(Debug)]
pub struct Config<T> {
    data: RwLock<T>,
    backend: StoreBackend,
}

impl<T: Record> Config<T> {
    /// Bind `record` to `backend`, or to the file backend when `None`.
    ///
    /// Fails without touching any backend if the record is not structured
    /// or lacks a text `Version` field.
    pub fn new(record: T, backend: Option<StoreBackend>) -> ConfigResult<Self> {
        check_record(&record)?;
        Ok(Self {
            data: RwLock::new(record),
            backend: backend.unwrap_or_default(),
        })
    }

    pub fn backend(&self) -> &StoreBackend {
        &self.backend
    }

    /// Current value of the record's `Version` field.
    pub fn version(&self) -> ConfigResult<String> {
        let data = self.read()?;
        Ok(record_version(&*data)?)
    }

    /// Read-only view of the record.
    pub fn data(&self) -> ConfigResult<RwLockReadGuard<'_, T>> {
        self.read()
    }

    /// Clone of the record.
    pub fn snapshot(&self) -> ConfigResult<T>
    where
        T: Clone,
    {
        Ok(self.read()?.clone())
    }

    /// Mutate the record in place under the exclusive lock.
    ///
    /// The `Version` contract is not checked here; [`Config::save`] rejects
    /// a record that no longer satisfies it.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> ConfigResult<R> {
        let mut data = self.write()?;
        Ok(f(&mut *data))
    }

    /// Persist the record under `name`.
    ///
    /// The encoding follows `name`'s extension. On the file backend, an
    /// existing file at `name` is first copied to `name.old`; a failed copy
    /// aborts the save with the destination untouched.
    pub fn save(&self, name: &str) -> ConfigResult<()> {
        let data = self.write()?;
        check_record(&*data)?;
        let format = Format::from_name(name);
        let encoded = encode(format, &*data)?;

        match &self.backend {
            StoreBackend::Kv(kv) => kv.write(name, &encoded)?,
            StoreBackend::File(file) => {
                backup(file, name)?;
                file.write(name, &encoded)?;
            }
        }

        info!(name, %format, len = encoded.len(), "config saved");
        Ok(())
    }

    /// Merge the content stored under `name` into the record.
    ///
    /// A missing resource is an error (see [`ConfigError::is_not_found`]).
    /// The merged record must still carry a text `Version`. On any error the
    /// record is left as it was.
    pub fn load(&self, name: &str) -> ConfigResult<()> {
        let mut data = self.write()?;
        let bytes = self.backend.read(name)?;
        let format = Format::from_name(name);
        if let Some(merged) = decode_merged(format, &bytes, &*data)? {
            check_record(&merged)?;
            *data = merged;
        }

        debug!(name, %format, len = bytes.len(), "config loaded");
        Ok(())
    }

    /// Fields of this record whose names are absent from `other`.
    pub fn diff<U: Record>(&self, other: &Config<U>) -> ConfigResult<Vec<Field>> {
        self.diff_with(other, DiffMode::Presence)
    }

    /// Fields of this record whose values appear nowhere in `other`.
    pub fn deep_diff<U: Record>(&self, other: &Config<U>) -> ConfigResult<Vec<Field>> {
        self.diff_with(other, DiffMode::Deep)
    }

    pub fn diff_with<U: Record>(
        &self,
        other: &Config<U>,
        mode: DiffMode,
    ) -> ConfigResult<Vec<Field>> {
        let (a, b) = (self.fields()?, other.fields()?);
        Ok(mode.apply(&a, &b))
    }

    // Guards are released before returning, so diffing a handle against
    // itself never holds two read guards at once.
    fn fields(&self) -> ConfigResult<Fields> {
        let data = self.read()?;
        fields(&*data).map_err(|e| ConfigError::Diff(DiffError::from(e)))
    }

    fn read(&self) -> ConfigResult<RwLockReadGuard<'_, T>> {
        self.data.read().map_err(|_| ConfigError::LockPoisoned)
    }

    fn write(&self) -> ConfigResult<RwLockWriteGuard<'_, T>> {
        self.data.write().map_err(|_| ConfigError::LockPoisoned)
    }
}

/// Copy the current content of `name` to `name.old`, if there is any.
fn backup(file: &FileBackend, name: &str) -> ConfigResult<()> {
    let old = match file.read(name) {
        Ok(old) => old,
        Err(e) if e.is_absent() => {
            debug!(name, "nothing to back up");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let backup_name = format!("{name}{BACKUP_SUFFIX}");
    file.write(&backup_name, &old)
        .map_err(|source| ConfigError::Backup {
            name: backup_name.clone(),
            source,
        })?;
    debug!(name, backup = %backup_name, len = old.len(), "previous config backed up");
    Ok(())
}

/// Tab-indented JSON of the record; empty if it cannot be encoded.
impl<T: Record> fmt::Display for Config<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        let text = encode(Format::Json, &*data)
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .unwrap_or_default();
        f.write_str(&text)
    }
}
