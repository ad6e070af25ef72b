//! Local filesystem backend.
//!
//! Writes go to a uniquely named temporary file in the destination's
//! directory, are flushed to disk, and are then renamed over the destination.
//! On Unix the directory itself is synced after the rename.
//! Rename within one directory is atomic on every supported platform, so a
//! reader sees either the old content or the new content, never a mix.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::Backend;

/// [`Backend`] over plain filesystem paths.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileBackend;

impl FileBackend {
    pub fn new() -> Self {
        Self
    }
}

fn io_error(name: &str, source: io::Error) -> StoreError {
    StoreError::Io {
        name: name.to_string(),
        source,
    }
}

/// Flush `dir`'s entries so a completed rename survives a crash.
#[cfg(unix)]
fn sync_dir(dir: &Path) -> io::Result<()> {
    fs::File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

impl Backend for FileBackend {
    fn read(&self, name: &str) -> StoreResult<Vec<u8>> {
        match fs::read(name) {
            Ok(data) => {
                debug!(path = name, len = data.len(), "file read");
                Ok(data)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StoreError::NotFound {
                name: name.to_string(),
            }),
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => Err(StoreError::Unreadable {
                name: name.to_string(),
                source: e,
            }),
            Err(e) => Err(io_error(name, e)),
        }
    }

    fn write(&self, name: &str, data: &[u8]) -> StoreResult<()> {
        let path = Path::new(name);
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| io_error(name, e))?;
        tmp.write_all(data).map_err(|e| io_error(name, e))?;
        tmp.as_file().sync_all().map_err(|e| io_error(name, e))?;

        // Keep the destination's mode; the temp file is created 0600.
        if let Ok(meta) = fs::metadata(path) {
            tmp.as_file()
                .set_permissions(meta.permissions())
                .map_err(|e| io_error(name, e))?;
        }

        tmp.persist(path).map_err(|e| io_error(name, e.error))?;
        sync_dir(dir).map_err(|e| io_error(name, e))?;
        debug!(path = name, len = data.len(), "file written");
        Ok(())
    }
}
