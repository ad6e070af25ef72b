use crate::error::StoreResult;
use crate::file::FileBackend;
use crate::kv::KvBackend;
use crate::traits::Backend;

/// The backend a config handle is bound to.
///
/// Selected once when the handle is built and never switched afterwards.
/// The file variant additionally gets backup-before-overwrite from the
/// handle; the key-value variant relies on the store's own atomicity.
#[derive(Clone, Debug)]
pub enum StoreBackend {
    File(FileBackend),
    Kv(KvBackend),
}

impl StoreBackend {
    pub fn file() -> Self {
        Self::File(FileBackend::new())
    }

    pub fn kv(backend: KvBackend) -> Self {
        Self::Kv(backend)
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }
}

impl Default for StoreBackend {
    fn default() -> Self {
        Self::file()
    }
}

impl From<KvBackend> for StoreBackend {
    fn from(backend: KvBackend) -> Self {
        Self::Kv(backend)
    }
}

impl From<FileBackend> for StoreBackend {
    fn from(backend: FileBackend) -> Self {
        Self::File(backend)
    }
}

impl Backend for StoreBackend {
    fn read(&self, name: &str) -> StoreResult<Vec<u8>> {
        match self {
            Self::File(b) => b.read(name),
            Self::Kv(b) => b.read(name),
        }
    }

    fn write(&self, name: &str, data: &[u8]) -> StoreResult<()> {
        match self {
            Self::File(b) => b.write(name, data),
            Self::Kv(b) => b.write(name, data),
        }
    }
}
