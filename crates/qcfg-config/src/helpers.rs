//! One-shot helpers around [`Config`].

use serde::{Deserialize, Serialize};

use qcfg_store::StoreBackend;
use qcfg_types::Record;

use crate::error::ConfigResult;
use crate::handle::Config;

/// Minimal record used to peek at a stored version.
#[derive(Debug, Default, Serialize, Deserialize)]
struct VersionOnly {
    #[serde(rename = "Version")]
    version: String,
}

/// Bind `record` to `backend` and load `name` into it.
pub fn load_config<T: Record>(
    name: &str,
    backend: Option<StoreBackend>,
    record: T,
) -> ConfigResult<Config<T>> {
    let config = Config::new(record, backend)?;
    config.load(name)?;
    Ok(config)
}

/// Validate `record` and save it under `name`.
pub fn save_config<T: Record>(
    record: T,
    name: &str,
    backend: Option<StoreBackend>,
) -> ConfigResult<()> {
    Config::new(record, backend)?.save(name)
}

/// Read only the `Version` field of the record stored under `name`.
pub fn get_version(name: &str, backend: Option<StoreBackend>) -> ConfigResult<String> {
    load_config(name, backend, VersionOnly::default())?.version()
}
