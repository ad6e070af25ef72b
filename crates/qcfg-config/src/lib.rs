//! Versioned configuration handles for qcfg.
//!
//! A [`Config`] binds one record to one backend. It saves the record through
//! the codec picked by the resource name's extension, loads stored bytes back
//! by merging them into the record, and diffs two records field by field.
//!
//! ```no_run
//! use qcfg_config::Config;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! #[serde(rename_all = "PascalCase")]
//! struct Settings {
//!     version: String,
//!     listen: String,
//! }
//!
//! let config = Config::new(
//!     Settings { version: "1".into(), listen: ":9000".into() },
//!     None,
//! )?;
//! config.save("/etc/app/config.json")?;
//! # Ok::<(), qcfg_config::ConfigError>(())
//! ```
//!
//! On the file backend every save first copies the existing file, byte for
//! byte, to `<name>.old`. If that copy fails the save is aborted before the
//! destination is touched.

pub mod error;
pub mod handle;
pub mod helpers;

pub use error::{ConfigError, ConfigResult};
pub use handle::Config;
pub use helpers::{get_version, load_config, save_config};

// Re-export the types callers need to build and inspect handles.
pub use qcfg_codec::Format;
pub use qcfg_diff::DiffMode;
pub use qcfg_store::{BackendConfig, InMemoryKvStore, KvBackend, KvStore, StoreBackend};
pub use qcfg_types::{Field, FieldKind, Record, VERSION_FIELD};
