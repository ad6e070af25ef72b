//! Byte-level persistence backends for qcfg.
//!
//! A backend stores an opaque byte blob under a resource name and hands it
//! back on request. It never interprets the bytes; encoding is the codec's
//! job and backup policy is the config handle's.
//!
//! # Backends
//!
//! All backends implement the [`Backend`] trait:
//!
//! - [`FileBackend`] -- resource names are filesystem paths; writes go to a
//!   temporary sibling and are renamed into place
//! - [`KvBackend`] -- resource names are keys in a [`KvStore`]
//!
//! [`StoreBackend`] is the closed set of the two, chosen once when a config
//! handle is built. [`BackendConfig`] describes one in a config file.
//!
//! # Key-value stores
//!
//! - [`InMemoryKvStore`] -- `HashMap`-based store for tests and embedding
//! - `EtcdKvStore` -- etcd v3, behind the `etcd` cargo feature
//!
//! # Design Rules
//!
//! 1. A write either replaces the whole resource or leaves it untouched.
//! 2. Absence is reported as [`StoreError::NotFound`], never as empty bytes.
//! 3. No retries; every failure goes straight back to the caller.

pub mod backend;
pub mod config;
pub mod error;
#[cfg(feature = "etcd")]
pub mod etcd;
pub mod file;
pub mod kv;
pub mod memory;
pub mod traits;

pub use backend::StoreBackend;
pub use config::{BackendConfig, EtcdConfig};
pub use error::{StoreError, StoreResult};
#[cfg(feature = "etcd")]
pub use etcd::EtcdKvStore;
pub use file::FileBackend;
pub use kv::KvBackend;
pub use memory::InMemoryKvStore;
pub use traits::{Backend, KvStore};
