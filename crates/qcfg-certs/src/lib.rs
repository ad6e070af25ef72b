//! TLS trust roots for qcfg.
//!
//! [`root_cas`] builds a [`rustls::RootCertStore`] from the platform's trust
//! store plus any PEM certificates found at a caller-supplied path. The path
//! may be a single file or a directory of files (one level deep).

pub mod error;
pub mod roots;

pub use error::{CertError, CertResult};
pub use roots::{append_pem, root_cas, system_roots};
