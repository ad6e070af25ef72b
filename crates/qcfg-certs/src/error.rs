use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CertError {
    /// A regular file held no usable X.509 certificate.
    #[error("cert: {path:?} does not contain a valid X.509 PEM-encoded certificate")]
    NoCertificates { path: PathBuf },

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type CertResult<T> = Result<T, CertError>;
