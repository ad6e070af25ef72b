//! Error types for the diff crate.

use qcfg_types::TypeError;

/// Errors that can occur during diff operations.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// One side could not be enumerated as a structured record.
    #[error("cannot enumerate fields: {0}")]
    Fields(#[from] TypeError),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
