//! Error types for the codec crate.

use crate::format::Format;

/// Errors raised while encoding or decoding a record.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The record could not be rendered in the requested format.
    #[error("{format} encode error: {reason}")]
    Encode { format: Format, reason: String },

    /// The bytes do not conform to the format's grammar, or the merged
    /// document does not fit the record type.
    #[error("{format} decode error: {reason}")]
    Decode { format: Format, reason: String },
}

/// Convenience alias for codec results.
pub type CodecResult<T> = Result<T, CodecError>;
