//! Record codecs for qcfg.
//!
//! Converts a record to bytes and merges bytes back into an existing record.
//! The wire format is picked from the resource name's extension; anything
//! unrecognised falls back to tab-indented JSON.
//!
//! Decoding never replaces a record wholesale: the incoming document is
//! merged over the record's current state, so fields missing from the byte
//! stream keep their value, and the record is only touched once the whole
//! merge has deserialized successfully. The top-level document must be a map.

pub mod codec;
pub mod error;
pub mod format;
pub mod merge;

pub use codec::{decode_into, decode_merged, encode};
pub use error::{CodecError, CodecResult};
pub use format::Format;
pub use merge::merge_values;
