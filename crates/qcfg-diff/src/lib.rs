//! Structural differ for qcfg.
//!
//! Compares two records field by field without any per-type comparison code.
//! Both algorithms are one-directional: they report fields of the left
//! record only, in its declaration order, and never report fields that exist
//! only on the right.
//!
//! # Algorithms
//!
//! - [`diff`] -- presence diff: fields of A whose *name* does not appear in B
//! - [`deep_diff`] -- deep diff: fields of A whose *value* equals no field
//!   value of B, under any name
//!
//! The deep diff matches values across all of B's fields, not against the
//! field of the same name. A value that moved to a differently named field
//! is therefore not reported.

pub mod error;
pub mod field_diff;

pub use error::{DiffError, DiffResult};
pub use field_diff::{deep_diff, deep_diff_fields, diff, diff_fields, DiffMode};
