//! Network helpers for qcfg.
//!
//! - [`Port`] -- a TCP port number with service-name parsing
//! - [`free_port`] -- ask the kernel for an unused port
//! - [`next_free_port`] -- probe the port right after a given one

pub mod error;
pub mod port;

pub use error::{NetError, NetResult};
pub use port::{free_port, next_free_port, Port};
