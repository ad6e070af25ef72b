use thiserror::Error;

/// Errors from port parsing and allocation.
#[derive(Debug, Error)]
pub enum NetError {
    #[error("invalid starting port")]
    InvalidStartingPort,

    #[error("invalid port number (must be between 1 and 65534)")]
    StartOutOfRange,

    #[error("invalid port number")]
    InvalidPort,

    #[error("port must be between 0 to 65535")]
    PortOutOfRange,

    /// Binding a probe listener failed.
    #[error("bind error: {0}")]
    Bind(#[from] std::io::Error),
}

pub type NetResult<T> = Result<T, NetError>;
