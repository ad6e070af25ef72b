/// Errors from backend operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Nothing is stored under the resource name.
    #[error("resource not found: {name}")]
    NotFound { name: String },

    /// The resource exists but permissions deny reading it.
    #[error("resource not readable: {name}: {source}")]
    Unreadable {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// I/O error from the local filesystem.
    #[error("I/O error on {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// The key-value store rejected or failed a request.
    #[error("key-value store error: {0}")]
    Kv(String),

    /// The runtime driving an async client could not be started.
    #[error("runtime error: {0}")]
    Runtime(String),

    /// A backend description could not be read or parsed.
    #[error("invalid backend config: {0}")]
    Config(String),

    /// The requested backend is not compiled into this build.
    #[error("unsupported backend: {0}")]
    Unsupported(String),
}

impl StoreError {
    /// `true` only for a missing resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// `true` when there is no prior content the caller could use: the
    /// resource is missing or cannot be read due to permissions.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Unreadable { .. })
    }
}

/// Result alias for backend operations.
pub type StoreResult<T> = Result<T, StoreError>;
