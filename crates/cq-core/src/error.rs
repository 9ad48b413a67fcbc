/// Alias for `Result<T, CqError>`.
pub type CqResult<T> = Result<T, CqError>;

/// Errors that can occur while loading or assembling a library.
#[derive(Debug, thiserror::Error)]
pub enum CqError {
    /// The library file could not be read.
    #[error("failed to read library: {0}")]
    Io(#[from] std::io::Error),

    /// The library JSON is malformed or does not match the expected shape.
    #[error("invalid library JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A script name did not resolve to a script in the library.
    #[error("script not found: \"{0}\"")]
    ScriptNotFound(String),
}
