/// Result alias for stage setup.
pub type StageResult<T> = Result<T, StageError>;

/// Failures while building a stage. Runtime input never fails.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    /// A placement or spawn request named a script the library lacks.
    #[error("unknown script '{script}' for instance '{name}'")]
    UnknownScript {
        /// Instance being spawned.
        name: String,
        /// Script it asked for.
        script: String,
    },
}
