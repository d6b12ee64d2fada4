//! Error types for the compile and deploy pipeline
//!
//! All fallible operations return `Result<T, Error>`.
//! Argument parsing is total and never produces one of these.

/// Pipeline error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The compiler reported one or more `error` diagnostics
    #[error("{0}")]
    Compilation(String),

    /// Compilation succeeded but the source declares no contract
    #[error("No contracts found in the code")]
    NoContracts,

    /// The compiler binary could not be started or exited abnormally
    #[error("compiler unavailable: {0}")]
    CompilerUnavailable(String),

    /// The compiler produced output that is not standard JSON
    #[error("invalid compiler output: {0}")]
    InvalidCompilerOutput(String),

    /// An action was attempted before the step it depends on
    #[error("{0}")]
    MissingPrerequisite(String),

    /// The wallet could not estimate gas for the deployment
    #[error("Gas estimation failed: {0}. Try setting a manual gas limit.")]
    GasEstimation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this failure came from the user's source rather than the toolchain
    pub fn is_source_error(&self) -> bool {
        matches!(self, Error::Compilation(_) | Error::NoContracts)
    }
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;
