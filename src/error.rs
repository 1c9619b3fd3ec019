use thiserror::Error;

/// Unified error type for release-it operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Given value {input} is not a valid version number")]
    InvalidVersion { input: String },

    #[error("Given value {input} is not a valid series number")]
    InvalidSeries { input: String },

    #[error("{0}")]
    InvalidPackage(String),

    #[error("{message}")]
    Repository {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-it
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create an invalid version error for the offending input
    pub fn invalid_version(input: impl Into<String>) -> Self {
        ReleaseError::InvalidVersion {
            input: input.into(),
        }
    }

    /// Create an invalid series error for the offending input
    pub fn invalid_series(input: impl Into<String>) -> Self {
        ReleaseError::InvalidSeries {
            input: input.into(),
        }
    }

    /// Create a package manifest error
    pub fn invalid_package(msg: impl Into<String>) -> Self {
        ReleaseError::InvalidPackage(msg.into())
    }

    /// Create a repository error without an underlying cause
    pub fn repository(msg: impl Into<String>) -> Self {
        ReleaseError::Repository {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a repository error wrapping the failure that caused it
    pub fn repository_caused_by(
        msg: impl Into<String>,
        cause: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ReleaseError::Repository {
            message: msg.into(),
            source: Some(Box::new(cause)),
        }
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }
}
