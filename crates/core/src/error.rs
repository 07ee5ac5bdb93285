// Central Error Type for the Application

use thiserror::Error;

use crate::domain::WorkloadError;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    /// A smallfile program exited non-zero. The message layout is part of
    /// the step's error output contract.
    #[error("{program} failed with return code {code}:\n{output}")]
    StepFailed {
        program: String,
        code: i32,
        output: String,
    },

    #[error("Execution error: {0}")]
    Execution(#[from] crate::port::ExecutionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl From<AppError> for WorkloadError {
    fn from(err: AppError) -> Self {
        WorkloadError::new(err.to_string())
    }
}
