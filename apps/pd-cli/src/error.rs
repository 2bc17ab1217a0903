//! Error types for the pd-cli application.

use std::path::PathBuf;

/// Application error type that wraps errors from the library crates.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Refusing to overwrite existing file: {path}")]
    AlreadyExists { path: PathBuf },

    #[error("Failed to create output directory: {path}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pd-cli operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<pd_project::ProjectError> for AppError {
    fn from(err: pd_project::ProjectError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<pd_sim::SimError> for AppError {
    fn from(err: pd_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}
