//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered while setting up or running an integration.
#[derive(Error, Debug)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] pd_core::CoreError),

    #[error("Invalid time grid: {what}")]
    InvalidTimeGrid { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Output sink error: {message}")]
    Sink { message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
