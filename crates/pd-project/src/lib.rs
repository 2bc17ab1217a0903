//! pd-project: run configuration file format and validation.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{ValidationError, validate_run_config};

use std::path::Path;

use tracing::debug;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Parse and validate a run configuration from YAML text.
pub fn parse_yaml(content: &str) -> ProjectResult<RunConfig> {
    let config: RunConfig = serde_yaml::from_str(content)?;
    validate_run_config(&config)?;
    Ok(config)
}

pub fn load_yaml(path: &Path) -> ProjectResult<RunConfig> {
    debug!(path = %path.display(), "loading run configuration");
    let content = std::fs::read_to_string(path)?;
    parse_yaml(&content)
}

pub fn save_yaml(path: &Path, config: &RunConfig) -> ProjectResult<()> {
    validate_run_config(config)?;
    let content = serde_yaml::to_string(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
