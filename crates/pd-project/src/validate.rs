//! Run configuration validation.

use std::collections::HashSet;

use crate::schema::{LATEST_VERSION, RunConfig, StepDef};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Duplicate output method: {method}")]
    DuplicateMethod { method: String },

    #[error("No output methods selected")]
    NoMethods,

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn finite(field: &str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid(field, value, "must be finite"))
    }
}

pub fn validate_run_config(config: &RunConfig) -> Result<(), ValidationError> {
    if config.version == 0 || config.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }

    if let Err(e) = config.pendulum_params().validate() {
        return Err(invalid(
            "pendulum",
            format!("{:?}", config.pendulum),
            &e.to_string(),
        ));
    }

    let t = &config.time;
    finite("time.t0_s", t.t0_s)?;
    if finite("time.tf_s", t.tf_s)? <= t.t0_s {
        return Err(invalid("time.tf_s", t.tf_s, "must be greater than t0_s"));
    }
    match t.step {
        StepDef::StepSize { h_s } => {
            if finite("time.step.h_s", h_s)? <= 0.0 {
                return Err(invalid("time.step.h_s", h_s, "must be positive"));
            }
        }
        StepDef::StepCount { n } => {
            if n == 0 {
                return Err(invalid("time.step.n", n, "must be at least 1"));
            }
        }
    }
    // Catches what the field checks cannot, e.g. h larger than the span.
    if let Err(e) = config.time_grid() {
        return Err(invalid("time", format!("{:?}", t.step), &e.to_string()));
    }

    finite("initial.theta_rad", config.initial.theta_rad)?;
    finite("initial.theta_dot_rad_s", config.initial.theta_dot_rad_s)?;

    if config.output.methods.is_empty() {
        return Err(ValidationError::NoMethods);
    }
    let mut seen = HashSet::new();
    for method in &config.output.methods {
        if !seen.insert(method) {
            return Err(ValidationError::DuplicateMethod {
                method: method.to_string(),
            });
        }
    }

    Ok(())
}
