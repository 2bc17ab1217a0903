//! Scalar type and the float checks shared by the model and its configuration.

use crate::error::{CoreError, CoreResult};

/// Scalar used for states, parameters and time values alike.
pub type Real = f64;

/// Absolute and relative bounds for comparing two reals.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

impl Tolerances {
    /// Same bound for the absolute and the relative test.
    pub fn uniform(tol: Real) -> Self {
        Self { abs: tol, rel: tol }
    }

    /// `a` and `b` are within `abs` of each other, or within `rel` of the
    /// larger magnitude.
    pub fn accepts(&self, a: Real, b: Real) -> bool {
        let diff = (a - b).abs();
        diff <= self.abs || diff <= self.rel * a.abs().max(b.abs())
    }
}

pub fn ensure_finite(value: Real, what: &'static str) -> CoreResult<Real> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CoreError::NonFinite { what, value })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(value: Real, what: &'static str) -> CoreResult<Real> {
    if ensure_finite(value, what)? > 0.0 {
        Ok(value)
    } else {
        Err(CoreError::OutOfRange {
            what,
            value,
            expected: "> 0",
        })
    }
}

/// Finite and not below zero.
pub fn ensure_non_negative(value: Real, what: &'static str) -> CoreResult<Real> {
    if ensure_finite(value, what)? >= 0.0 {
        Ok(value)
    } else {
        Err(CoreError::OutOfRange {
            what,
            value,
            expected: ">= 0",
        })
    }
}
