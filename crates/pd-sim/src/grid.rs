//! Uniform time grid for fixed-step integration.

use pd_core::{Real, Tolerances};

use crate::error::{SimError, SimResult};

/// Absolute slack, in steps, when truncating (tf − t0)/h, so spans that are an
/// exact multiple of h in decimal do not lose their last step to rounding.
const STEP_COUNT_SLACK: Real = 1e-9;

/// Relative slack covering the rounding of the quotient itself at large N.
const STEP_COUNT_ULPS: Real = 4.0 * Real::EPSILON;

/// Uniform time grid {t0, tf, h, N} with h = (tf − t0)/N.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeGrid {
    t0: Real,
    tf: Real,
    h: Real,
    steps: usize,
}

impl TimeGrid {
    /// Grid with a given step size; N = trunc((tf − t0)/h).
    pub fn from_step_size(t0: Real, tf: Real, h: Real) -> SimResult<Self> {
        check_span(t0, tf)?;
        if !h.is_finite() || h <= 0.0 {
            return Err(SimError::InvalidTimeGrid {
                what: "step size must be positive and finite",
            });
        }

        let raw = (tf - t0) / h;
        let next = raw.ceil();
        let slack = Tolerances {
            abs: STEP_COUNT_SLACK,
            rel: STEP_COUNT_ULPS,
        };
        let steps = if slack.accepts(raw, next) { next } else { raw.floor() };
        if steps < 1.0 {
            return Err(SimError::InvalidTimeGrid {
                what: "step size exceeds the time span",
            });
        }
        if steps > usize::MAX as Real {
            return Err(SimError::InvalidTimeGrid {
                what: "step count overflows",
            });
        }

        Ok(Self {
            t0,
            tf,
            h,
            steps: steps as usize,
        })
    }

    /// Grid with a given step count; h = (tf − t0)/N.
    pub fn from_step_count(t0: Real, tf: Real, steps: usize) -> SimResult<Self> {
        check_span(t0, tf)?;
        if steps == 0 {
            return Err(SimError::InvalidTimeGrid {
                what: "step count must be at least 1",
            });
        }
        Ok(Self {
            t0,
            tf,
            h: (tf - t0) / steps as Real,
            steps,
        })
    }

    pub fn t0(&self) -> Real {
        self.t0
    }

    pub fn tf(&self) -> Real {
        self.tf
    }

    /// Step size h.
    pub fn h(&self) -> Real {
        self.h
    }

    /// Step count N.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Time stamp of record `i`, i·h.
    pub fn time_at(&self, i: usize) -> Real {
        i as Real * self.h
    }

    /// Time stamps of all N records in order.
    pub fn times(&self) -> impl Iterator<Item = Real> + '_ {
        (0..self.steps).map(|i| self.time_at(i))
    }
}

fn check_span(t0: Real, tf: Real) -> SimResult<()> {
    if !t0.is_finite() || !tf.is_finite() {
        return Err(SimError::InvalidTimeGrid {
            what: "time bounds must be finite",
        });
    }
    if tf <= t0 {
        return Err(SimError::InvalidTimeGrid {
            what: "tf must be greater than t0",
        });
    }
    Ok(())
}
