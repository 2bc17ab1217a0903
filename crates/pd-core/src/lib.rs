//! pd-core: numeric foundation for the pendulum workspace.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - vector (FixedVector, the value-type state container)
//! - units (uom SI types + constructors)
//! - timing (wall-clock timers for run summaries)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod timing;
pub mod units;
pub mod vector;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use vector::FixedVector;
