//! Fixed-step time integration of planar pendulum models.
//!
//! Provides:
//! - `DynamicalSystem` capability trait (derivative + Cartesian projection)
//! - Damped/undamped `Pendulum` model
//! - `TimeGrid` built from a step size or a step count
//! - Forward Euler and classical RK4 integrators
//! - `Solver` that streams one trajectory record per step into a sink
//! - In-memory and CSV trajectory sinks

pub mod error;
pub mod grid;
pub mod integrator;
pub mod model;
pub mod pendulum;
pub mod record;
pub mod sim;

// Re-exports for public API
pub use error::{SimError, SimResult};
pub use grid::TimeGrid;
pub use integrator::{ForwardEuler, Integrator, IntegratorType, RK4};
pub use model::{DynamicalSystem, Position, State, StateDerivative};
pub use pendulum::{Pendulum, PendulumParameters};
pub use record::{CsvSink, TrajectoryRecord, TrajectorySink, VecSink};
pub use sim::{RunSummary, SimProgress, Solver};
