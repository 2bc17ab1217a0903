//! DynamicalSystem trait for pluggable models.

use pd_core::{CoreError, FixedVector, Real};

use crate::error::SimResult;

/// Integrator state, e.g. (θ, dθ/dt) for a pendulum.
pub type State = FixedVector;

/// Time derivative of a [`State`]; always the same shape as the state.
pub type StateDerivative = FixedVector;

/// Cartesian position of the model's point of interest.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub x: Real,
    pub y: Real,
}

/// Trait for autonomous models driven by the fixed-step integrators.
///
/// A DynamicalSystem must implement:
/// - the state dimension
/// - the state derivative dx/dt = f(x)
/// - a projection of the state onto Cartesian coordinates
///
/// Implementations are read-only during a run; both methods take `&self`
/// and must not mutate the input state.
pub trait DynamicalSystem {
    /// Number of components in the state vector.
    fn dimension(&self) -> usize;

    /// Compute the state derivative at `state`.
    fn equation_of_motion(&self, state: &State) -> SimResult<StateDerivative>;

    /// Project `state` onto Cartesian coordinates.
    fn convert_to_xy(&self, state: &State) -> SimResult<Position>;
}

/// Fail with `LengthMismatch` unless `state` has exactly `dimension` components.
pub fn check_dimension(state: &State, dimension: usize) -> SimResult<()> {
    if state.len() != dimension {
        return Err(CoreError::LengthMismatch {
            left: state.len(),
            right: dimension,
        }
        .into());
    }
    Ok(())
}
