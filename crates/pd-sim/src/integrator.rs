//! Fixed-step explicit time integrators.

use core::fmt;
use core::str::FromStr;

use pd_core::Real;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::model::{DynamicalSystem, State};

/// Trait for time integrators.
pub trait Integrator {
    /// Short identifier used in logs and summaries.
    fn name(&self) -> &'static str;

    /// Advance `x` by one step of size `h`, returning the new state.
    fn step<S: DynamicalSystem + ?Sized>(&self, system: &S, x: &State, h: Real)
    -> SimResult<State>;
}

/// Classical RK4 (Runge-Kutta 4th order) integrator.
#[derive(Clone, Copy, Debug, Default)]
pub struct RK4;

impl Integrator for RK4 {
    fn name(&self) -> &'static str {
        "rk4"
    }

    fn step<S: DynamicalSystem + ?Sized>(
        &self,
        system: &S,
        x: &State,
        h: Real,
    ) -> SimResult<State> {
        let k1 = system.equation_of_motion(x)?.scale(h);

        let x2 = x.add(&k1.scale(0.5))?;
        let k2 = system.equation_of_motion(&x2)?.scale(h);

        let x3 = x.add(&k2.scale(0.5))?;
        let k3 = system.equation_of_motion(&x3)?.scale(h);

        let x4 = x.add(&k3)?;
        let k4 = system.equation_of_motion(&x4)?.scale(h);

        // Combine: x_new = x + (k1 + 2*k2 + 2*k3 + k4) / 6
        let k_sum = k1
            .add(&k2.scale(2.0))?
            .add(&k3.scale(2.0))?
            .add(&k4)?;

        Ok(x.add(&k_sum.scale(1.0 / 6.0))?)
    }
}

/// Forward Euler (explicit, 1st order).
/// Calls equation_of_motion() once per step instead of 4 times (RK4).
#[derive(Clone, Copy, Debug, Default)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn name(&self) -> &'static str {
        "forward_euler"
    }

    fn step<S: DynamicalSystem + ?Sized>(
        &self,
        system: &S,
        x: &State,
        h: Real,
    ) -> SimResult<State> {
        let xdot = system.equation_of_motion(x)?;
        Ok(x.add(&(h * &xdot))?)
    }
}

/// Integrator selection for simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntegratorType {
    /// Forward Euler (1st-order, 1 derivative evaluation per step).
    ForwardEuler,
    /// 4th-order Runge-Kutta (default, 4 derivative evaluations per step).
    #[default]
    RK4,
}

impl IntegratorType {
    pub const ALL: [IntegratorType; 2] = [IntegratorType::ForwardEuler, IntegratorType::RK4];

    /// Suffix used in output file names (`data_fe.csv`, `data_rk4.csv`).
    pub fn file_tag(self) -> &'static str {
        match self {
            IntegratorType::ForwardEuler => "fe",
            IntegratorType::RK4 => "rk4",
        }
    }
}

impl Integrator for IntegratorType {
    fn name(&self) -> &'static str {
        match self {
            IntegratorType::ForwardEuler => ForwardEuler.name(),
            IntegratorType::RK4 => RK4.name(),
        }
    }

    fn step<S: DynamicalSystem + ?Sized>(
        &self,
        system: &S,
        x: &State,
        h: Real,
    ) -> SimResult<State> {
        match self {
            IntegratorType::ForwardEuler => ForwardEuler.step(system, x, h),
            IntegratorType::RK4 => RK4.step(system, x, h),
        }
    }
}

impl fmt::Display for IntegratorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IntegratorType {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fe" | "euler" | "forward_euler" | "forwardeuler" => Ok(IntegratorType::ForwardEuler),
            "rk4" | "runge_kutta" => Ok(IntegratorType::RK4),
            _ => Err(SimError::InvalidArg {
                what: "unknown integrator (expected euler or rk4)",
            }),
        }
    }
}
