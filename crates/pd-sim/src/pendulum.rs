//! Planar rigid pendulum with optional viscous damping.

use pd_core::units::constants::STANDARD_GRAVITY_MPS2;
use pd_core::units::{Accel, Length, Mass};
use pd_core::{FixedVector, Real, ensure_finite, ensure_non_negative, ensure_positive};

use crate::error::SimResult;
use crate::model::{DynamicalSystem, Position, State, StateDerivative, check_dimension};

/// Physical constants of a pendulum (SI units).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendulumParameters {
    /// Bob mass (kg), > 0
    pub mass: Real,
    /// Rod length (m), > 0
    pub length: Real,
    /// Viscous damping coefficient μ, >= 0
    pub damping: Real,
    /// Gravitational acceleration (m/s²)
    pub gravity: Real,
}

impl PendulumParameters {
    /// Undamped pendulum under standard gravity.
    pub fn new(mass: Real, length: Real) -> Self {
        Self {
            mass,
            length,
            damping: 0.0,
            gravity: STANDARD_GRAVITY_MPS2,
        }
    }

    /// Damped pendulum under standard gravity.
    pub fn damped(mass: Real, length: Real, damping: Real) -> Self {
        Self {
            damping,
            ..Self::new(mass, length)
        }
    }

    pub fn with_gravity(self, gravity: Real) -> Self {
        Self { gravity, ..self }
    }

    pub fn with_gravity_si(self, gravity: Accel) -> Self {
        use uom::si::acceleration::meter_per_second_squared;
        self.with_gravity(gravity.get::<meter_per_second_squared>())
    }

    /// Undamped pendulum from typed SI quantities.
    pub fn from_si(mass: Mass, length: Length) -> Self {
        use uom::si::length::meter;
        use uom::si::mass::kilogram;
        Self::new(mass.get::<kilogram>(), length.get::<meter>())
    }

    /// Check the values needed to evaluate the equation of motion.
    pub fn validate(&self) -> SimResult<()> {
        ensure_positive(self.mass, "mass")?;
        ensure_positive(self.length, "length")?;
        ensure_non_negative(self.damping, "damping")?;
        ensure_finite(self.gravity, "gravity")?;
        Ok(())
    }
}

/// Pendulum model: state (θ, dθ/dt), θ measured from the vertical.
#[derive(Clone, Debug)]
pub struct Pendulum {
    params: PendulumParameters,
    /// I = m·l², computed once
    inertia: Real,
}

impl Pendulum {
    /// Undamped pendulum, g = 9.81.
    pub fn new(mass: Real, length: Real) -> Self {
        Self::from_params(PendulumParameters::new(mass, length))
    }

    /// Damped pendulum, g = 9.81.
    pub fn damped(mass: Real, length: Real, damping: Real) -> Self {
        Self::from_params(PendulumParameters::damped(mass, length, damping))
    }

    pub fn from_params(params: PendulumParameters) -> Self {
        Self {
            params,
            inertia: params.mass * params.length * params.length,
        }
    }

    pub fn params(&self) -> &PendulumParameters {
        &self.params
    }

    pub fn mass(&self) -> Real {
        self.params.mass
    }

    pub fn length(&self) -> Real {
        self.params.length
    }

    pub fn damping(&self) -> Real {
        self.params.damping
    }

    pub fn gravity(&self) -> Real {
        self.params.gravity
    }

    pub fn moment_of_inertia(&self) -> Real {
        self.inertia
    }

    /// θ̈ for the given angle and angular velocity.
    ///
    /// θ̈ = −(μ/(m·l))·θ̇ − (g/l)·sin θ
    pub fn angular_acceleration(&self, theta: Real, theta_dot: Real) -> Real {
        let p = &self.params;
        -(p.damping / (p.mass * p.length)) * theta_dot - (p.gravity / p.length) * theta.sin()
    }

    /// Bob position for a bare angle: x = l·sin θ, y = l·cos θ.
    pub fn position_at_angle(&self, theta: Real) -> Position {
        Position {
            x: self.params.length * theta.sin(),
            y: self.params.length * theta.cos(),
        }
    }

    /// Small-amplitude period 2π·√(l/g).
    pub fn small_angle_period(&self) -> Real {
        2.0 * std::f64::consts::PI * (self.params.length / self.params.gravity).sqrt()
    }

    /// Total mechanical energy ½·I·θ̇² + m·g·l·(1 − cos θ), zero at rest.
    pub fn energy(&self, state: &State) -> SimResult<Real> {
        check_dimension(state, 2)?;
        let theta = state.get(0)?;
        let theta_dot = state.get(1)?;
        let p = &self.params;
        let kinetic = 0.5 * self.inertia * theta_dot * theta_dot;
        let potential = p.mass * p.gravity * p.length * (1.0 - theta.cos());
        Ok(kinetic + potential)
    }
}

impl DynamicalSystem for Pendulum {
    fn dimension(&self) -> usize {
        2
    }

    fn equation_of_motion(&self, state: &State) -> SimResult<StateDerivative> {
        check_dimension(state, 2)?;
        let theta = state.get(0)?;
        let theta_dot = state.get(1)?;
        Ok(FixedVector::from([
            theta_dot,
            self.angular_acceleration(theta, theta_dot),
        ]))
    }

    fn convert_to_xy(&self, state: &State) -> SimResult<Position> {
        Ok(self.position_at_angle(state.get(0)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pd_core::units::{constants, kg, m, mps2};
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn parameter_defaults() {
        let p = PendulumParameters::new(2.0, 3.0);
        assert_eq!(p.damping, 0.0);
        assert_eq!(p.gravity, 9.81);

        let d = PendulumParameters::damped(2.0, 3.0, 0.4).with_gravity(1.62);
        assert_eq!(d.damping, 0.4);
        assert_eq!(d.gravity, 1.62);
    }

    #[test]
    fn parameters_from_si() {
        let p = PendulumParameters::from_si(kg(1.5), m(0.75));
        assert_eq!(p, PendulumParameters::new(1.5, 0.75));

        let moon = p.with_gravity_si(mps2(1.62));
        assert_eq!(moon.gravity, 1.62);
        assert_eq!(p.with_gravity_si(constants::g()), p);
    }

    #[test]
    fn parameter_validation() {
        assert!(PendulumParameters::new(1.0, 1.0).validate().is_ok());
        assert!(PendulumParameters::new(0.0, 1.0).validate().is_err());
        assert!(PendulumParameters::new(1.0, -1.0).validate().is_err());
        assert!(PendulumParameters::damped(1.0, 1.0, -0.1).validate().is_err());
        assert!(
            PendulumParameters::new(1.0, 1.0)
                .with_gravity(f64::NAN)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn inertia_is_cached() {
        let p = Pendulum::new(2.0, 3.0);
        assert_eq!(p.moment_of_inertia(), 18.0);
    }

    #[test]
    fn derivative_at_horizontal() {
        let p = Pendulum::new(1.0, 1.0);
        let d = p
            .equation_of_motion(&State::from([FRAC_PI_2, 0.0]))
            .unwrap();
        assert_eq!(d[0], 0.0);
        assert!((d[1] + 9.81).abs() < 1e-12);
    }

    #[test]
    fn damping_opposes_velocity() {
        let p = Pendulum::damped(2.0, 0.5, 1.0);
        // at the bottom only damping acts: θ̈ = −μ/(m·l)·θ̇
        let d = p.equation_of_motion(&State::from([0.0, 3.0])).unwrap();
        assert_eq!(d[0], 3.0);
        assert!((d[1] + 3.0).abs() < 1e-12);
    }

    #[test]
    fn derivative_leaves_input_untouched() {
        let p = Pendulum::damped(1.0, 1.0, 0.2);
        let s = State::from([0.3, -0.7]);
        let _ = p.equation_of_motion(&s).unwrap();
        assert_eq!(s.as_slice(), &[0.3, -0.7]);
    }

    #[test]
    fn derivative_rejects_wrong_dimension() {
        let p = Pendulum::new(1.0, 1.0);
        assert!(p.equation_of_motion(&State::zeros(3)).is_err());
        assert!(p.equation_of_motion(&State::empty()).is_err());
    }

    #[test]
    fn projection() {
        let p = Pendulum::new(1.0, 2.0);
        assert_eq!(p.position_at_angle(0.0), Position { x: 0.0, y: 2.0 });

        let pos = p.convert_to_xy(&State::from([FRAC_PI_2, 5.0])).unwrap();
        assert!((pos.x - 2.0).abs() < 1e-12);
        assert!(pos.y.abs() < 1e-12);

        // only θ is used
        assert!(p.convert_to_xy(&State::from([0.0])).is_ok());
        assert!(p.convert_to_xy(&State::empty()).is_err());
    }

    #[test]
    fn energy_at_rest_and_at_top() {
        let p = Pendulum::new(1.0, 1.0);
        assert_eq!(p.energy(&State::from([0.0, 0.0])).unwrap(), 0.0);
        let top = p.energy(&State::from([std::f64::consts::PI, 0.0])).unwrap();
        assert!((top - 2.0 * 9.81).abs() < 1e-12);
    }

    #[test]
    fn small_angle_period_for_unit_length() {
        let p = Pendulum::new(1.0, 1.0).params().with_gravity(std::f64::consts::PI.powi(2));
        let p = Pendulum::from_params(p);
        assert!((p.small_angle_period() - 2.0).abs() < 1e-12);
    }
}
