// pd-core/src/units.rs

use uom::si::f64::{Acceleration as UomAcceleration, Length as UomLength, Mass as UomMass};

// Public canonical unit types (SI, f64)
pub type Accel = UomAcceleration;
pub type Length = UomLength;
pub type Mass = UomMass;

#[inline]
pub fn kg(v: f64) -> Mass {
    use uom::si::mass::kilogram;
    Mass::new::<kilogram>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn mps2(v: f64) -> Accel {
    use uom::si::acceleration::meter_per_second_squared;
    Accel::new::<meter_per_second_squared>(v)
}

pub mod constants {
    use super::*;

    /// Gravitational acceleration used when a model does not set its own.
    pub const STANDARD_GRAVITY_MPS2: f64 = 9.81;

    #[inline]
    pub fn g() -> Accel {
        mps2(STANDARD_GRAVITY_MPS2)
    }
}
