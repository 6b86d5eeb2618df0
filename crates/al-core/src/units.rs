//! SI quantities for flight-condition inputs.
//!
//! Geometry stays in plain `Real` metres; only the operating point carries
//! units so degrees and radians cannot be mixed up at the API boundary.

use uom::si::f64::{
    Angle as UomAngle, AngularVelocity as UomAngularVelocity, MassDensity as UomMassDensity,
    Velocity as UomVelocity,
};

pub type Angle = UomAngle;
pub type AngularVelocity = UomAngularVelocity;
pub type Density = UomMassDensity;
pub type Velocity = UomVelocity;

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

#[inline]
pub fn kgpm3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn deg(v: f64) -> Angle {
    use uom::si::angle::degree;
    Angle::new::<degree>(v)
}

#[inline]
pub fn rad(v: f64) -> Angle {
    use uom::si::angle::radian;
    Angle::new::<radian>(v)
}

/// Body rates are always given in rad/s.
#[inline]
pub fn radps(v: f64) -> AngularVelocity {
    use uom::si::angular_velocity::radian_per_second;
    AngularVelocity::new::<radian_per_second>(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degrees_convert_to_radians() {
        use uom::si::angle::radian;
        let a = deg(180.0);
        assert!((a.get::<radian>() - std::f64::consts::PI).abs() < 1e-12);
        assert!((rad(1.0).get::<radian>() - 1.0).abs() < 1e-15);
    }

    #[test]
    fn rates_and_density_keep_si_values() {
        use uom::si::angular_velocity::radian_per_second;
        use uom::si::mass_density::kilogram_per_cubic_meter;
        use uom::si::velocity::meter_per_second;
        assert_eq!(mps(15.0).get::<meter_per_second>(), 15.0);
        assert_eq!(kgpm3(1.225).get::<kilogram_per_cubic_meter>(), 1.225);
        assert_eq!(radps(0.1).get::<radian_per_second>(), 0.1);
    }
}
