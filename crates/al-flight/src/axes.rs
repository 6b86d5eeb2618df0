//! Axis frames and vector conversions.
//!
//! - Geometry: x aft, y right, z up
//! - Body: x forward, y right, z down
//! - Wind: x along the aircraft's velocity relative to the air
//! - Stability: body axes rotated by alpha only

use al_core::Real;
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axes {
    Geometry,
    Body,
    Wind,
    Stability,
}

impl Axes {
    pub const ALL: [Axes; 4] = [Axes::Geometry, Axes::Body, Axes::Wind, Axes::Stability];

    pub fn name(self) -> &'static str {
        match self {
            Axes::Geometry => "geometry",
            Axes::Body => "body",
            Axes::Wind => "wind",
            Axes::Stability => "stability",
        }
    }
}

impl fmt::Display for Axes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rotation taking geometry-axis components to body-axis components.
fn geometry_to_body() -> Matrix3<Real> {
    Matrix3::from_diagonal(&Vector3::new(-1.0, 1.0, -1.0))
}

/// Rotation taking body-axis components to wind-axis components.
#[rustfmt::skip]
pub(crate) fn body_to_wind(alpha: Real, beta: Real) -> Matrix3<Real> {
    let (sa, ca) = alpha.sin_cos();
    let (sb, cb) = beta.sin_cos();
    Matrix3::new(
        ca * cb, sb, sa * cb,
        -ca * sb, cb, -sa * sb,
        -sa, 0.0, ca,
    )
}

/// Rotation taking body-axis components to stability-axis components.
#[rustfmt::skip]
pub(crate) fn body_to_stability(alpha: Real) -> Matrix3<Real> {
    let (sa, ca) = alpha.sin_cos();
    Matrix3::new(
        ca, 0.0, sa,
        0.0, 1.0, 0.0,
        -sa, 0.0, ca,
    )
}

/// Rotation taking `axes` components to body components.
pub(crate) fn to_body(axes: Axes, alpha: Real, beta: Real) -> Matrix3<Real> {
    match axes {
        Axes::Geometry => geometry_to_body(),
        Axes::Body => Matrix3::identity(),
        Axes::Wind => body_to_wind(alpha, beta).transpose(),
        Axes::Stability => body_to_stability(alpha).transpose(),
    }
}

/// Convert `v` from one frame to another at the given incidence angles (rad).
pub fn convert(v: &Vector3<Real>, from: Axes, to: Axes, alpha: Real, beta: Real) -> Vector3<Real> {
    if from == to {
        return *v;
    }
    let body = to_body(from, alpha, beta) * v;
    // Every rotation here is orthonormal, so its inverse is its transpose.
    to_body(to, alpha, beta).transpose() * body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_body_flip() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        let b = convert(&v, Axes::Geometry, Axes::Body, 0.3, 0.1);
        assert_eq!(b, Vector3::new(-1.0, 2.0, -3.0));
    }

    #[test]
    fn wind_x_is_flight_direction() {
        let alpha = 5f64.to_radians();
        let beta = 0.0;
        // Aircraft velocity relative to air, body axes
        let vb = Vector3::new(alpha.cos(), 0.0, alpha.sin());
        let vw = convert(&vb, Axes::Body, Axes::Wind, alpha, beta);
        assert!((vw - Vector3::x()).norm() < 1e-12);
    }

    #[test]
    fn round_trip_all_frames() {
        let v = Vector3::new(0.3, -1.2, 2.5);
        for from in Axes::ALL {
            for to in Axes::ALL {
                let there = convert(&v, from, to, 0.2, -0.05);
                let back = convert(&there, to, from, 0.2, -0.05);
                assert!((back - v).norm() < 1e-12, "{from} -> {to}");
            }
        }
    }
}
