//! Biot-Savart kernel for straight vortex filaments.
//!
//! All functions return the velocity induced by a unit-strength filament.
//! The singular `1/h` behavior near a filament is regularized with a core
//! radius `delta`: the perpendicular distance term `h^2` becomes
//! `h^2 + delta^2`. Points lying on a filament (to machine precision) get
//! no contribution from it, with or without a core.

use al_core::Real;
use nalgebra::Vector3;
use std::f64::consts::PI;

const FOUR_PI_INV: Real = 1.0 / (4.0 * PI);

/// A horseshoe vortex: bound segment `start -> end` plus two semi-infinite
/// trailing legs running along `wake`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Horseshoe {
    pub start: Vector3<Real>,
    pub end: Vector3<Real>,
    /// Unit direction of the trailing legs.
    pub wake: Vector3<Real>,
}

impl Horseshoe {
    /// Image across the y = 0 plane. Orientation is reversed so the image of a
    /// lifting vortex still lifts.
    pub fn mirrored(&self) -> Self {
        Self {
            start: mirror_y(&self.end),
            end: mirror_y(&self.start),
            wake: mirror_y(&self.wake),
        }
    }

    pub fn midpoint(&self) -> Vector3<Real> {
        (self.start + self.end) * 0.5
    }

    pub fn bound_vector(&self) -> Vector3<Real> {
        self.end - self.start
    }
}

#[inline]
pub fn mirror_y(v: &Vector3<Real>) -> Vector3<Real> {
    Vector3::new(v.x, -v.y, v.z)
}

/// Regularized Biot-Savart evaluator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiotSavart {
    core_radius: Real,
}

impl BiotSavart {
    pub fn new(core_radius: Real) -> Self {
        Self {
            core_radius: core_radius.abs(),
        }
    }

    pub fn core_radius(&self) -> Real {
        self.core_radius
    }

    /// Finite segment from `a` to `b`, evaluated at `p`.
    pub fn segment(&self, p: &Vector3<Real>, a: &Vector3<Real>, b: &Vector3<Real>) -> Vector3<Real> {
        let r0 = b - a;
        let r1 = p - a;
        let r2 = p - b;
        let r0n = r0.norm();
        let r1n = r1.norm();
        let r2n = r2.norm();
        if r0n == 0.0 || r1n == 0.0 || r2n == 0.0 {
            return Vector3::zeros();
        }

        let c = r1.cross(&r2);
        let cn = c.norm();
        // |r1 x r2| = |r0| h, so this is h <= eps * (|r1| + |r2|)
        if cn <= Real::EPSILON * r0n * (r1n + r2n) {
            return Vector3::zeros();
        }

        let denom = cn * cn + (self.core_radius * r0n).powi(2);
        let along = r0.dot(&(r1 / r1n - r2 / r2n));
        c * (FOUR_PI_INV * along / denom)
    }

    /// Semi-infinite filament starting at `a` and running to infinity along
    /// the unit vector `dir`, evaluated at `p`.
    pub fn semi_infinite(
        &self,
        p: &Vector3<Real>,
        a: &Vector3<Real>,
        dir: &Vector3<Real>,
    ) -> Vector3<Real> {
        let r1 = p - a;
        let r1n = r1.norm();
        if r1n == 0.0 {
            return Vector3::zeros();
        }

        let c = dir.cross(&r1);
        let cn = c.norm();
        if cn <= Real::EPSILON * r1n {
            return Vector3::zeros();
        }

        let denom = cn * cn + self.core_radius * self.core_radius;
        let cos_theta = dir.dot(&r1) / r1n;
        c * (FOUR_PI_INV * (1.0 + cos_theta) / denom)
    }

    /// Complete horseshoe: trailing leg in from infinity, bound segment,
    /// trailing leg back out to infinity.
    pub fn horseshoe(&self, p: &Vector3<Real>, hs: &Horseshoe) -> Vector3<Real> {
        self.segment(p, &hs.start, &hs.end) + self.semi_infinite(p, &hs.end, &hs.wake)
            - self.semi_infinite(p, &hs.start, &hs.wake)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> BiotSavart {
        BiotSavart::new(0.0)
    }

    #[test]
    fn long_segment_approaches_infinite_line() {
        let k = plain();
        let a = Vector3::new(0.0, -1.0e6, 0.0);
        let b = Vector3::new(0.0, 1.0e6, 0.0);
        let h = 0.5;
        let v = k.segment(&Vector3::new(h, 0.0, 0.0), &a, &b);
        let expected = 1.0 / (2.0 * PI * h);
        // Vortex along +y, point at +x: velocity along -z
        assert!((v.z + expected).abs() < 1e-9);
        assert!(v.x.abs() < 1e-15 && v.y.abs() < 1e-15);
    }

    #[test]
    fn semi_infinite_is_half_line_at_its_root() {
        let k = plain();
        let v = k.semi_infinite(
            &Vector3::new(0.0, 2.0, 0.0),
            &Vector3::zeros(),
            &Vector3::x(),
        );
        let expected = 1.0 / (4.0 * PI * 2.0);
        assert!((v.norm() - expected).abs() < 1e-15);
        // x cross y = z
        assert!(v.z > 0.0);
    }

    #[test]
    fn on_filament_is_zero_not_nan() {
        for k in [plain(), BiotSavart::new(1e-3)] {
            let a = Vector3::zeros();
            let b = Vector3::y();
            let mid = Vector3::new(0.0, 0.5, 0.0);
            assert_eq!(k.segment(&mid, &a, &b), Vector3::zeros());
            assert_eq!(k.segment(&a, &a, &b), Vector3::zeros());
            assert_eq!(k.semi_infinite(&Vector3::new(3.0, 0.0, 0.0), &a, &Vector3::x()), Vector3::zeros());
            assert_eq!(k.semi_infinite(&a, &a, &Vector3::x()), Vector3::zeros());
        }
    }

    #[test]
    fn core_radius_bounds_velocity_near_filament() {
        let cored = BiotSavart::new(0.01);
        let a = Vector3::new(0.0, -1.0, 0.0);
        let b = Vector3::new(0.0, 1.0, 0.0);
        let near = cored.segment(&Vector3::new(1e-6, 0.0, 0.0), &a, &b);
        assert!(near.norm().is_finite());
        assert!(near.norm() < 1.0);
    }

    #[test]
    fn horseshoe_induces_downwash_behind_bound() {
        let k = BiotSavart::new(1e-8);
        let hs = Horseshoe {
            start: Vector3::new(0.0, -1.0, 0.0),
            end: Vector3::new(0.0, 1.0, 0.0),
            wake: Vector3::x(),
        };
        let v = k.horseshoe(&Vector3::new(0.5, 0.0, 0.0), &hs);
        assert!(v.z < 0.0);
        assert!(v.y.abs() < 1e-14);
    }

    #[test]
    fn mirrored_horseshoe_reflects_velocity() {
        let k = BiotSavart::new(1e-8);
        let hs = Horseshoe {
            start: Vector3::new(0.1, 0.5, 0.02),
            end: Vector3::new(0.2, 1.5, 0.1),
            wake: Vector3::x(),
        };
        let p = Vector3::new(0.7, 0.9, -0.3);
        let v = k.horseshoe(&p, &hs);
        let v_image = k.horseshoe(&mirror_y(&p), &hs.mirrored());
        assert!((mirror_y(&v) - v_image).norm() < 1e-12);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn horseshoe_velocity_is_finite(
            x in -3.0_f64..3.0, y in -3.0_f64..3.0, z in -1.0_f64..1.0
        ) {
            let k = BiotSavart::new(1e-8);
            let hs = Horseshoe {
                start: Vector3::new(0.0, 0.0, 0.0),
                end: Vector3::new(0.0, 1.0, 0.0),
                wake: Vector3::x(),
            };
            let v = k.horseshoe(&Vector3::new(x, y, z), &hs);
            prop_assert!(v.iter().all(|c| c.is_finite()));
        }
    }
}
