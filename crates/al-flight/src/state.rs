//! Operating point.

use al_core::units::{Angle, AngularVelocity, Density, Velocity};
use al_core::{Real, deg, radps};
use nalgebra::Vector3;
use uom::si::angle::{degree, radian};
use uom::si::angular_velocity::radian_per_second;
use uom::si::mass_density::kilogram_per_cubic_meter;
use uom::si::velocity::meter_per_second;

use crate::axes::{self, Axes};
use crate::error::{FlightError, FlightResult};
use crate::variable::StateVariable;

/// One linearized flight condition.
///
/// Rates are body-axis (p roll, q pitch, r yaw) about the moment reference
/// point. Immutable in use: perturbations build a new value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowState {
    pub velocity: Velocity,
    pub density: Density,
    pub alpha: Angle,
    pub beta: Angle,
    pub p: AngularVelocity,
    pub q: AngularVelocity,
    pub r: AngularVelocity,
}

impl FlowState {
    /// Straight, level, zero-incidence flow.
    pub fn new(velocity: Velocity, density: Density) -> Self {
        Self {
            velocity,
            density,
            alpha: deg(0.0),
            beta: deg(0.0),
            p: radps(0.0),
            q: radps(0.0),
            r: radps(0.0),
        }
    }

    pub fn with_alpha(mut self, alpha: Angle) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_beta(mut self, beta: Angle) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_rates(mut self, p: AngularVelocity, q: AngularVelocity, r: AngularVelocity) -> Self {
        self.p = p;
        self.q = q;
        self.r = r;
        self
    }

    pub fn validate(&self) -> FlightResult<()> {
        let v = self.speed();
        let rho = self.rho();
        for (what, value) in [
            ("velocity", v),
            ("density", rho),
            ("alpha", self.alpha_rad()),
            ("beta", self.beta_rad()),
        ] {
            if !value.is_finite() {
                return Err(FlightError::NonFinite { what });
            }
        }
        if self.body_rates().iter().any(|w| !w.is_finite()) {
            return Err(FlightError::NonFinite { what: "body rates" });
        }
        if v <= 0.0 {
            return Err(FlightError::NonPositive {
                what: "velocity",
                value: v,
            });
        }
        if rho <= 0.0 {
            return Err(FlightError::NonPositive {
                what: "density",
                value: rho,
            });
        }
        Ok(())
    }

    /// Airspeed in m/s.
    pub fn speed(&self) -> Real {
        self.velocity.get::<meter_per_second>()
    }

    /// Density in kg/m^3.
    pub fn rho(&self) -> Real {
        self.density.get::<kilogram_per_cubic_meter>()
    }

    pub fn alpha_rad(&self) -> Real {
        self.alpha.get::<radian>()
    }

    pub fn beta_rad(&self) -> Real {
        self.beta.get::<radian>()
    }

    /// (p, q, r) in rad/s.
    pub fn body_rates(&self) -> Vector3<Real> {
        Vector3::new(
            self.p.get::<radian_per_second>(),
            self.q.get::<radian_per_second>(),
            self.r.get::<radian_per_second>(),
        )
    }

    /// Dynamic pressure in Pa.
    pub fn dynamic_pressure(&self) -> Real {
        0.5 * self.rho() * self.speed().powi(2)
    }

    /// True when the flow is mirror-symmetric about the y = 0 plane.
    pub fn is_symmetric(&self) -> bool {
        let rates = self.body_rates();
        self.beta_rad() == 0.0 && rates.x == 0.0 && rates.z == 0.0
    }

    /// Unit vector of the air velocity seen by the aircraft, geometry axes.
    pub fn freestream_direction_geometry(&self) -> Vector3<Real> {
        let (sa, ca) = self.alpha_rad().sin_cos();
        let (sb, cb) = self.beta_rad().sin_cos();
        Vector3::new(ca * cb, -sb, sa * cb)
    }

    /// Air velocity seen by the aircraft, geometry axes.
    pub fn freestream_velocity_geometry(&self) -> Vector3<Real> {
        self.freestream_direction_geometry() * self.speed()
    }

    /// Angular velocity of the aircraft expressed in geometry axes.
    pub fn angular_velocity_geometry(&self) -> Vector3<Real> {
        let w = self.body_rates();
        Vector3::new(-w.x, w.y, -w.z)
    }

    /// Air velocity at `point` due to body rotation about `xyz_ref`.
    pub fn rotation_velocity_geometry(
        &self,
        point: &Vector3<Real>,
        xyz_ref: &Vector3<Real>,
    ) -> Vector3<Real> {
        -self.angular_velocity_geometry().cross(&(point - xyz_ref))
    }

    /// Freestream plus rotation, the incident velocity before induced effects.
    pub fn incident_velocity_geometry(
        &self,
        point: &Vector3<Real>,
        xyz_ref: &Vector3<Real>,
    ) -> Vector3<Real> {
        self.freestream_velocity_geometry() + self.rotation_velocity_geometry(point, xyz_ref)
    }

    /// Re-express `v` from frame `from` to frame `to` at this state's angles.
    pub fn convert_axes(&self, v: &Vector3<Real>, from: Axes, to: Axes) -> Vector3<Real> {
        axes::convert(v, from, to, self.alpha_rad(), self.beta_rad())
    }

    /// Value of `variable` in its perturbation unit (deg or rad/s).
    pub fn value_of(&self, variable: StateVariable) -> Real {
        match variable {
            StateVariable::Alpha => self.alpha.get::<degree>(),
            StateVariable::Beta => self.beta.get::<degree>(),
            StateVariable::P => self.p.get::<radian_per_second>(),
            StateVariable::Q => self.q.get::<radian_per_second>(),
            StateVariable::R => self.r.get::<radian_per_second>(),
        }
    }

    /// Copy with `variable` shifted by `delta` (deg for angles, rad/s for rates).
    pub fn perturbed(&self, variable: StateVariable, delta: Real) -> Self {
        let mut next = *self;
        match variable {
            StateVariable::Alpha => next.alpha = self.alpha + deg(delta),
            StateVariable::Beta => next.beta = self.beta + deg(delta),
            StateVariable::P => next.p = self.p + radps(delta),
            StateVariable::Q => next.q = self.q + radps(delta),
            StateVariable::R => next.r = self.r + radps(delta),
        }
        next
    }
}
