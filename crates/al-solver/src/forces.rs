//! Kutta-Joukowski force and moment integration.

use al_core::{PanelId, Real};
use al_flight::{Axes, FlowState};
use al_geometry::References;
use nalgebra::Vector3;
use rayon::prelude::*;
use std::collections::BTreeMap;

use crate::error::{SolverError, SolverResult};
use crate::kernel::BiotSavart;
use crate::mesh::PanelMesh;
use crate::result::{AeroResult, AxisLoads, Coefficients, PanelForce, SpanLoading, StripLoad};
use crate::solution::{Solution, VortexElement};

/// Turns circulation strengths into forces, moments and coefficients.
///
/// Each bound vortex sees the total local velocity at its midpoint
/// (freestream, rotation and the velocity induced by every vortex) and
/// carries `rho * Gamma * (V x l)`. Moments are taken about the reference
/// point with the bound midpoint as the point of application.
pub struct ForceMomentIntegrator<'a> {
    mesh: &'a PanelMesh,
    kernel: BiotSavart,
    references: &'a References,
}

impl<'a> ForceMomentIntegrator<'a> {
    pub fn new(mesh: &'a PanelMesh, kernel: BiotSavart, references: &'a References) -> Self {
        Self {
            mesh,
            kernel,
            references,
        }
    }

    pub fn integrate(&self, flow: &FlowState, solution: &Solution) -> SolverResult<AeroResult> {
        let elements = solution.vortices(self.mesh);
        let xyz_ref = self.references.xyz();
        let rho = flow.rho();
        let q = flow.dynamic_pressure();

        let forces: Vec<Vector3<Real>> = elements
            .par_iter()
            .map(|e| {
                let hs = &e.panel.horseshoe;
                let mid = hs.midpoint();
                let v = flow.incident_velocity_geometry(&mid, &xyz_ref)
                    + induced_at(&self.kernel, &elements, &mid);
                v.cross(&hs.bound_vector()) * (rho * e.strength)
            })
            .collect();

        let mut force = Vector3::zeros();
        let mut moment = Vector3::zeros();
        for (e, f) in elements.iter().zip(&forces) {
            force += f;
            moment += (e.panel.horseshoe.midpoint() - xyz_ref).cross(f);
        }
        if force.iter().chain(moment.iter()).any(|v| !v.is_finite()) {
            return Err(SolverError::NonFinite {
                what: "integrated forces".to_string(),
            });
        }

        let loads: BTreeMap<Axes, AxisLoads> = Axes::ALL
            .into_iter()
            .map(|axes| {
                let f = flow.convert_axes(&force, Axes::Geometry, axes);
                let m = flow.convert_axes(&moment, Axes::Geometry, axes);
                (axes, AxisLoads::new(f, m))
            })
            .collect();

        let wind = flow.convert_axes(&force, Axes::Geometry, Axes::Wind);
        let body_moment = flow.convert_axes(&moment, Axes::Geometry, Axes::Body);
        let refs = self.references;
        let qs = q * refs.s_ref;
        let coefficients = Coefficients {
            lift: -wind.z / qs,
            drag: -wind.x / qs,
            side: wind.y / qs,
            roll: body_moment.x / (qs * refs.b_ref),
            pitch: body_moment.y / (qs * refs.c_ref),
            yaw: body_moment.z / (qs * refs.b_ref),
        };

        Ok(AeroResult {
            loads,
            coefficients,
            lift: -wind.z,
            drag: -wind.x,
            side_force: wind.y,
            dynamic_pressure: q,
            panel_forces: panel_forces(&elements, &forces, q),
            span_loading: self.span_loading(flow, solution, &elements),
            stability: None,
        })
    }

    fn span_loading(
        &self,
        flow: &FlowState,
        solution: &Solution,
        elements: &[VortexElement],
    ) -> SpanLoading {
        let strips_geo = solution.expanded_strips(self.mesh);
        let mut circulation = vec![0.0; strips_geo.len()];
        for e in elements {
            circulation[e.panel.strip] += e.strength;
        }

        let speed = flow.speed();
        let mut strips: Vec<StripLoad> = strips_geo
            .iter()
            .zip(circulation)
            .map(|(s, gamma)| StripLoad {
                wing: s.wing,
                y: s.leading_edge.y,
                z: s.leading_edge.z,
                chord: s.chord,
                width: s.width,
                circulation: gamma,
                cl: 2.0 * gamma / (speed * s.chord),
            })
            .collect();
        strips.sort_by(|a, b| a.wing.cmp(&b.wing).then(a.y.total_cmp(&b.y)));
        SpanLoading { strips }
    }
}

/// Velocity induced at `point` by every vortex, scaled by its strength.
pub(crate) fn induced_at(
    kernel: &BiotSavart,
    elements: &[VortexElement],
    point: &Vector3<Real>,
) -> Vector3<Real> {
    elements.iter().fold(Vector3::zeros(), |acc, e| {
        acc + kernel.horseshoe(point, &e.panel.horseshoe) * e.strength
    })
}

fn panel_forces(elements: &[VortexElement], forces: &[Vector3<Real>], q: Real) -> Vec<PanelForce> {
    let stored = elements.iter().filter(|e| !e.mirrored).count();
    elements
        .iter()
        .zip(forces)
        .enumerate()
        .map(|(k, (e, f))| PanelForce {
            panel: PanelId::from_usize(if e.mirrored { k - stored } else { k }),
            mirrored: e.mirrored,
            circulation: e.strength,
            force: (*f).into(),
            delta_cp: f.dot(&e.panel.normal) / (q * e.panel.area),
        })
        .collect()
}
