//! Velocity queries at arbitrary field points.

use al_core::Real;
use al_flight::FlowState;
use nalgebra::Vector3;
use rayon::prelude::*;

use crate::forces::induced_at;
use crate::kernel::BiotSavart;
use crate::mesh::PanelMesh;
use crate::solution::{Solution, VortexElement};

/// Velocity field of one solved flow state.
///
/// Uses the same regularized kernel as the influence assembly, so points on
/// a filament are finite. There is no domain restriction: far-field points
/// are evaluated like any other.
pub struct FlowFieldQuery {
    kernel: BiotSavart,
    flow: FlowState,
    xyz_ref: Vector3<Real>,
    elements: Vec<VortexElement>,
}

impl FlowFieldQuery {
    pub fn new(
        mesh: &PanelMesh,
        kernel: BiotSavart,
        solution: &Solution,
        flow: FlowState,
        xyz_ref: Vector3<Real>,
    ) -> Self {
        Self {
            kernel,
            flow,
            xyz_ref,
            elements: solution.vortices(mesh),
        }
    }

    /// Velocity induced by the vortex lattice alone.
    pub fn induced_velocity(&self, point: &Vector3<Real>) -> Vector3<Real> {
        induced_at(&self.kernel, &self.elements, point)
    }

    /// Induced plus freestream plus rotation.
    pub fn total_velocity(&self, point: &Vector3<Real>) -> Vector3<Real> {
        self.induced_velocity(point) + self.flow.incident_velocity_geometry(point, &self.xyz_ref)
    }

    pub fn induced_velocities(&self, points: &[Vector3<Real>]) -> Vec<Vector3<Real>> {
        points.par_iter().map(|p| self.induced_velocity(p)).collect()
    }

    pub fn total_velocities(&self, points: &[Vector3<Real>]) -> Vec<Vector3<Real>> {
        points.par_iter().map(|p| self.total_velocity(p)).collect()
    }
}

/// Distance from `point` to the axis-aligned box `[lo, hi]`; zero inside.
pub fn distance_to_box(point: &Vector3<Real>, lo: &Vector3<Real>, hi: &Vector3<Real>) -> Real {
    let outside = (lo - point).sup(&Vector3::zeros()) + (point - hi).sup(&Vector3::zeros());
    outside.norm()
}
