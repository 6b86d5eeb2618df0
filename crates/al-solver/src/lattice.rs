//! `VortexLattice`: the analysis pipeline for one airplane.

use al_core::Real;
use al_flight::FlowState;
use al_geometry::{Airplane, References};
use nalgebra::Vector3;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::boundary::{BoundaryConditionSolver, FactoredSystem};
use crate::config::SolverConfig;
use crate::error::SolverResult;
use crate::flowfield::{FlowFieldQuery, distance_to_box};
use crate::forces::ForceMomentIntegrator;
use crate::influence::{InfluenceAssembler, InfluenceMatrix};
use crate::kernel::BiotSavart;
use crate::mesh::PanelMesh;
use crate::result::AeroResult;
use crate::solution::Solution;
use crate::stability::{StabilityConfig, StabilityDerivativeEngine};
use crate::streamline::{StreamlineConfig, StreamlineIntegrator};
use crate::symmetry::{self, SymmetryStrategy};

/// Meshed, assembled and factored airplane, ready for any number of flow
/// states.
///
/// The influence matrix and its LU factors depend on geometry only, so they
/// are built once here and shared read-only by every solve.
#[derive(Debug)]
pub struct VortexLattice {
    config: SolverConfig,
    references: References,
    mesh: PanelMesh,
    strategy: Box<dyn SymmetryStrategy>,
    kernel: BiotSavart,
    influence: InfluenceMatrix,
    system: FactoredSystem,
}

impl VortexLattice {
    pub fn new(airplane: &Airplane, config: SolverConfig) -> SolverResult<Self> {
        config.validate()?;
        let mesh = PanelMesh::build(airplane, &config.mesh)?;
        Self::from_mesh(mesh, airplane.references, config)
    }

    /// Assemble and factor an existing mesh.
    pub fn from_mesh(
        mesh: PanelMesh,
        references: References,
        config: SolverConfig,
    ) -> SolverResult<Self> {
        config.validate()?;
        references.validate()?;

        let started = Instant::now();
        let strategy = symmetry::for_mesh(&mesh);
        let kernel = BiotSavart::new(config.core_radius);
        let influence = InfluenceAssembler::new(kernel, strategy.as_ref()).assemble(&mesh)?;
        let system = FactoredSystem::factor(&influence, config.min_pivot_ratio)?;

        info!(
            panels = mesh.len(),
            symmetry = strategy.name(),
            elapsed_ms = started.elapsed().as_secs_f64() * 1e3,
            "vortex lattice ready"
        );
        Ok(Self {
            config,
            references,
            mesh,
            strategy,
            kernel,
            influence,
            system,
        })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn references(&self) -> &References {
        &self.references
    }

    pub fn mesh(&self) -> &PanelMesh {
        &self.mesh
    }

    pub fn influence(&self) -> &InfluenceMatrix {
        &self.influence
    }

    pub fn strategy(&self) -> &dyn SymmetryStrategy {
        self.strategy.as_ref()
    }

    /// Circulation strengths for `flow`.
    pub fn solve(&self, flow: &FlowState) -> SolverResult<Solution> {
        BoundaryConditionSolver::new(&self.mesh, self.strategy.as_ref(), &self.system)
            .solve(flow, &self.references.xyz())
    }

    /// Forces and coefficients for an already solved state.
    pub fn integrate(&self, flow: &FlowState, solution: &Solution) -> SolverResult<AeroResult> {
        ForceMomentIntegrator::new(&self.mesh, self.kernel, &self.references)
            .integrate(flow, solution)
    }

    pub fn run(&self, flow: &FlowState) -> SolverResult<AeroResult> {
        let solution = self.solve(flow)?;
        self.integrate(flow, &solution)
    }

    /// `run` plus stability derivatives and the neutral point.
    pub fn run_with_stability_derivatives(
        &self,
        flow: &FlowState,
        stability: &StabilityConfig,
    ) -> SolverResult<AeroResult> {
        let mut result = self.run(flow)?;
        let derivatives = StabilityDerivativeEngine::new(self, stability)
            .derivatives(flow, &result.coefficients)?;
        result.stability = Some(derivatives);
        Ok(result)
    }

    pub fn flow_field(&self, flow: &FlowState, solution: &Solution) -> FlowFieldQuery {
        FlowFieldQuery::new(&self.mesh, self.kernel, solution, *flow, self.references.xyz())
    }

    pub fn induced_velocity_at(
        &self,
        flow: &FlowState,
        solution: &Solution,
        points: &[Vector3<Real>],
    ) -> Vec<Vector3<Real>> {
        self.warn_far_field(points, "velocity query");
        self.flow_field(flow, solution).induced_velocities(points)
    }

    pub fn velocity_at(
        &self,
        flow: &FlowState,
        solution: &Solution,
        points: &[Vector3<Real>],
    ) -> Vec<Vector3<Real>> {
        self.warn_far_field(points, "velocity query");
        self.flow_field(flow, solution).total_velocities(points)
    }

    /// One streamline per seed, each with `config.steps` points.
    pub fn trace_streamlines(
        &self,
        flow: &FlowState,
        solution: &Solution,
        seeds: &[Vector3<Real>],
        config: &StreamlineConfig,
    ) -> SolverResult<Vec<Vec<Vector3<Real>>>> {
        let length = config.length.unwrap_or(5.0 * self.references.c_ref);
        let field = self.flow_field(flow, solution);
        let integrator = StreamlineIntegrator::new(&field, config.steps, length)?;
        self.warn_far_field(seeds, "streamline seed");

        let lines = integrator.trace_all(seeds);
        debug!(
            seeds = seeds.len(),
            steps = config.steps,
            length,
            "traced streamlines"
        );
        Ok(lines)
    }

    /// Points far from the geometry are still evaluated, but the linear model
    /// is being extrapolated there.
    fn warn_far_field(&self, points: &[Vector3<Real>], what: &str) {
        let (lo, hi) = self.mesh.bounding_box();
        let limit = self.config.far_field_factor * self.references.b_ref;
        let far = points
            .iter()
            .filter(|p| distance_to_box(p, &lo, &hi) > limit)
            .count();
        if far > 0 {
            warn!(
                far,
                total = points.len(),
                limit,
                "{} extrapolates the linearized model far from the geometry",
                what
            );
        }
    }
}
