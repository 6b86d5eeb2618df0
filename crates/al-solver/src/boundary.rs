//! Flow-tangency boundary condition and the dense direct solve.

use al_core::{PanelId, Real};
use al_flight::FlowState;
use nalgebra::{DVector, Dyn, LU, Vector3};
use tracing::debug;

use crate::error::{SolverError, SolverResult};
use crate::influence::InfluenceMatrix;
use crate::mesh::PanelMesh;
use crate::solution::Solution;
use crate::symmetry::{SymmetryMode, SymmetryStrategy};

/// LU factors of every influence block, computed once per mesh.
#[derive(Debug, Clone)]
pub struct FactoredSystem {
    size: usize,
    factors: Vec<(SymmetryMode, LU<Real, Dyn, Dyn>)>,
}

impl FactoredSystem {
    /// Factor each block, rejecting near-singular ones.
    ///
    /// A block is singular when its smallest |U_kk| falls below
    /// `min_pivot_ratio` times its largest; the error names panel k.
    pub fn factor(matrix: &InfluenceMatrix, min_pivot_ratio: Real) -> SolverResult<Self> {
        let mut factors = Vec::with_capacity(matrix.blocks().len());
        for (mode, a) in matrix.blocks() {
            let lu = a.clone().lu();
            check_pivots(&lu, *mode, min_pivot_ratio)?;
            factors.push((*mode, lu));
        }
        Ok(Self {
            size: matrix.size(),
            factors,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn modes(&self) -> impl Iterator<Item = SymmetryMode> + '_ {
        self.factors.iter().map(|(m, _)| *m)
    }

    /// Solve one block for `rhs`.
    pub fn solve_mode(&self, mode: SymmetryMode, rhs: &DVector<Real>) -> SolverResult<DVector<Real>> {
        let (_, lu) = self
            .factors
            .iter()
            .find(|(m, _)| *m == mode)
            .ok_or_else(|| SolverError::Config {
                what: format!("no factored block for {:?} mode", mode),
            })?;
        lu.solve(rhs).ok_or(SolverError::SingularSystem {
            panel: PanelId::from_usize(0),
            what: format!("{:?} block could not be back-substituted", mode),
        })
    }
}

fn check_pivots(lu: &LU<Real, Dyn, Dyn>, mode: SymmetryMode, min_pivot_ratio: Real) -> SolverResult<()> {
    let u = lu.u();
    let pivots: Vec<Real> = u.diagonal().iter().map(|d| d.abs()).collect();
    let largest = pivots.iter().copied().fold(0.0, Real::max);
    let Some((k, smallest)) = pivots
        .iter()
        .copied()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(&b.1))
    else {
        return Ok(());
    };

    if !(smallest.is_finite() && largest.is_finite()) || smallest <= min_pivot_ratio * largest {
        return Err(SolverError::SingularSystem {
            panel: PanelId::from_usize(k),
            what: format!(
                "{:?} block pivot {:e} against largest {:e}",
                mode, smallest, largest
            ),
        });
    }
    Ok(())
}

/// Enforces zero normal velocity at every collocation point.
pub struct BoundaryConditionSolver<'a> {
    mesh: &'a PanelMesh,
    strategy: &'a dyn SymmetryStrategy,
    system: &'a FactoredSystem,
}

impl<'a> BoundaryConditionSolver<'a> {
    pub fn new(
        mesh: &'a PanelMesh,
        strategy: &'a dyn SymmetryStrategy,
        system: &'a FactoredSystem,
    ) -> Self {
        Self {
            mesh,
            strategy,
            system,
        }
    }

    /// Negative incident normal velocity at each stored collocation point,
    /// and at each image point when the mesh is reduced.
    pub fn right_hand_side(
        &self,
        flow: &FlowState,
        xyz_ref: &Vector3<Real>,
    ) -> (DVector<Real>, Option<DVector<Real>>) {
        let colloc = self.mesh.collocation_points();
        let normals = self.mesh.normals();
        let n = self.mesh.len();

        let direct = DVector::from_fn(n, |i, _| {
            -flow.incident_velocity_geometry(&colloc[i], xyz_ref).dot(&normals[i])
        });

        let images: Option<Vec<_>> = (0..n)
            .map(|i| self.strategy.image_point(&colloc[i], &normals[i]))
            .collect();
        let image = images.map(|pts| {
            DVector::from_fn(n, |i, _| {
                let (c, nrm) = &pts[i];
                -flow.incident_velocity_geometry(c, xyz_ref).dot(nrm)
            })
        });
        (direct, image)
    }

    pub fn solve(&self, flow: &FlowState, xyz_ref: &Vector3<Real>) -> SolverResult<Solution> {
        flow.validate()?;
        let (b_direct, b_image) = self.right_hand_side(flow, xyz_ref);

        let n = self.system.size();
        let mut right = DVector::zeros(n);
        let mut left = b_image.as_ref().map(|_| DVector::zeros(n));

        for mode in self.system.modes() {
            let rhs = match (mode, &b_image) {
                (SymmetryMode::Direct, _) | (_, None) => b_direct.clone(),
                (SymmetryMode::Symmetric, Some(b_img)) => (&b_direct + b_img) * 0.5,
                (SymmetryMode::Antisymmetric, Some(b_img)) => (&b_direct - b_img) * 0.5,
            };
            let gamma = self.system.solve_mode(mode, &rhs)?;
            right += &gamma;
            if let Some(l) = left.as_mut() {
                *l += gamma * mode.image_sign();
            }
        }

        let finite = |v: &DVector<Real>| v.iter().all(|g| g.is_finite());
        if !finite(&right) || !left.as_ref().is_none_or(finite) {
            return Err(SolverError::NonFinite {
                what: "circulation strengths".to_string(),
            });
        }

        debug!(
            panels = n,
            symmetric_flow = flow.is_symmetric(),
            "solved boundary condition"
        );
        Ok(Solution::new(right, left))
    }
}
