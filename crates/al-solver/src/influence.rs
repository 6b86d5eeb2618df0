//! Influence-coefficient assembly.

use al_core::{PanelId, Real};
use nalgebra::{DMatrix, Vector3};
use rayon::prelude::*;
use tracing::debug;

use crate::error::{SolverError, SolverResult};
use crate::kernel::{BiotSavart, Horseshoe};
use crate::mesh::PanelMesh;
use crate::symmetry::{SymmetryMode, SymmetryStrategy};

/// Collocation points closer than this fraction of the mesh size coincide.
const DUPLICATE_RELATIVE_DISTANCE: Real = 1e-10;

/// Dense normal-projected influence matrices, one per symmetry mode.
///
/// Entry (i, j) is the normal velocity at collocation point i induced by a
/// unit-strength horseshoe at panel j (plus its image, signed by the mode).
/// Depends on geometry only.
#[derive(Debug, Clone, PartialEq)]
pub struct InfluenceMatrix {
    blocks: Vec<(SymmetryMode, DMatrix<Real>)>,
}

impl InfluenceMatrix {
    /// Panel count N; every block is N x N.
    pub fn size(&self) -> usize {
        self.blocks.first().map_or(0, |(_, m)| m.nrows())
    }

    pub fn blocks(&self) -> &[(SymmetryMode, DMatrix<Real>)] {
        &self.blocks
    }

    pub fn block(&self, mode: SymmetryMode) -> Option<&DMatrix<Real>> {
        self.blocks.iter().find(|(m, _)| *m == mode).map(|(_, a)| a)
    }

    /// The block symmetric flow is solved with (direct or symmetric mode).
    pub fn primary(&self) -> &DMatrix<Real> {
        &self.blocks[0].1
    }
}

/// Builds `InfluenceMatrix` values from a mesh.
pub struct InfluenceAssembler<'a> {
    kernel: BiotSavart,
    strategy: &'a dyn SymmetryStrategy,
}

impl<'a> InfluenceAssembler<'a> {
    pub fn new(kernel: BiotSavart, strategy: &'a dyn SymmetryStrategy) -> Self {
        Self { kernel, strategy }
    }

    pub fn assemble(&self, mesh: &PanelMesh) -> SolverResult<InfluenceMatrix> {
        check_duplicate_collocation(mesh)?;

        let n = mesh.len();
        let horseshoes: Vec<Horseshoe> = (0..n).map(|j| mesh.horseshoe(j)).collect();
        let images: Vec<Option<Horseshoe>> =
            horseshoes.iter().map(|hs| self.strategy.image(hs)).collect();
        let colloc = mesh.collocation_points();
        let normals = mesh.normals();

        // Row i: direct and image normal velocities at collocation point i
        let rows: Vec<(Vec<Real>, Vec<Real>)> = (0..n)
            .into_par_iter()
            .map(|i| {
                let (c, nrm) = (&colloc[i], &normals[i]);
                let direct = horseshoes
                    .iter()
                    .map(|hs| self.kernel.horseshoe(c, hs).dot(nrm))
                    .collect();
                let image = images
                    .iter()
                    .map(|img| img.map_or(0.0, |hs| self.kernel.horseshoe(c, &hs).dot(nrm)))
                    .collect();
                (direct, image)
            })
            .collect();

        if let Some(i) = rows
            .iter()
            .position(|(d, m)| d.iter().chain(m).any(|v| !v.is_finite()))
        {
            return Err(SolverError::NonFinite {
                what: format!("influence row of panel {}", PanelId::from_usize(i)),
            });
        }

        let blocks = self
            .strategy
            .modes()
            .iter()
            .map(|&mode| {
                let sign = mode.image_sign();
                let a = DMatrix::from_fn(n, n, |i, j| rows[i].0[j] + sign * rows[i].1[j]);
                (mode, a)
            })
            .collect();

        debug!(
            panels = n,
            strategy = self.strategy.name(),
            "assembled influence matrix"
        );
        Ok(InfluenceMatrix { blocks })
    }
}

/// Two panels with the same collocation point make identical rows.
fn check_duplicate_collocation(mesh: &PanelMesh) -> SolverResult<()> {
    let (lo, hi) = mesh.bounding_box();
    let tol = DUPLICATE_RELATIVE_DISTANCE * (hi - lo).norm().max(Real::MIN_POSITIVE);
    let pts: &[Vector3<Real>] = mesh.collocation_points();

    let hit = (0..pts.len()).into_par_iter().find_map_first(|i| {
        pts[i + 1..]
            .iter()
            .position(|q| (q - pts[i]).norm() <= tol)
            .map(|k| (i, i + 1 + k))
    });

    match hit {
        Some((first, second)) => Err(SolverError::DuplicatePanels {
            first: PanelId::from_usize(first),
            second: PanelId::from_usize(second),
        }),
        None => Ok(()),
    }
}
