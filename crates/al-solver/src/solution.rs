//! Solved circulation strengths.

use al_core::Real;
use nalgebra::DVector;

use crate::mesh::{Panel, PanelMesh, Strip};

/// Circulation strength of every stored panel, plus the strengths of the
/// implied left half when the mesh is symmetry-reduced.
///
/// Produced by one boundary-condition solve and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    strengths: DVector<Real>,
    mirror_strengths: Option<DVector<Real>>,
}

/// A panel paired with its solved strength.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VortexElement {
    pub panel: Panel,
    pub strength: Real,
    /// True for the implied left half of a symmetry-reduced mesh.
    pub mirrored: bool,
}

impl Solution {
    pub(crate) fn new(strengths: DVector<Real>, mirror_strengths: Option<DVector<Real>>) -> Self {
        Self {
            strengths,
            mirror_strengths,
        }
    }

    /// All-zero circulation: the undisturbed freestream.
    pub fn zeros(mesh: &PanelMesh) -> Self {
        let n = mesh.len();
        Self {
            strengths: DVector::zeros(n),
            mirror_strengths: mesh.is_symmetric().then(|| DVector::zeros(n)),
        }
    }

    pub fn strengths(&self) -> &DVector<Real> {
        &self.strengths
    }

    pub fn mirror_strengths(&self) -> Option<&DVector<Real>> {
        self.mirror_strengths.as_ref()
    }

    /// Every vortex in the flow: stored panels first, then images.
    ///
    /// Image panels get strip indices offset by the stored strip count, matching
    /// `expanded_strips`.
    pub fn vortices(&self, mesh: &PanelMesh) -> Vec<VortexElement> {
        let stored = mesh.panels().zip(self.strengths.iter()).map(|(panel, &g)| VortexElement {
            panel,
            strength: g,
            mirrored: false,
        });
        let strip_offset = mesh.strips().len();
        let images = self.mirror_strengths.iter().flat_map(move |mirror| {
            mesh.panels().zip(mirror.iter()).map(move |(panel, &g)| {
                let mut image = panel.mirrored();
                image.strip += strip_offset;
                VortexElement {
                    panel: image,
                    strength: g,
                    mirrored: true,
                }
            })
        });
        stored.chain(images).collect()
    }

    /// Strips of every vortex returned by `vortices`.
    pub fn expanded_strips(&self, mesh: &PanelMesh) -> Vec<Strip> {
        let mut strips = mesh.strips().to_vec();
        if self.mirror_strengths.is_some() {
            strips.extend(mesh.strips().iter().map(Strip::mirrored));
        }
        strips
    }
}
