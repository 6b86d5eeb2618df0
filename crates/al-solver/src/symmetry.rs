//! Symmetry strategies for the influence system.
//!
//! An explicit mesh is solved as a single direct block. A symmetry-reduced
//! mesh stores the right half only; its left half is the mirror image of each
//! stored horseshoe. Any flow splits into a part that is symmetric about
//! y = 0 and a part that is antisymmetric, so the reduced system is solved
//! twice: once with images of equal strength (`D + M`) and once with images
//! of opposite strength (`D - M`). Both strategies feed the same downstream
//! force and flow-field code through `Solution::vortices`.

use al_core::Real;
use nalgebra::Vector3;
use std::fmt;

use crate::kernel::{Horseshoe, mirror_y};
use crate::mesh::PanelMesh;

/// One independent block of the influence system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymmetryMode {
    /// No images: the matrix couples stored panels only.
    Direct,
    /// Images carry the same strength as their panel.
    Symmetric,
    /// Images carry the opposite strength.
    Antisymmetric,
}

impl SymmetryMode {
    /// Factor applied to an image's strength in this mode.
    pub fn image_sign(self) -> Real {
        match self {
            SymmetryMode::Direct => 0.0,
            SymmetryMode::Symmetric => 1.0,
            SymmetryMode::Antisymmetric => -1.0,
        }
    }
}

/// How mirror images enter the influence system.
pub trait SymmetryStrategy: Send + Sync + fmt::Debug {
    fn name(&self) -> &'static str;

    /// Blocks that must be assembled and solved.
    fn modes(&self) -> &'static [SymmetryMode];

    /// Mirror image of a stored horseshoe, if this strategy implies one.
    fn image(&self, hs: &Horseshoe) -> Option<Horseshoe>;

    /// Mirror image of a collocation point and its normal.
    fn image_point(
        &self,
        point: &Vector3<Real>,
        normal: &Vector3<Real>,
    ) -> Option<(Vector3<Real>, Vector3<Real>)>;
}

/// Every panel is stored; no images.
#[derive(Debug, Clone, Copy, Default)]
pub struct Explicit;

impl SymmetryStrategy for Explicit {
    fn name(&self) -> &'static str {
        "explicit"
    }

    fn modes(&self) -> &'static [SymmetryMode] {
        &[SymmetryMode::Direct]
    }

    fn image(&self, _hs: &Horseshoe) -> Option<Horseshoe> {
        None
    }

    fn image_point(
        &self,
        _point: &Vector3<Real>,
        _normal: &Vector3<Real>,
    ) -> Option<(Vector3<Real>, Vector3<Real>)> {
        None
    }
}

/// Right half stored; left half is the reflection across the x-z plane.
#[derive(Debug, Clone, Copy, Default)]
pub struct MirrorXZ;

impl SymmetryStrategy for MirrorXZ {
    fn name(&self) -> &'static str {
        "mirror-xz"
    }

    fn modes(&self) -> &'static [SymmetryMode] {
        &[SymmetryMode::Symmetric, SymmetryMode::Antisymmetric]
    }

    fn image(&self, hs: &Horseshoe) -> Option<Horseshoe> {
        Some(hs.mirrored())
    }

    fn image_point(
        &self,
        point: &Vector3<Real>,
        normal: &Vector3<Real>,
    ) -> Option<(Vector3<Real>, Vector3<Real>)> {
        Some((mirror_y(point), mirror_y(normal)))
    }
}

/// Strategy matching how `mesh` was stored.
pub fn for_mesh(mesh: &PanelMesh) -> Box<dyn SymmetryStrategy> {
    if mesh.is_symmetric() {
        Box::new(MirrorXZ)
    } else {
        Box::new(Explicit)
    }
}
