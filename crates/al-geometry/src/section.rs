//! Wing cross sections.

use al_core::Real;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// One spanwise station of a wing.
///
/// Coordinates are geometry axes: x aft, y right, z up. `twist_deg` is a
/// nose-up rotation of the section about its leading edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossSection {
    pub xyz_le: [Real; 3],
    pub chord: Real,
    #[serde(default)]
    pub twist_deg: Real,
}

impl CrossSection {
    pub fn new(xyz_le: [Real; 3], chord: Real, twist_deg: Real) -> Self {
        Self {
            xyz_le,
            chord,
            twist_deg,
        }
    }

    pub fn le(&self) -> Vector3<Real> {
        Vector3::from(self.xyz_le)
    }

    pub fn translated(&self, offset: [Real; 3]) -> Self {
        let [x, y, z] = self.xyz_le;
        Self {
            xyz_le: [x + offset[0], y + offset[1], z + offset[2]],
            ..*self
        }
    }
}

/// Leading and trailing edge of a section after twist has been applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionFrame {
    pub le: Vector3<Real>,
    pub te: Vector3<Real>,
}

impl SectionFrame {
    /// Point at `chord_fraction` (0 = LE, 1 = TE) along the twisted chord line.
    pub fn at(&self, chord_fraction: Real) -> Vector3<Real> {
        self.le + (self.te - self.le) * chord_fraction
    }
}
