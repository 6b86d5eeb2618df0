//! Solver and mesh configuration.

use al_core::Real;
use al_core::numeric::{cosspace_unit, linspace_unit};
use serde::{Deserialize, Serialize};

use crate::error::{SolverError, SolverResult};

/// Distribution of panel edges along a span or chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    Uniform,
    /// Clustered at both ends (half-cosine).
    #[default]
    Cosine,
}

impl Spacing {
    /// `panels + 1` edge fractions in [0, 1].
    pub fn fractions(self, panels: usize) -> Vec<Real> {
        match self {
            Spacing::Uniform => linspace_unit(panels + 1),
            Spacing::Cosine => cosspace_unit(panels + 1),
        }
    }
}

/// How lifting surfaces are cut into panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// Spanwise panels between each pair of adjacent cross sections
    pub spanwise_resolution: usize,
    /// Chordwise panels per strip
    pub chordwise_resolution: usize,
    pub spanwise_spacing: Spacing,
    pub chordwise_spacing: Spacing,
    /// Bound vortex position as a fraction of panel chord
    pub bound_vortex_fraction: Real,
    /// Collocation point position as a fraction of panel chord
    pub collocation_fraction: Real,
    /// Store only the right half of a mirror-symmetric airplane
    pub use_symmetry: bool,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            spanwise_resolution: 10,
            chordwise_resolution: 10,
            spanwise_spacing: Spacing::Cosine,
            chordwise_spacing: Spacing::Cosine,
            bound_vortex_fraction: 0.25,
            collocation_fraction: 0.75,
            use_symmetry: true,
        }
    }
}

/// Solver configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub mesh: MeshConfig,
    /// Vortex core radius (geometry length units) regularizing the
    /// Biot-Savart kernel near filaments
    pub core_radius: Real,
    /// Smallest accepted |pivot| relative to the largest in the LU factor
    pub min_pivot_ratio: Real,
    /// Query points farther than this many reference spans from the
    /// geometry are flagged as extrapolation
    pub far_field_factor: Real,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            mesh: MeshConfig::default(),
            core_radius: 1e-8,
            min_pivot_ratio: 1e-12,
            far_field_factor: 10.0,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> SolverResult<()> {
        let m = &self.mesh;
        if m.spanwise_resolution == 0 || m.chordwise_resolution == 0 {
            return Err(SolverError::Config {
                what: format!(
                    "resolutions must be at least 1 (spanwise={}, chordwise={})",
                    m.spanwise_resolution, m.chordwise_resolution
                ),
            });
        }
        for (name, f) in [
            ("bound_vortex_fraction", m.bound_vortex_fraction),
            ("collocation_fraction", m.collocation_fraction),
        ] {
            if !(f.is_finite() && f > 0.0 && f < 1.0) {
                return Err(SolverError::Config {
                    what: format!("{} must lie in (0, 1), got {}", name, f),
                });
            }
        }
        if m.collocation_fraction <= m.bound_vortex_fraction {
            return Err(SolverError::Config {
                what: "collocation point must lie aft of the bound vortex".to_string(),
            });
        }
        if !(self.core_radius.is_finite() && self.core_radius >= 0.0) {
            return Err(SolverError::Config {
                what: format!("core_radius must be >= 0, got {}", self.core_radius),
            });
        }
        if !(self.min_pivot_ratio.is_finite() && self.min_pivot_ratio >= 0.0) {
            return Err(SolverError::Config {
                what: format!("min_pivot_ratio must be >= 0, got {}", self.min_pivot_ratio),
            });
        }
        if !(self.far_field_factor.is_finite() && self.far_field_factor > 0.0) {
            return Err(SolverError::Config {
                what: format!("far_field_factor must be > 0, got {}", self.far_field_factor),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(SolverConfig::default().validate().is_ok());
    }

    #[test]
    fn collocation_ahead_of_bound_is_rejected() {
        let mut cfg = SolverConfig::default();
        cfg.mesh.collocation_fraction = 0.2;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("aft of the bound vortex"));
    }

    #[test]
    fn spacing_fraction_counts() {
        assert_eq!(Spacing::Uniform.fractions(4).len(), 5);
        assert_eq!(Spacing::Cosine.fractions(1), vec![0.0, 1.0]);
    }
}
