//! Project schema definitions.
//!
//! Angles are in degrees, rates in rad/s, everything else SI.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    pub airplane: AirplaneDef,
    pub operating_point: OperatingPointDef,
    #[serde(default)]
    pub analysis: AnalysisDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AirplaneDef {
    #[serde(default)]
    pub xyz_ref: [f64; 3],
    /// Reference area; defaults to the first wing's area
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s_ref: Option<f64>,
    /// Reference chord; defaults to the first wing's mean aerodynamic chord
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c_ref: Option<f64>,
    /// Reference span; defaults to the first wing's span
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b_ref: Option<f64>,
    pub wings: Vec<WingDef>,
}

/// One lifting surface as parallel per-section arrays, root to tip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WingDef {
    pub name: String,
    #[serde(default)]
    pub symmetric: bool,
    pub x_le: Vec<f64>,
    pub y_le: Vec<f64>,
    pub z_le: Vec<f64>,
    pub chord: Vec<f64>,
    /// Degrees; empty means untwisted
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub twist: Vec<f64>,
    #[serde(default)]
    pub translate: [f64; 3],
}

impl WingDef {
    pub fn section_count(&self) -> usize {
        self.x_le.len()
    }

    /// Twist of section `i`, zero when no twist array is given.
    pub fn twist_at(&self, i: usize) -> f64 {
        self.twist.get(i).copied().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OperatingPointDef {
    /// m/s
    pub velocity: f64,
    /// kg/m^3
    #[serde(default = "default_density")]
    pub density: f64,
    #[serde(default)]
    pub alpha: f64,
    #[serde(default)]
    pub beta: f64,
    #[serde(default)]
    pub p: f64,
    #[serde(default)]
    pub q: f64,
    #[serde(default)]
    pub r: f64,
}

fn default_density() -> f64 {
    1.225
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpacingDef {
    Uniform,
    #[default]
    Cosine,
}

/// Solver and post-processing settings. Every field is optional in the file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisDef {
    pub spanwise_resolution: usize,
    pub chordwise_resolution: usize,
    pub spanwise_spacing: SpacingDef,
    pub chordwise_spacing: SpacingDef,
    pub use_symmetry: bool,
    pub bound_vortex_fraction: f64,
    pub collocation_fraction: f64,
    pub core_radius: f64,
    pub min_pivot_ratio: f64,
    pub far_field_factor: f64,
    pub stability: StabilityDef,
    pub streamlines: StreamlinesDef,
}

impl Default for AnalysisDef {
    fn default() -> Self {
        Self {
            spanwise_resolution: 10,
            chordwise_resolution: 10,
            spanwise_spacing: SpacingDef::Cosine,
            chordwise_spacing: SpacingDef::Cosine,
            use_symmetry: true,
            bound_vortex_fraction: 0.25,
            collocation_fraction: 0.75,
            core_radius: 1e-8,
            min_pivot_ratio: 1e-12,
            far_field_factor: 10.0,
            stability: StabilityDef::default(),
            streamlines: StreamlinesDef::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StabilityDef {
    /// Names from `alpha`, `beta`, `p`, `q`, `r`
    pub variables: Vec<String>,
    pub angle_step_deg: f64,
    pub rate_step: f64,
}

pub const STATE_VARIABLE_NAMES: [&str; 5] = ["alpha", "beta", "p", "q", "r"];

impl Default for StabilityDef {
    fn default() -> Self {
        Self {
            variables: STATE_VARIABLE_NAMES.iter().map(|s| s.to_string()).collect(),
            angle_step_deg: 1e-3,
            rate_step: 1e-3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StreamlinesDef {
    pub steps: usize,
    /// Path length; omitted means five reference chords
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    /// Seed points; omitted means a rake upstream of the airplane
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub seeds: Vec<[f64; 3]>,
}

impl Default for StreamlinesDef {
    fn default() -> Self {
        Self {
            steps: 100,
            length: None,
            seeds: Vec::new(),
        }
    }
}
