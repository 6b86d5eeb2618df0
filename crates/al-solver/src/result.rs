//! Aerodynamic results.

use al_core::{PanelId, Real, WingId};
use al_flight::Axes;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::stability::StabilityResult;

/// Nondimensional force or moment coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Coefficient {
    #[serde(rename = "CL")]
    Lift,
    #[serde(rename = "CD")]
    Drag,
    #[serde(rename = "CY")]
    Side,
    #[serde(rename = "Cl")]
    Roll,
    #[serde(rename = "Cm")]
    Pitch,
    #[serde(rename = "Cn")]
    Yaw,
}

impl Coefficient {
    pub const ALL: [Coefficient; 6] = [
        Coefficient::Lift,
        Coefficient::Drag,
        Coefficient::Side,
        Coefficient::Roll,
        Coefficient::Pitch,
        Coefficient::Yaw,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Coefficient::Lift => "CL",
            Coefficient::Drag => "CD",
            Coefficient::Side => "CY",
            Coefficient::Roll => "Cl",
            Coefficient::Pitch => "Cm",
            Coefficient::Yaw => "Cn",
        }
    }

    /// Case-sensitive: `Cl` (roll) and `CL` (lift) differ.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == s)
    }
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Force and moment vectors in one axis frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisLoads {
    /// N
    pub force: [Real; 3],
    /// N m, about the moment reference point
    pub moment: [Real; 3],
}

impl AxisLoads {
    pub fn new(force: Vector3<Real>, moment: Vector3<Real>) -> Self {
        Self {
            force: force.into(),
            moment: moment.into(),
        }
    }

    pub fn force_vector(&self) -> Vector3<Real> {
        Vector3::from(self.force)
    }

    pub fn moment_vector(&self) -> Vector3<Real> {
        Vector3::from(self.moment)
    }
}

/// Wind-axis force coefficients and body-axis moment coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coefficients {
    #[serde(rename = "CL")]
    pub lift: Real,
    #[serde(rename = "CD")]
    pub drag: Real,
    #[serde(rename = "CY")]
    pub side: Real,
    #[serde(rename = "Cl")]
    pub roll: Real,
    #[serde(rename = "Cm")]
    pub pitch: Real,
    #[serde(rename = "Cn")]
    pub yaw: Real,
}

impl Coefficients {
    pub fn get(&self, c: Coefficient) -> Real {
        match c {
            Coefficient::Lift => self.lift,
            Coefficient::Drag => self.drag,
            Coefficient::Side => self.side,
            Coefficient::Roll => self.roll,
            Coefficient::Pitch => self.pitch,
            Coefficient::Yaw => self.yaw,
        }
    }
}

/// Kutta-Joukowski force on a single vortex, geometry axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelForce {
    pub panel: PanelId,
    /// Implied left-half image of a stored panel
    pub mirrored: bool,
    pub circulation: Real,
    pub force: [Real; 3],
    /// Normal force over dynamic pressure and panel area
    pub delta_cp: Real,
}

/// Loading of one spanwise strip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StripLoad {
    pub wing: WingId,
    pub y: Real,
    pub z: Real,
    pub chord: Real,
    pub width: Real,
    /// Sum of the chordwise panel circulations
    pub circulation: Real,
    /// Sectional lift coefficient 2 Gamma / (V c)
    pub cl: Real,
}

/// Strip loads of every wing, sorted by wing then y.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpanLoading {
    pub strips: Vec<StripLoad>,
}

impl SpanLoading {
    pub fn for_wing(&self, wing: WingId) -> impl Iterator<Item = &StripLoad> {
        self.strips.iter().filter(move |s| s.wing == wing)
    }
}

/// Result of one analysis at one flow state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AeroResult {
    /// Total force and moment in each axis frame
    pub loads: BTreeMap<Axes, AxisLoads>,
    pub coefficients: Coefficients,
    /// Lift, drag and side force in N (wind axes)
    pub lift: Real,
    pub drag: Real,
    pub side_force: Real,
    pub dynamic_pressure: Real,
    pub panel_forces: Vec<PanelForce>,
    pub span_loading: SpanLoading,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stability: Option<StabilityResult>,
}

impl AeroResult {
    pub fn loads(&self, axes: Axes) -> Option<&AxisLoads> {
        self.loads.get(&axes)
    }

    /// Look a scalar up by name: coefficients (`CL`, `Cm`), dimensional
    /// forces (`L`, `D`, `Y`, `q`), or derivatives (`CLa`, `Cnb`).
    pub fn get(&self, name: &str) -> Option<Real> {
        if let Some(c) = Coefficient::parse(name) {
            return Some(self.coefficients.get(c));
        }
        match name {
            "L" => Some(self.lift),
            "D" => Some(self.drag),
            "Y" => Some(self.side_force),
            "q" => Some(self.dynamic_pressure),
            _ => self.stability.as_ref().and_then(|s| s.derivatives.by_name(name)),
        }
    }
}
