//! Serializable reports and their CSV renderings.

use al_solver::{AeroResult, Coefficient};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepRow {
    /// deg
    pub alpha: f64,
    #[serde(rename = "CL")]
    pub cl: f64,
    #[serde(rename = "CD")]
    pub cd: f64,
    #[serde(rename = "CY")]
    pub cy: f64,
    #[serde(rename = "Cl")]
    pub c_roll: f64,
    #[serde(rename = "Cm")]
    pub cm: f64,
    #[serde(rename = "Cn")]
    pub cn: f64,
}

impl SweepRow {
    pub fn new(alpha: f64, result: &AeroResult) -> Self {
        let c = &result.coefficients;
        Self {
            alpha,
            cl: c.lift,
            cd: c.drag,
            cy: c.side,
            c_roll: c.roll,
            cm: c.pitch,
            cn: c.yaw,
        }
    }

    /// Lift-to-drag ratio; `None` when drag vanishes.
    pub fn lift_to_drag(&self) -> Option<f64> {
        (self.cd.abs() > f64::EPSILON).then(|| self.cl / self.cd)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepReport {
    pub name: String,
    pub rows: Vec<SweepRow>,
}

impl SweepReport {
    pub fn to_csv(&self) -> String {
        let mut csv = String::from("alpha_deg,CL,CD,CY,Cl,Cm,Cn\n");
        for r in &self.rows {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                r.alpha, r.cl, r.cd, r.cy, r.c_roll, r.cm, r.cn
            ));
        }
        csv
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamlineReport {
    pub name: String,
    pub steps: usize,
    pub lines: Vec<Vec<[f64; 3]>>,
}

impl StreamlineReport {
    pub fn to_csv(&self) -> String {
        let mut csv = String::from("line,point,x,y,z\n");
        for (l, line) in self.lines.iter().enumerate() {
            for (k, [x, y, z]) in line.iter().enumerate() {
                csv.push_str(&format!("{},{},{},{},{}\n", l, k, x, y, z));
            }
        }
        csv
    }
}

/// `name,value` rows: coefficients, forces, then any derivatives.
pub fn result_csv(result: &AeroResult) -> String {
    let mut csv = String::from("name,value\n");
    for c in Coefficient::ALL {
        csv.push_str(&format!("{},{}\n", c, result.coefficients.get(c)));
    }
    for (name, v) in [
        ("L", result.lift),
        ("D", result.drag),
        ("Y", result.side_force),
        ("q", result.dynamic_pressure),
    ] {
        csv.push_str(&format!("{},{}\n", name, v));
    }
    if let Some(stability) = &result.stability {
        for (name, v) in stability.derivatives.named() {
            csv.push_str(&format!("{},{}\n", name, v));
        }
        if let Some(sm) = stability.static_margin {
            csv.push_str(&format!("static_margin,{}\n", sm));
        }
        if let Some([x, _, _]) = stability.neutral_point {
            csv.push_str(&format!("x_np,{}\n", x));
        }
    }
    csv
}
