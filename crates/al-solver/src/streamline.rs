//! Fixed-step streamline tracing.

use al_core::Real;
use nalgebra::Vector3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{SolverError, SolverResult};
use crate::flowfield::FlowFieldQuery;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamlineConfig {
    /// Points per streamline, seed included (at least 2)
    pub steps: usize,
    /// Path length of each streamline; `None` uses five reference chords
    pub length: Option<Real>,
}

impl Default for StreamlineConfig {
    fn default() -> Self {
        Self {
            steps: 100,
            length: None,
        }
    }
}

/// Forward-Euler advection through a `FlowFieldQuery`.
///
/// Every step moves exactly `length / (steps - 1)` along the local velocity
/// direction, so each streamline has `steps` points and the given path
/// length. A point with zero velocity stays put. Streamlines are not
/// stopped at surfaces.
pub struct StreamlineIntegrator<'a> {
    field: &'a FlowFieldQuery,
    steps: usize,
    length: Real,
}

impl<'a> StreamlineIntegrator<'a> {
    pub fn new(field: &'a FlowFieldQuery, steps: usize, length: Real) -> SolverResult<Self> {
        if steps < 2 {
            return Err(SolverError::InvalidQuery {
                what: format!("streamlines need at least 2 steps, got {}", steps),
            });
        }
        if !(length.is_finite() && length > 0.0) {
            return Err(SolverError::InvalidQuery {
                what: format!("streamline length must be > 0, got {}", length),
            });
        }
        Ok(Self {
            field,
            steps,
            length,
        })
    }

    pub fn step_length(&self) -> Real {
        self.length / (self.steps - 1) as Real
    }

    pub fn trace(&self, seed: &Vector3<Real>) -> Vec<Vector3<Real>> {
        let ds = self.step_length();
        let mut points = Vec::with_capacity(self.steps);
        let mut p = *seed;
        points.push(p);
        for _ in 1..self.steps {
            let v = self.field.total_velocity(&p);
            let speed = v.norm();
            if speed > 0.0 && speed.is_finite() {
                p += v * (ds / speed);
            }
            points.push(p);
        }
        points
    }

    pub fn trace_all(&self, seeds: &[Vector3<Real>]) -> Vec<Vec<Vector3<Real>>> {
        seeds.par_iter().map(|s| self.trace(s)).collect()
    }
}
