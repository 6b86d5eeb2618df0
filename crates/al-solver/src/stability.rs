//! Stability derivatives by forward-difference perturbation.

use al_core::Real;
use al_flight::{FlowState, StateVariable};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::{SolverError, SolverResult};
use crate::lattice::VortexLattice;
use crate::result::{Coefficient, Coefficients};

/// Which variables to perturb and by how much.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilityConfig {
    pub variables: Vec<StateVariable>,
    /// Step applied to alpha and beta, in degrees
    pub angle_step_deg: Real,
    /// Step applied to p, q and r, in rad/s
    pub rate_step: Real,
}

impl Default for StabilityConfig {
    fn default() -> Self {
        Self {
            variables: StateVariable::ALL.to_vec(),
            angle_step_deg: 1e-3,
            rate_step: 1e-3,
        }
    }
}

impl StabilityConfig {
    pub fn validate(&self) -> SolverResult<()> {
        for (name, step) in [
            ("angle_step_deg", self.angle_step_deg),
            ("rate_step", self.rate_step),
        ] {
            if !(step.is_finite() && step > 0.0) {
                return Err(SolverError::Config {
                    what: format!("{} must be > 0, got {}", name, step),
                });
            }
        }
        Ok(())
    }

    pub fn step(&self, variable: StateVariable) -> Real {
        if variable.is_angle() {
            self.angle_step_deg
        } else {
            self.rate_step
        }
    }
}

/// Derivatives keyed by state variable, then coefficient.
///
/// Angles are per radian; rates are per nondimensional rate
/// (p b / 2V, q c / 2V, r b / 2V).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DerivativeTable {
    entries: BTreeMap<StateVariable, BTreeMap<Coefficient, Real>>,
}

impl DerivativeTable {
    pub fn insert(&mut self, variable: StateVariable, coefficient: Coefficient, value: Real) {
        self.entries.entry(variable).or_default().insert(coefficient, value);
    }

    pub fn get(&self, variable: StateVariable, coefficient: Coefficient) -> Option<Real> {
        self.entries.get(&variable)?.get(&coefficient).copied()
    }

    /// Conventional name lookup: `CLa`, `Cmq`, `Cnb`.
    pub fn by_name(&self, name: &str) -> Option<Real> {
        StateVariable::ALL.into_iter().find_map(|v| {
            let coefficient = Coefficient::parse(name.strip_suffix(v.abbreviation())?)?;
            self.get(v, coefficient)
        })
    }

    pub fn variables(&self) -> impl Iterator<Item = StateVariable> + '_ {
        self.entries.keys().copied()
    }

    /// `(name, value)` pairs in variable then coefficient order.
    pub fn named(&self) -> Vec<(String, Real)> {
        self.entries
            .iter()
            .flat_map(|(v, row)| {
                row.iter()
                    .map(move |(c, d)| (format!("{}{}", c.name(), v.abbreviation()), *d))
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilityResult {
    pub derivatives: DerivativeTable,
    /// Reference point moved aft until Cm_alpha vanishes; needs alpha
    pub neutral_point: Option<[Real; 3]>,
    /// (x_np - x_ref) / c_ref
    pub static_margin: Option<Real>,
}

/// Reruns solve-and-integrate at perturbed flow states.
///
/// Each variable is independent and shares the lattice's factored system, so
/// variables are evaluated in parallel. Nothing about the baseline is
/// modified.
pub struct StabilityDerivativeEngine<'a> {
    lattice: &'a VortexLattice,
    config: &'a StabilityConfig,
}

impl<'a> StabilityDerivativeEngine<'a> {
    pub fn new(lattice: &'a VortexLattice, config: &'a StabilityConfig) -> Self {
        Self { lattice, config }
    }

    pub fn derivatives(
        &self,
        flow: &FlowState,
        baseline: &Coefficients,
    ) -> SolverResult<StabilityResult> {
        self.config.validate()?;
        let refs = self.lattice.references();
        let speed = flow.speed();

        let rows: Vec<(StateVariable, Coefficients, Real)> = self
            .config
            .variables
            .par_iter()
            .map(|&variable| {
                let step = self.config.step(variable);
                let perturbed = flow.perturbed(variable, step);
                let result = self
                    .lattice
                    .run(&perturbed)
                    .map_err(|e| SolverError::Perturbation {
                        variable,
                        source: Box::new(e),
                    })?;
                // Step in the unit derivatives are reported per
                let scaled_step = match variable {
                    StateVariable::Alpha | StateVariable::Beta => step.to_radians(),
                    StateVariable::P | StateVariable::R => step * refs.b_ref / (2.0 * speed),
                    StateVariable::Q => step * refs.c_ref / (2.0 * speed),
                };
                Ok((variable, result.coefficients, scaled_step))
            })
            .collect::<SolverResult<_>>()?;

        let mut derivatives = DerivativeTable::default();
        for (variable, perturbed, h) in rows {
            for c in Coefficient::ALL {
                derivatives.insert(variable, c, (perturbed.get(c) - baseline.get(c)) / h);
            }
        }

        let cla = derivatives.get(StateVariable::Alpha, Coefficient::Lift);
        let cma = derivatives.get(StateVariable::Alpha, Coefficient::Pitch);
        let (neutral_point, static_margin) = match (cla, cma) {
            (Some(cla), Some(cma)) if cla.abs() > Real::EPSILON => {
                let [x, y, z] = refs.xyz_ref;
                let x_np = x - cma / cla * refs.c_ref;
                (Some([x_np, y, z]), Some((x_np - x) / refs.c_ref))
            }
            _ => (None, None),
        };

        debug!(
            variables = self.config.variables.len(),
            static_margin = ?static_margin,
            "computed stability derivatives"
        );
        Ok(StabilityResult {
            derivatives,
            neutral_point,
            static_margin,
        })
    }
}
