//! Analysis runs over a loaded project.

use al_geometry::Airplane;
use al_project::Project;
use al_solver::{AeroResult, Solution, VortexLattice};
use nalgebra::Vector3;
use std::time::Instant;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::project_service::{
    build_airplane, flow_state, solver_config, stability_config, streamline_config,
};
use crate::report::{StreamlineReport, SweepReport, SweepRow};
use crate::theory::{EllipticComparison, elliptic_comparison};

/// Seeds in the default upstream rake.
pub const DEFAULT_RAKE_SEEDS: usize = 11;

/// Mesh, assemble and factor the project's airplane.
pub fn build_lattice(project: &Project) -> AppResult<VortexLattice> {
    let airplane = build_airplane(project)?;
    Ok(VortexLattice::new(&airplane, solver_config(&project.analysis))?)
}

/// Forces and coefficients at the project's operating point.
pub fn run_point(project: &Project) -> AppResult<AeroResult> {
    let lattice = build_lattice(project)?;
    let started = Instant::now();
    let result = lattice.run(&flow_state(&project.operating_point))?;
    info!(
        CL = result.coefficients.lift,
        CD = result.coefficients.drag,
        elapsed_ms = started.elapsed().as_secs_f64() * 1e3,
        "solved operating point"
    );
    Ok(result)
}

/// `count` evenly spaced angles from `from` to `to` inclusive (deg).
pub fn alpha_range(from: f64, to: f64, count: usize) -> AppResult<Vec<f64>> {
    if !(from.is_finite() && to.is_finite()) {
        return Err(AppError::InvalidInput("sweep bounds must be finite".to_string()));
    }
    match count {
        0 => Err(AppError::InvalidInput(
            "sweep needs at least one point".to_string(),
        )),
        1 => Ok(vec![from]),
        n => Ok((0..n)
            .map(|i| from + (to - from) * i as f64 / (n - 1) as f64)
            .collect()),
    }
}

/// Operating point with alpha replaced by each entry of `alphas` (deg). The
/// lattice is factored once and reused.
pub fn run_alpha_sweep(project: &Project, alphas: &[f64]) -> AppResult<SweepReport> {
    let lattice = build_lattice(project)?;
    let base = project.operating_point.clone();
    let rows = alphas
        .iter()
        .map(|&alpha| {
            let mut op = base.clone();
            op.alpha = alpha;
            let result = lattice.run(&flow_state(&op))?;
            Ok(SweepRow::new(alpha, &result))
        })
        .collect::<AppResult<Vec<_>>>()?;
    info!(points = rows.len(), "alpha sweep complete");
    Ok(SweepReport {
        name: project.name.clone(),
        rows,
    })
}

/// Operating point results plus stability derivatives.
pub fn run_stability(project: &Project) -> AppResult<AeroResult> {
    let lattice = build_lattice(project)?;
    let config = stability_config(&project.analysis)?;
    Ok(lattice.run_with_stability_derivatives(&flow_state(&project.operating_point), &config)?)
}

/// Rake of seeds one reference chord ahead of the airplane, spread across
/// the span at mid height.
pub fn default_seed_rake(airplane: &Airplane, count: usize) -> Vec<Vector3<f64>> {
    let (lo, hi) = airplane.bounding_box();
    let x = lo.x - airplane.references.c_ref;
    let z = 0.5 * (lo.z + hi.z);
    match count {
        0 => Vec::new(),
        1 => vec![Vector3::new(x, 0.5 * (lo.y + hi.y), z)],
        n => (0..n)
            .map(|i| {
                let t = i as f64 / (n - 1) as f64;
                Vector3::new(x, lo.y + (hi.y - lo.y) * t, z)
            })
            .collect(),
    }
}

/// Streamlines from `seeds`, or from the project's seeds, or from the
/// default rake, in that order of preference.
pub fn trace_streamlines(
    project: &Project,
    seeds: Option<&[Vector3<f64>]>,
) -> AppResult<StreamlineReport> {
    let airplane = build_airplane(project)?;
    let lattice = VortexLattice::new(&airplane, solver_config(&project.analysis))?;
    let flow = flow_state(&project.operating_point);
    let solution: Solution = lattice.solve(&flow)?;

    let configured: Vec<Vector3<f64>> = project
        .analysis
        .streamlines
        .seeds
        .iter()
        .map(|s| Vector3::from(*s))
        .collect();
    let seeds: Vec<Vector3<f64>> = match seeds {
        Some(s) => s.to_vec(),
        None if !configured.is_empty() => configured,
        None => default_seed_rake(&airplane, DEFAULT_RAKE_SEEDS),
    };

    let config = streamline_config(&project.analysis);
    let lines = lattice.trace_streamlines(&flow, &solution, &seeds, &config)?;
    Ok(StreamlineReport {
        name: project.name.clone(),
        steps: config.steps,
        lines: lines
            .into_iter()
            .map(|l| l.into_iter().map(Into::into).collect())
            .collect(),
    })
}

/// Compare the lattice's induced drag with elliptic loading at the same lift.
/// The aspect ratio comes from the reference span and area.
pub fn run_elliptic_comparison(project: &Project) -> AppResult<EllipticComparison> {
    let airplane = build_airplane(project)?;
    let lattice = VortexLattice::new(&airplane, solver_config(&project.analysis))?;
    let result = lattice.run(&flow_state(&project.operating_point))?;
    let refs = airplane.references;
    let aspect_ratio = refs.b_ref * refs.b_ref / refs.s_ref;
    elliptic_comparison(result.coefficients.lift, result.coefficients.drag, aspect_ratio)
}
