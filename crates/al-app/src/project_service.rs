//! Project loading and conversion into solver inputs.

use al_core::{deg, kgpm3, mps, radps};
use al_flight::{FlowState, StateVariable};
use al_geometry::{Airplane, AirplaneBuilder, CrossSection, Wing};
use al_project::{AnalysisDef, OperatingPointDef, Project, SpacingDef, WingDef};
use al_solver::{MeshConfig, SolverConfig, Spacing, StabilityConfig, StreamlineConfig};
use std::path::Path;
use tracing::info;

use crate::error::{AppError, AppResult};

/// Summary of a wing for listing.
#[derive(Debug, Clone, serde::Serialize)]
pub struct WingSummary {
    pub name: String,
    pub sections: usize,
    pub symmetric: bool,
    pub span: f64,
    pub area: f64,
    pub aspect_ratio: f64,
}

/// Load a project from a YAML or JSON file (by extension).
pub fn load_project(path: &Path) -> AppResult<Project> {
    let project = al_project::load(path).map_err(|e| AppError::ProjectFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!(name = %project.name, wings = project.airplane.wings.len(), "loaded project");
    Ok(project)
}

/// Validate file-level rules and the geometry built from them.
pub fn validate_project(project: &Project) -> AppResult<()> {
    al_project::validate_project(project)?;
    build_airplane(project)?;
    solver_config(&project.analysis).validate()?;
    Ok(())
}

pub fn list_wings(airplane: &Airplane) -> Vec<WingSummary> {
    airplane
        .wings
        .iter()
        .map(|w| WingSummary {
            name: w.name.clone(),
            sections: w.xsecs.len(),
            symmetric: w.symmetric,
            span: w.span(),
            area: w.area(),
            aspect_ratio: w.aspect_ratio(),
        })
        .collect()
}

fn wing(def: &WingDef) -> Wing {
    let xsecs = (0..def.section_count())
        .map(|i| {
            CrossSection::new(
                [def.x_le[i], def.y_le[i], def.z_le[i]],
                def.chord[i],
                def.twist_at(i),
            )
        })
        .collect();
    Wing::new(def.name.clone(), xsecs, def.symmetric).translate(def.translate)
}

pub fn build_airplane(project: &Project) -> AppResult<Airplane> {
    al_project::validate_project(project)?;
    let def = &project.airplane;
    let mut builder = AirplaneBuilder::new(project.name.clone());
    for w in &def.wings {
        builder.add_wing(wing(w));
    }
    builder.xyz_ref(def.xyz_ref);
    if let Some(s) = def.s_ref {
        builder.s_ref(s);
    }
    if let Some(c) = def.c_ref {
        builder.c_ref(c);
    }
    if let Some(b) = def.b_ref {
        builder.b_ref(b);
    }
    Ok(builder.build()?)
}

pub fn flow_state(op: &OperatingPointDef) -> FlowState {
    FlowState::new(mps(op.velocity), kgpm3(op.density))
        .with_alpha(deg(op.alpha))
        .with_beta(deg(op.beta))
        .with_rates(radps(op.p), radps(op.q), radps(op.r))
}

fn spacing(s: SpacingDef) -> Spacing {
    match s {
        SpacingDef::Uniform => Spacing::Uniform,
        SpacingDef::Cosine => Spacing::Cosine,
    }
}

pub fn solver_config(a: &AnalysisDef) -> SolverConfig {
    SolverConfig {
        mesh: MeshConfig {
            spanwise_resolution: a.spanwise_resolution,
            chordwise_resolution: a.chordwise_resolution,
            spanwise_spacing: spacing(a.spanwise_spacing),
            chordwise_spacing: spacing(a.chordwise_spacing),
            bound_vortex_fraction: a.bound_vortex_fraction,
            collocation_fraction: a.collocation_fraction,
            use_symmetry: a.use_symmetry,
        },
        core_radius: a.core_radius,
        min_pivot_ratio: a.min_pivot_ratio,
        far_field_factor: a.far_field_factor,
    }
}

pub fn stability_config(a: &AnalysisDef) -> AppResult<StabilityConfig> {
    let variables = a
        .stability
        .variables
        .iter()
        .map(|name| {
            StateVariable::parse(name)
                .ok_or_else(|| AppError::InvalidInput(format!("unknown state variable '{}'", name)))
        })
        .collect::<AppResult<Vec<_>>>()?;
    Ok(StabilityConfig {
        variables,
        angle_step_deg: a.stability.angle_step_deg,
        rate_step: a.stability.rate_step,
    })
}

pub fn streamline_config(a: &AnalysisDef) -> StreamlineConfig {
    StreamlineConfig {
        steps: a.streamlines.steps,
        length: a.streamlines.length,
    }
}
