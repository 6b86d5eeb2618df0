//! Project validation logic.

use crate::schema::{
    AirplaneDef, AnalysisDef, OperatingPointDef, Project, STATE_VARIABLE_NAMES, WingDef,
};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error(
        "Mismatched section arrays in wing '{wing}': {field} has {found} entries, expected {expected}"
    )]
    MismatchedLengths {
        wing: String,
        field: String,
        expected: usize,
        found: usize,
    },

    #[error("Missing: {what}")]
    Missing { what: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: impl Into<String>, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, v: f64) -> Result<(), ValidationError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, v, "must be positive"))
    }
}

fn finite(field: &str, v: f64) -> Result<(), ValidationError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, v, "must be finite"))
    }
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }
    validate_airplane(&project.airplane)?;
    validate_operating_point(&project.operating_point)?;
    validate_analysis(&project.analysis)?;
    Ok(())
}

fn validate_airplane(airplane: &AirplaneDef) -> Result<(), ValidationError> {
    if airplane.wings.is_empty() {
        return Err(ValidationError::Missing {
            what: "airplane has no wings".to_string(),
        });
    }

    let mut names = HashSet::new();
    for wing in &airplane.wings {
        if !names.insert(&wing.name) {
            return Err(ValidationError::DuplicateId {
                id: wing.name.clone(),
                context: "wings".to_string(),
            });
        }
        validate_wing(wing)?;
    }

    for (i, v) in airplane.xyz_ref.iter().enumerate() {
        finite(&format!("xyz_ref[{}]", i), *v)?;
    }
    for (field, v) in [
        ("s_ref", airplane.s_ref),
        ("c_ref", airplane.c_ref),
        ("b_ref", airplane.b_ref),
    ] {
        if let Some(v) = v {
            positive(field, v)?;
        }
    }
    Ok(())
}

fn validate_wing(wing: &WingDef) -> Result<(), ValidationError> {
    let n = wing.section_count();
    if n < 2 {
        return Err(invalid(
            format!("wings.{}.x_le", wing.name),
            n,
            "at least two sections are required",
        ));
    }

    let mut arrays = vec![
        ("y_le", &wing.y_le),
        ("z_le", &wing.z_le),
        ("chord", &wing.chord),
    ];
    if !wing.twist.is_empty() {
        arrays.push(("twist", &wing.twist));
    }
    for (field, values) in &arrays {
        if values.len() != n {
            return Err(ValidationError::MismatchedLengths {
                wing: wing.name.clone(),
                field: field.to_string(),
                expected: n,
                found: values.len(),
            });
        }
    }

    arrays.push(("x_le", &wing.x_le));
    for (field, values) in &arrays {
        for (i, v) in values.iter().enumerate() {
            finite(&format!("wings.{}.{}[{}]", wing.name, field, i), *v)?;
        }
    }
    for (i, c) in wing.chord.iter().enumerate() {
        positive(&format!("wings.{}.chord[{}]", wing.name, i), *c)?;
    }
    for (i, v) in wing.translate.iter().enumerate() {
        finite(&format!("wings.{}.translate[{}]", wing.name, i), *v)?;
    }
    Ok(())
}

fn validate_operating_point(op: &OperatingPointDef) -> Result<(), ValidationError> {
    positive("operating_point.velocity", op.velocity)?;
    positive("operating_point.density", op.density)?;
    for (field, v) in [
        ("operating_point.alpha", op.alpha),
        ("operating_point.beta", op.beta),
        ("operating_point.p", op.p),
        ("operating_point.q", op.q),
        ("operating_point.r", op.r),
    ] {
        finite(field, v)?;
    }
    Ok(())
}

fn validate_analysis(a: &AnalysisDef) -> Result<(), ValidationError> {
    for (field, v) in [
        ("analysis.spanwise_resolution", a.spanwise_resolution),
        ("analysis.chordwise_resolution", a.chordwise_resolution),
    ] {
        if v == 0 {
            return Err(invalid(field, v, "must be at least 1"));
        }
    }
    for (field, v) in [
        ("analysis.bound_vortex_fraction", a.bound_vortex_fraction),
        ("analysis.collocation_fraction", a.collocation_fraction),
    ] {
        if !(v.is_finite() && v > 0.0 && v < 1.0) {
            return Err(invalid(field, v, "must lie in (0, 1)"));
        }
    }
    if a.collocation_fraction <= a.bound_vortex_fraction {
        return Err(invalid(
            "analysis.collocation_fraction",
            a.collocation_fraction,
            "must lie aft of bound_vortex_fraction",
        ));
    }
    for (field, v) in [
        ("analysis.core_radius", a.core_radius),
        ("analysis.min_pivot_ratio", a.min_pivot_ratio),
    ] {
        if !(v.is_finite() && v >= 0.0) {
            return Err(invalid(field, v, "must be non-negative"));
        }
    }
    positive("analysis.far_field_factor", a.far_field_factor)?;

    let mut seen = HashSet::new();
    for name in &a.stability.variables {
        if !STATE_VARIABLE_NAMES.contains(&name.as_str()) {
            return Err(invalid(
                "analysis.stability.variables",
                name,
                "expected one of alpha, beta, p, q, r",
            ));
        }
        if !seen.insert(name) {
            return Err(ValidationError::DuplicateId {
                id: name.clone(),
                context: "analysis.stability.variables".to_string(),
            });
        }
    }
    positive("analysis.stability.angle_step_deg", a.stability.angle_step_deg)?;
    positive("analysis.stability.rate_step", a.stability.rate_step)?;

    if a.streamlines.steps < 2 {
        return Err(invalid(
            "analysis.streamlines.steps",
            a.streamlines.steps,
            "must be at least 2",
        ));
    }
    if let Some(length) = a.streamlines.length {
        positive("analysis.streamlines.length", length)?;
    }
    for (i, seed) in a.streamlines.seeds.iter().enumerate() {
        for v in seed {
            finite(&format!("analysis.streamlines.seeds[{}]", i), *v)?;
        }
    }
    Ok(())
}
