//! Lifting-line theory comparisons.

use serde::Serialize;
use std::f64::consts::PI;

use crate::error::{AppError, AppResult};

/// Induced drag of a lattice solution against an elliptically loaded wing of
/// the same aspect ratio and lift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EllipticComparison {
    pub aspect_ratio: f64,
    #[serde(rename = "CL")]
    pub cl: f64,
    /// Induced drag from the lattice
    #[serde(rename = "CDi")]
    pub cdi: f64,
    /// CL^2 / (pi AR)
    #[serde(rename = "CDi_elliptic")]
    pub cdi_elliptic: f64,
    /// CL^2 / (pi AR CDi); 1 for elliptic loading
    pub span_efficiency: f64,
}

pub fn elliptic_comparison(cl: f64, cdi: f64, aspect_ratio: f64) -> AppResult<EllipticComparison> {
    if !(aspect_ratio.is_finite() && aspect_ratio > 0.0) {
        return Err(AppError::InvalidInput(format!(
            "aspect ratio must be positive, got {}",
            aspect_ratio
        )));
    }
    if !(cdi.is_finite() && cdi > 0.0) {
        return Err(AppError::InvalidInput(format!(
            "induced drag must be positive for a span efficiency, got {}",
            cdi
        )));
    }
    let ideal = cl * cl / (PI * aspect_ratio);
    Ok(EllipticComparison {
        aspect_ratio,
        cl,
        cdi,
        cdi_elliptic: ideal,
        span_efficiency: ideal / cdi,
    })
}
