//! Geometry-specific error types.

use thiserror::Error;

/// Geometry construction and validation errors.
///
/// Every variant names the wing and, where it applies, the cross-section
/// index so a caller can point at the offending input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A wing needs at least a root and a tip section.
    #[error("Wing '{wing}' has {count} cross sections (need at least 2)")]
    TooFewSections { wing: String, count: usize },

    /// A chord is zero, negative, or not finite.
    #[error("Wing '{wing}' section {section} has non-positive chord {chord}")]
    NonPositiveChord {
        wing: String,
        section: usize,
        chord: f64,
    },

    /// A coordinate or twist is NaN/inf.
    #[error("Wing '{wing}' section {section} has non-finite {what}")]
    NonFinite {
        wing: String,
        section: usize,
        what: &'static str,
    },

    /// Span stations do not advance monotonically from this section to the next.
    #[error("Wing '{wing}' sections {section} and {} are not in spanwise order", .section + 1)]
    SectionsOutOfOrder { wing: String, section: usize },

    /// A mirrored wing has a section on the far side of the y = 0 plane.
    #[error("Symmetric wing '{wing}' section {section} lies at negative y")]
    CrossesSymmetryPlane { wing: String, section: usize },

    #[error("Airplane has no wings")]
    NoWings,

    /// Reference quantity is zero, negative, or not finite.
    #[error("Invalid reference {what}: {value}")]
    InvalidReference { what: &'static str, value: f64 },
}

pub type GeometryResult<T> = Result<T, GeometryError>;
