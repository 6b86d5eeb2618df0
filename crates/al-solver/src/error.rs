//! Error types for solver operations.

use al_core::PanelId;
use al_flight::{FlightError, StateVariable};
use al_geometry::GeometryError;
use thiserror::Error;

/// Errors that can occur while meshing, assembling or solving.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Invalid geometry: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Invalid flight condition: {0}")]
    Flight(#[from] FlightError),

    #[error("Invalid configuration: {what}")]
    Config { what: String },

    #[error("Degenerate panel {panel}: {what}")]
    DegeneratePanel { panel: PanelId, what: String },

    #[error("Panels {first} and {second} share a collocation point")]
    DuplicatePanels { first: PanelId, second: PanelId },

    #[error("Singular influence system at panel {panel}: {what}")]
    SingularSystem { panel: PanelId, what: String },

    #[error("Non-finite value in {what}")]
    NonFinite { what: String },

    #[error("Invalid query: {what}")]
    InvalidQuery { what: String },

    #[error("Perturbation of {variable} failed: {source}")]
    Perturbation {
        variable: StateVariable,
        #[source]
        source: Box<SolverError>,
    },
}

pub type SolverResult<T> = Result<T, SolverError>;
