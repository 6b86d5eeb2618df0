//! Error types for the al-app service layer.

use std::path::PathBuf;

/// Application error wrapping the backend crates' errors for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to read project file: {path}")]
    ProjectFileRead {
        path: PathBuf,
        source: al_project::ProjectError,
    },

    #[error("Invalid geometry: {0}")]
    Geometry(String),

    #[error("Solver error: {0}")]
    Solver(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for al-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<al_project::ProjectError> for AppError {
    fn from(err: al_project::ProjectError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<al_project::ValidationError> for AppError {
    fn from(err: al_project::ValidationError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<al_geometry::GeometryError> for AppError {
    fn from(err: al_geometry::GeometryError) -> Self {
        AppError::Geometry(err.to_string())
    }
}

impl From<al_solver::SolverError> for AppError {
    fn from(err: al_solver::SolverError) -> Self {
        AppError::Solver(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}
