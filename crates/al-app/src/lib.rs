//! Shared application service layer for aerolattice.
//!
//! Turns project files into solver inputs and runs the analyses the CLI
//! exposes: single operating points, alpha sweeps, stability derivatives,
//! streamlines and elliptic-loading comparisons.

pub mod error;
pub mod project_service;
pub mod report;
pub mod run_service;
pub mod theory;

pub use error::{AppError, AppResult};
pub use project_service::{
    WingSummary, build_airplane, flow_state, list_wings, load_project, solver_config,
    stability_config, streamline_config, validate_project,
};
pub use report::{StreamlineReport, SweepReport, SweepRow, result_csv};
pub use run_service::{
    alpha_range, build_lattice, default_seed_rake, run_alpha_sweep, run_elliptic_comparison,
    run_point, run_stability, trace_streamlines,
};
pub use theory::{EllipticComparison, elliptic_comparison};
