//! Vortex-lattice aerodynamics.
//!
//! Pipeline, leaf first:
//!
//! - [`PanelMesh`]: lifting surfaces cut into horseshoe-vortex panels
//! - [`InfluenceAssembler`]: dense normal-projected Biot-Savart matrix
//! - [`BoundaryConditionSolver`]: flow tangency solved for circulation
//! - [`ForceMomentIntegrator`]: Kutta-Joukowski forces and coefficients
//! - [`StabilityDerivativeEngine`]: finite-difference derivatives
//! - [`FlowFieldQuery`] and [`StreamlineIntegrator`]: off-body velocity
//!
//! [`VortexLattice`] wires them together for one airplane.
//!
//! ```no_run
//! use al_core::{deg, kgpm3, mps};
//! use al_flight::FlowState;
//! use al_geometry::{AirplaneBuilder, CrossSection, Wing};
//! use al_solver::{SolverConfig, VortexLattice};
//!
//! let mut builder = AirplaneBuilder::new("rect");
//! builder.add_wing(Wing::new(
//!     "main",
//!     vec![
//!         CrossSection::new([0.0, 0.0, 0.0], 1.0, 0.0),
//!         CrossSection::new([0.0, 5.0, 0.0], 1.0, 0.0),
//!     ],
//!     true,
//! ));
//! let airplane = builder.build()?;
//! let lattice = VortexLattice::new(&airplane, SolverConfig::default())?;
//! let flow = FlowState::new(mps(100.0), kgpm3(1.225)).with_alpha(deg(5.0));
//! let result = lattice.run(&flow)?;
//! println!("CL = {:.4}", result.coefficients.lift);
//! # Ok::<(), al_solver::SolverError>(())
//! ```

pub mod boundary;
pub mod config;
pub mod error;
pub mod flowfield;
pub mod forces;
pub mod influence;
pub mod kernel;
pub mod lattice;
pub mod mesh;
pub mod result;
pub mod solution;
pub mod stability;
pub mod streamline;
pub mod symmetry;

pub use boundary::{BoundaryConditionSolver, FactoredSystem};
pub use config::{MeshConfig, SolverConfig, Spacing};
pub use error::{SolverError, SolverResult};
pub use flowfield::FlowFieldQuery;
pub use forces::ForceMomentIntegrator;
pub use influence::{InfluenceAssembler, InfluenceMatrix};
pub use kernel::{BiotSavart, Horseshoe};
pub use lattice::VortexLattice;
pub use mesh::{Panel, PanelMesh, Strip};
pub use result::{
    AeroResult, AxisLoads, Coefficient, Coefficients, PanelForce, SpanLoading, StripLoad,
};
pub use solution::{Solution, VortexElement};
pub use stability::{DerivativeTable, StabilityConfig, StabilityDerivativeEngine, StabilityResult};
pub use streamline::{StreamlineConfig, StreamlineIntegrator};
pub use symmetry::{Explicit, MirrorXZ, SymmetryMode, SymmetryStrategy};
