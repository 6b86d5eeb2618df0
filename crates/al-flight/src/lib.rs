//! Flight condition for aerolattice.
//!
//! A `FlowState` is one operating point: airspeed, density, incidence angles
//! and body rates. It also knows how to resolve the freestream and rotational
//! velocity into geometry axes and how to move vectors between axis frames.

pub mod axes;
pub mod error;
pub mod state;
pub mod variable;

pub use axes::Axes;
pub use error::{FlightError, FlightResult};
pub use state::FlowState;
pub use variable::StateVariable;
