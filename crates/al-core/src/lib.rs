//! al-core: shared building blocks for aerolattice.
//!
//! - units: uom SI aliases and constructors for flight-condition inputs
//! - numeric: `Real` and station spacing helpers
//! - ids: compact panel and wing identifiers

pub mod ids;
pub mod numeric;
pub mod units;

pub use ids::*;
pub use numeric::*;
pub use units::*;
