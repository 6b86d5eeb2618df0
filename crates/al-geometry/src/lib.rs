//! al-geometry: lifting-surface geometry for aerolattice.
//!
//! Provides:
//! - Cross sections and wings (ordered, validated section lists)
//! - Airplane assembly with reference quantities
//! - Section frames (leading/trailing edge after twist) consumed by the mesher
//!
//! # Example
//!
//! ```
//! use al_geometry::{AirplaneBuilder, CrossSection, Wing};
//!
//! let wing = Wing::new(
//!     "main",
//!     vec![
//!         CrossSection::new([0.0, 0.0, 0.0], 1.0, 0.0),
//!         CrossSection::new([0.0, 5.0, 0.0], 1.0, 0.0),
//!     ],
//!     true,
//! );
//! let mut builder = AirplaneBuilder::new("rect");
//! builder.add_wing(wing);
//! let airplane = builder.build().unwrap();
//!
//! assert!((airplane.references.b_ref - 10.0).abs() < 1e-12);
//! assert!((airplane.references.s_ref - 10.0).abs() < 1e-12);
//! ```

pub mod airplane;
pub mod error;
pub mod section;
pub mod wing;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use airplane::{Airplane, AirplaneBuilder, References};
pub use error::{GeometryError, GeometryResult};
pub use section::{CrossSection, SectionFrame};
pub use wing::Wing;
