//! Airplane assembly and reference quantities.

use al_core::Real;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};
use crate::wing::Wing;

/// Reference quantities used to nondimensionalize forces and moments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct References {
    /// Moment reference point (and center of rotation for body rates).
    pub xyz_ref: [Real; 3],
    /// Reference area.
    pub s_ref: Real,
    /// Reference chord.
    pub c_ref: Real,
    /// Reference span.
    pub b_ref: Real,
}

impl References {
    /// Main-wing derived references: area, mean aerodynamic chord and span.
    pub fn from_wing(wing: &Wing) -> Self {
        Self {
            xyz_ref: [0.0; 3],
            s_ref: wing.area(),
            c_ref: wing.mean_aerodynamic_chord(),
            b_ref: wing.span(),
        }
    }

    pub fn xyz(&self) -> Vector3<Real> {
        Vector3::from(self.xyz_ref)
    }

    pub fn validate(&self) -> GeometryResult<()> {
        for (what, value) in [
            ("s_ref", self.s_ref),
            ("c_ref", self.c_ref),
            ("b_ref", self.b_ref),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(GeometryError::InvalidReference { what, value });
            }
        }
        if self.xyz_ref.iter().any(|v| !v.is_finite()) {
            return Err(GeometryError::InvalidReference {
                what: "xyz_ref",
                value: Real::NAN,
            });
        }
        Ok(())
    }
}

/// Validated collection of lifting surfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airplane {
    pub name: String,
    pub wings: Vec<Wing>,
    pub references: References,
}

impl Airplane {
    /// True when every wing is mirrored across y = 0.
    pub fn is_mirror_symmetric(&self) -> bool {
        self.wings.iter().all(|w| w.symmetric)
    }

    /// Axis-aligned bounding box of all leading and trailing edges, both halves.
    pub fn bounding_box(&self) -> (Vector3<Real>, Vector3<Real>) {
        let mut lo = Vector3::repeat(Real::INFINITY);
        let mut hi = Vector3::repeat(Real::NEG_INFINITY);
        for wing in &self.wings {
            for frame in wing.section_frames() {
                for p in [frame.le, frame.te] {
                    lo = lo.inf(&p);
                    hi = hi.sup(&p);
                    if wing.symmetric {
                        let m = Vector3::new(p.x, -p.y, p.z);
                        lo = lo.inf(&m);
                        hi = hi.sup(&m);
                    }
                }
            }
        }
        (lo, hi)
    }
}

/// Builder for an `Airplane`.
///
/// References default to the first wing's area, mean aerodynamic chord and
/// span, about the origin; any of them can be overridden before `build()`.
#[derive(Debug, Default)]
pub struct AirplaneBuilder {
    name: String,
    wings: Vec<Wing>,
    xyz_ref: Option<[Real; 3]>,
    s_ref: Option<Real>,
    c_ref: Option<Real>,
    b_ref: Option<Real>,
}

impl AirplaneBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a wing and return its index.
    pub fn add_wing(&mut self, wing: Wing) -> al_core::WingId {
        let id = al_core::WingId::from_usize(self.wings.len());
        self.wings.push(wing);
        id
    }

    pub fn xyz_ref(&mut self, xyz_ref: [Real; 3]) -> &mut Self {
        self.xyz_ref = Some(xyz_ref);
        self
    }

    pub fn s_ref(&mut self, s_ref: Real) -> &mut Self {
        self.s_ref = Some(s_ref);
        self
    }

    pub fn c_ref(&mut self, c_ref: Real) -> &mut Self {
        self.c_ref = Some(c_ref);
        self
    }

    pub fn b_ref(&mut self, b_ref: Real) -> &mut Self {
        self.b_ref = Some(b_ref);
        self
    }

    /// Validate every wing and freeze into an `Airplane`.
    pub fn build(self) -> GeometryResult<Airplane> {
        let main = self.wings.first().ok_or(GeometryError::NoWings)?;
        for wing in &self.wings {
            wing.validate()?;
        }

        let derived = References::from_wing(main);
        let references = References {
            xyz_ref: self.xyz_ref.unwrap_or(derived.xyz_ref),
            s_ref: self.s_ref.unwrap_or(derived.s_ref),
            c_ref: self.c_ref.unwrap_or(derived.c_ref),
            b_ref: self.b_ref.unwrap_or(derived.b_ref),
        };
        references.validate()?;

        Ok(Airplane {
            name: self.name,
            wings: self.wings,
            references,
        })
    }
}
