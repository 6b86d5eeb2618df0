//! Panel mesh: lifting surfaces cut into horseshoe-vortex panels.
//!
//! Panel data is stored as parallel arrays (struct-of-arrays) so the dense
//! influence assembly walks contiguous memory.

use al_core::{PanelId, Real, WingId};
use al_geometry::{Airplane, SectionFrame, Wing};
use nalgebra::Vector3;
use tracing::debug;

use crate::config::MeshConfig;
use crate::error::{SolverError, SolverResult};
use crate::kernel::{Horseshoe, mirror_y};

/// Panels whose area falls below this fraction of the mean are degenerate.
const MIN_RELATIVE_AREA: Real = 1e-12;

/// A single panel, copied out of a `PanelMesh`.
///
/// Corners are named by the bound vortex direction: `left` is the end the
/// bound vortex starts from, `front` is the leading-edge side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Panel {
    pub front_left: Vector3<Real>,
    pub front_right: Vector3<Real>,
    pub back_left: Vector3<Real>,
    pub back_right: Vector3<Real>,
    pub collocation: Vector3<Real>,
    pub normal: Vector3<Real>,
    pub horseshoe: Horseshoe,
    pub area: Real,
    pub strip: usize,
}

impl Panel {
    /// Image across the y = 0 plane, with left/right swapped so the bound
    /// vortex still runs in +y and the normal stays on the suction side.
    pub fn mirrored(&self) -> Self {
        Self {
            front_left: mirror_y(&self.front_right),
            front_right: mirror_y(&self.front_left),
            back_left: mirror_y(&self.back_right),
            back_right: mirror_y(&self.back_left),
            collocation: mirror_y(&self.collocation),
            normal: mirror_y(&self.normal),
            horseshoe: self.horseshoe.mirrored(),
            area: self.area,
            strip: self.strip,
        }
    }

    pub fn centroid(&self) -> Vector3<Real> {
        (self.front_left + self.front_right + self.back_left + self.back_right) * 0.25
    }
}

/// One spanwise strip of panels (all chordwise panels between two span cuts).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strip {
    pub wing: WingId,
    /// Midpoint of the strip's leading edge.
    pub leading_edge: Vector3<Real>,
    /// Mean chord of the strip.
    pub chord: Real,
    /// Width of the strip in the y-z plane.
    pub width: Real,
}

impl Strip {
    pub fn mirrored(&self) -> Self {
        Self {
            leading_edge: mirror_y(&self.leading_edge),
            ..*self
        }
    }
}

/// Ordered panels of an airplane.
///
/// When `symmetric` is set only the right half (y >= 0) is stored and the
/// left half is implied by reflection across y = 0.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelMesh {
    front_left: Vec<Vector3<Real>>,
    front_right: Vec<Vector3<Real>>,
    back_left: Vec<Vector3<Real>>,
    back_right: Vec<Vector3<Real>>,
    collocation: Vec<Vector3<Real>>,
    normal: Vec<Vector3<Real>>,
    bound_start: Vec<Vector3<Real>>,
    bound_end: Vec<Vector3<Real>>,
    area: Vec<Real>,
    strip: Vec<usize>,
    strips: Vec<Strip>,
    wake: Vector3<Real>,
    symmetric: bool,
}

impl PanelMesh {
    fn empty(symmetric: bool) -> Self {
        Self {
            front_left: Vec::new(),
            front_right: Vec::new(),
            back_left: Vec::new(),
            back_right: Vec::new(),
            collocation: Vec::new(),
            normal: Vec::new(),
            bound_start: Vec::new(),
            bound_end: Vec::new(),
            area: Vec::new(),
            strip: Vec::new(),
            strips: Vec::new(),
            wake: Vector3::x(),
            symmetric,
        }
    }

    /// Mesh every wing of `airplane`.
    ///
    /// The symmetry reduction is used when `config.use_symmetry` is set and
    /// every wing is mirrored; otherwise mirrored wings get an explicit left
    /// half.
    pub fn build(airplane: &Airplane, config: &MeshConfig) -> SolverResult<Self> {
        if config.spanwise_resolution == 0 || config.chordwise_resolution == 0 {
            return Err(SolverError::Config {
                what: "mesh resolutions must be at least 1".to_string(),
            });
        }
        for wing in &airplane.wings {
            wing.validate()?;
        }

        let reduce = config.use_symmetry && airplane.is_mirror_symmetric();
        let mut mesh = Self::empty(reduce);
        for (w, wing) in airplane.wings.iter().enumerate() {
            let wing_id = WingId::from_usize(w);
            mesh.push_wing(wing_id, &wing.section_frames(), config);
            if wing.symmetric && !reduce {
                mesh.push_wing(wing_id, &mirrored_frames(wing), config);
            }
        }
        mesh.validate()?;

        debug!(
            panels = mesh.len(),
            strips = mesh.strips.len(),
            symmetric = mesh.symmetric,
            "built panel mesh for '{}'",
            airplane.name
        );
        Ok(mesh)
    }

    /// Same surface as a symmetry-reduced mesh but with both halves stored.
    /// Returns a clone when the mesh is already explicit.
    pub fn mirrored_explicit(&self) -> Self {
        if !self.symmetric {
            return self.clone();
        }
        let mut full = self.clone();
        full.symmetric = false;
        let strip_offset = self.strips.len();
        full.strips.extend(self.strips.iter().map(Strip::mirrored));
        for i in 0..self.len() {
            let mut p = self.panel(i).mirrored();
            p.strip += strip_offset;
            full.push_panel(p);
        }
        full
    }

    fn push_wing(&mut self, wing: WingId, frames: &[SectionFrame], config: &MeshConfig) {
        let span_fracs = config.spanwise_spacing.fractions(config.spanwise_resolution);
        let chord_fracs = config.chordwise_spacing.fractions(config.chordwise_resolution);

        for pair in frames.windows(2) {
            let (inner, outer) = (&pair[0], &pair[1]);
            // Lofted grid point at span fraction `eta`, chord fraction `xi`
            let grid = |eta: Real, xi: Real| inner.at(xi) * (1.0 - eta) + outer.at(xi) * eta;

            for s in span_fracs.windows(2) {
                let le_l = grid(s[0], 0.0);
                let le_r = grid(s[1], 0.0);
                let te_l = grid(s[0], 1.0);
                let te_r = grid(s[1], 1.0);
                let d = le_r - le_l;
                let strip_index = self.strips.len();
                self.strips.push(Strip {
                    wing,
                    leading_edge: (le_l + le_r) * 0.5,
                    chord: 0.5 * ((te_l - le_l).norm() + (te_r - le_r).norm()),
                    width: d.y.hypot(d.z),
                });

                for c in chord_fracs.windows(2) {
                    let panel = self.make_panel(
                        grid(s[0], c[0]),
                        grid(s[1], c[0]),
                        grid(s[0], c[1]),
                        grid(s[1], c[1]),
                        strip_index,
                        config,
                    );
                    self.push_panel(panel);
                }
            }
        }
    }

    fn make_panel(
        &self,
        front_left: Vector3<Real>,
        front_right: Vector3<Real>,
        back_left: Vector3<Real>,
        back_right: Vector3<Real>,
        strip: usize,
        config: &MeshConfig,
    ) -> Panel {
        let fb = config.bound_vortex_fraction;
        let fc = config.collocation_fraction;

        let start = front_left + (back_left - front_left) * fb;
        let end = front_right + (back_right - front_right) * fb;
        let mid_front = (front_left + front_right) * 0.5;
        let mid_back = (back_left + back_right) * 0.5;

        let cross = (back_right - front_left).cross(&(front_right - back_left));
        let cross_norm = cross.norm();
        let normal = if cross_norm > 0.0 {
            cross / cross_norm
        } else {
            Vector3::zeros()
        };

        Panel {
            front_left,
            front_right,
            back_left,
            back_right,
            collocation: mid_front + (mid_back - mid_front) * fc,
            normal,
            horseshoe: Horseshoe {
                start,
                end,
                wake: self.wake,
            },
            area: 0.5 * cross_norm,
            strip,
        }
    }

    fn push_panel(&mut self, p: Panel) {
        self.front_left.push(p.front_left);
        self.front_right.push(p.front_right);
        self.back_left.push(p.back_left);
        self.back_right.push(p.back_right);
        self.collocation.push(p.collocation);
        self.normal.push(p.normal);
        self.bound_start.push(p.horseshoe.start);
        self.bound_end.push(p.horseshoe.end);
        self.area.push(p.area);
        self.strip.push(p.strip);
    }

    /// Reject empty meshes and zero-area panels.
    fn validate(&self) -> SolverResult<()> {
        if self.is_empty() {
            return Err(SolverError::Config {
                what: "mesh has no panels".to_string(),
            });
        }
        let mean = self.area.iter().sum::<Real>() / self.len() as Real;
        for (i, a) in self.area.iter().enumerate() {
            if !a.is_finite() || *a <= MIN_RELATIVE_AREA * mean {
                return Err(SolverError::DegeneratePanel {
                    panel: PanelId::from_usize(i),
                    what: format!("area {:e} is effectively zero", a),
                });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.area.len()
    }

    pub fn is_empty(&self) -> bool {
        self.area.is_empty()
    }

    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    pub fn panel(&self, i: usize) -> Panel {
        Panel {
            front_left: self.front_left[i],
            front_right: self.front_right[i],
            back_left: self.back_left[i],
            back_right: self.back_right[i],
            collocation: self.collocation[i],
            normal: self.normal[i],
            horseshoe: self.horseshoe(i),
            area: self.area[i],
            strip: self.strip[i],
        }
    }

    pub fn panels(&self) -> impl Iterator<Item = Panel> + '_ {
        (0..self.len()).map(|i| self.panel(i))
    }

    #[inline]
    pub fn horseshoe(&self, i: usize) -> Horseshoe {
        Horseshoe {
            start: self.bound_start[i],
            end: self.bound_end[i],
            wake: self.wake,
        }
    }

    pub fn collocation_points(&self) -> &[Vector3<Real>] {
        &self.collocation
    }

    pub fn normals(&self) -> &[Vector3<Real>] {
        &self.normal
    }

    pub fn areas(&self) -> &[Real] {
        &self.area
    }

    pub fn strips(&self) -> &[Strip] {
        &self.strips
    }

    /// Strip index of each panel.
    pub fn strip_of(&self, i: usize) -> usize {
        self.strip[i]
    }

    /// Direction of the trailing legs (geometry +x).
    pub fn wake_direction(&self) -> Vector3<Real> {
        self.wake
    }

    /// Total panel area, including the implied half of a reduced mesh.
    pub fn wetted_planform_area(&self) -> Real {
        let stored: Real = self.area.iter().sum();
        if self.symmetric { 2.0 * stored } else { stored }
    }

    /// Smallest box holding every panel corner, both halves.
    pub fn bounding_box(&self) -> (Vector3<Real>, Vector3<Real>) {
        let mut lo = Vector3::repeat(Real::INFINITY);
        let mut hi = Vector3::repeat(Real::NEG_INFINITY);
        let corners = self
            .front_left
            .iter()
            .chain(&self.front_right)
            .chain(&self.back_left)
            .chain(&self.back_right);
        for p in corners {
            lo = lo.inf(p);
            hi = hi.sup(p);
            if self.symmetric {
                let m = mirror_y(p);
                lo = lo.inf(&m);
                hi = hi.sup(&m);
            }
        }
        (lo, hi)
    }
}

/// Section frames of the left half of a symmetric wing, tip first.
fn mirrored_frames(wing: &Wing) -> Vec<SectionFrame> {
    wing.section_frames()
        .iter()
        .rev()
        .map(|f| SectionFrame {
            le: mirror_y(&f.le),
            te: mirror_y(&f.te),
        })
        .collect()
}
