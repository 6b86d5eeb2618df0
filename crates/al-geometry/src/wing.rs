//! Lifting surfaces defined by an ordered list of cross sections.

use al_core::Real;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::GeometryResult;
use crate::section::{CrossSection, SectionFrame};
use crate::validate;

/// A lifting surface lofted linearly between consecutive cross sections.
///
/// When `symmetric` is set the sections describe the right half only and the
/// surface is mirrored across the y = 0 plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wing {
    pub name: String,
    pub xsecs: Vec<CrossSection>,
    #[serde(default)]
    pub symmetric: bool,
}

impl Wing {
    pub fn new(name: impl Into<String>, xsecs: Vec<CrossSection>, symmetric: bool) -> Self {
        Self {
            name: name.into(),
            xsecs,
            symmetric,
        }
    }

    /// Check section count, chords and spanwise ordering.
    pub fn validate(&self) -> GeometryResult<()> {
        validate::validate_wing(self)
    }

    /// Shift every section by `offset`.
    pub fn translate(mut self, offset: [Real; 3]) -> Self {
        self.xsecs = self.xsecs.iter().map(|x| x.translated(offset)).collect();
        self
    }

    /// Unit vector along each segment, projected into the y-z plane.
    fn segment_directions(&self) -> Vec<Vector3<Real>> {
        self.xsecs
            .windows(2)
            .map(|w| {
                let d = w[1].le() - w[0].le();
                let yz = Vector3::new(0.0, d.y, d.z);
                let n = yz.norm();
                if n > 0.0 { yz / n } else { Vector3::y() }
            })
            .collect()
    }

    /// Spanwise axis at each section, used as the twist axis.
    pub fn spanwise_axes(&self) -> Vec<Vector3<Real>> {
        let segs = self.segment_directions();
        let n = self.xsecs.len();
        (0..n)
            .map(|i| {
                let axis = match (i.checked_sub(1).and_then(|k| segs.get(k)), segs.get(i)) {
                    (Some(a), Some(b)) => a + b,
                    (Some(a), None) => *a,
                    (None, Some(b)) => *b,
                    (None, None) => Vector3::y(),
                };
                let len = axis.norm();
                if len > 0.0 { axis / len } else { Vector3::y() }
            })
            .collect()
    }

    /// Leading and trailing edge of every section with twist applied.
    pub fn section_frames(&self) -> Vec<SectionFrame> {
        self.xsecs
            .iter()
            .zip(self.spanwise_axes())
            .map(|(xsec, span_axis)| {
                let up = Vector3::x().cross(&span_axis);
                let twist = xsec.twist_deg.to_radians();
                let chord_dir = Vector3::x() * twist.cos() - up * twist.sin();
                let le = xsec.le();
                SectionFrame {
                    le,
                    te: le + chord_dir * xsec.chord,
                }
            })
            .collect()
    }

    /// Length of each segment measured in the y-z plane.
    fn segment_spans(&self) -> Vec<Real> {
        self.xsecs
            .windows(2)
            .map(|w| {
                let d = w[1].le() - w[0].le();
                d.y.hypot(d.z)
            })
            .collect()
    }

    fn mirror_factor(&self) -> Real {
        if self.symmetric { 2.0 } else { 1.0 }
    }

    /// Span measured along the y-z projection of the leading edge, both halves.
    pub fn span(&self) -> Real {
        self.segment_spans().iter().sum::<Real>() * self.mirror_factor()
    }

    /// Planform area, both halves.
    pub fn area(&self) -> Real {
        let half: Real = self
            .xsecs
            .windows(2)
            .zip(self.segment_spans())
            .map(|(w, b)| 0.5 * (w[0].chord + w[1].chord) * b)
            .sum();
        half * self.mirror_factor()
    }

    /// Mean aerodynamic chord, exact for linearly tapered segments.
    pub fn mean_aerodynamic_chord(&self) -> Real {
        let mut c2 = 0.0;
        let mut c1 = 0.0;
        for (w, b) in self.xsecs.windows(2).zip(self.segment_spans()) {
            let (a, z) = (w[0].chord, w[1].chord);
            c2 += (a * a + a * z + z * z) / 3.0 * b;
            c1 += 0.5 * (a + z) * b;
        }
        if c1 > 0.0 { c2 / c1 } else { 0.0 }
    }

    pub fn aspect_ratio(&self) -> Real {
        let s = self.area();
        if s > 0.0 { self.span().powi(2) / s } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tapered() -> Wing {
        Wing::new(
            "tapered",
            vec![
                CrossSection::new([0.0, 0.0, 0.0], 2.0, 0.0),
                CrossSection::new([0.5, 4.0, 0.0], 1.0, 0.0),
            ],
            true,
        )
    }

    #[test]
    fn tapered_planform_quantities() {
        let wing = tapered();
        assert!((wing.span() - 8.0).abs() < 1e-12);
        assert!((wing.area() - 12.0).abs() < 1e-12);
        // MAC of a trapezoid: 2/3 c_r (1 + l + l^2)/(1 + l), l = 0.5
        let mac = 2.0 / 3.0 * 2.0 * (1.0 + 0.5 + 0.25) / 1.5;
        assert!((wing.mean_aerodynamic_chord() - mac).abs() < 1e-12);
        assert!((wing.aspect_ratio() - 64.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn positive_twist_drops_trailing_edge() {
        let wing = Wing::new(
            "twisted",
            vec![
                CrossSection::new([0.0, 0.0, 0.0], 1.0, 10.0),
                CrossSection::new([0.0, 1.0, 0.0], 1.0, 0.0),
            ],
            false,
        );
        let frames = wing.section_frames();
        assert!(frames[0].te.z < 0.0);
        assert!((frames[0].te.x - 10f64.to_radians().cos()).abs() < 1e-12);
        assert!(frames[1].te.z.abs() < 1e-15);
    }

    #[test]
    fn vertical_fin_axis_is_z() {
        let fin = Wing::new(
            "fin",
            vec![
                CrossSection::new([0.0, 0.0, 0.0], 1.0, 0.0),
                CrossSection::new([0.2, 0.0, 1.0], 0.6, 0.0),
            ],
            false,
        );
        for axis in fin.spanwise_axes() {
            assert!((axis - Vector3::z()).norm() < 1e-12);
        }
        assert!((fin.span() - 1.0).abs() < 1e-12);
    }
}
