//! Wing validation logic.

use crate::error::{GeometryError, GeometryResult};
use crate::wing::Wing;

/// Smallest y-z advance accepted between consecutive stations.
const MIN_STATION_SPACING: f64 = 1e-12;

/// Validate one wing: section count, finite inputs, positive chords, and
/// spanwise stations that advance without reversing.
pub(crate) fn validate_wing(wing: &Wing) -> GeometryResult<()> {
    if wing.xsecs.len() < 2 {
        return Err(GeometryError::TooFewSections {
            wing: wing.name.clone(),
            count: wing.xsecs.len(),
        });
    }

    for (i, xsec) in wing.xsecs.iter().enumerate() {
        if xsec.xyz_le.iter().any(|v| !v.is_finite()) {
            return Err(GeometryError::NonFinite {
                wing: wing.name.clone(),
                section: i,
                what: "leading edge",
            });
        }
        if !xsec.twist_deg.is_finite() {
            return Err(GeometryError::NonFinite {
                wing: wing.name.clone(),
                section: i,
                what: "twist",
            });
        }
        if !(xsec.chord.is_finite() && xsec.chord > 0.0) {
            return Err(GeometryError::NonPositiveChord {
                wing: wing.name.clone(),
                section: i,
                chord: xsec.chord,
            });
        }
        if wing.symmetric && xsec.xyz_le[1] < -MIN_STATION_SPACING {
            return Err(GeometryError::CrossesSymmetryPlane {
                wing: wing.name.clone(),
                section: i,
            });
        }
    }

    // Each segment must advance in the y-z plane, and consecutive segments may
    // not fold back on each other.
    let mut previous: Option<(f64, f64)> = None;
    for (i, w) in wing.xsecs.windows(2).enumerate() {
        let dy = w[1].xyz_le[1] - w[0].xyz_le[1];
        let dz = w[1].xyz_le[2] - w[0].xyz_le[2];
        let len = dy.hypot(dz);
        if len <= MIN_STATION_SPACING {
            return Err(GeometryError::SectionsOutOfOrder {
                wing: wing.name.clone(),
                section: i,
            });
        }
        let dir = (dy / len, dz / len);
        if let Some(prev) = previous {
            if prev.0 * dir.0 + prev.1 * dir.1 <= 0.0 {
                return Err(GeometryError::SectionsOutOfOrder {
                    wing: wing.name.clone(),
                    section: i,
                });
            }
        }
        previous = Some(dir);
    }

    Ok(())
}
