/// Floating point type used throughout the solver.
pub type Real = f64;

/// `n` points from `0` to `1` inclusive, evenly spaced.
pub fn linspace_unit(n: usize) -> Vec<Real> {
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => (0..n).map(|i| i as Real / (n - 1) as Real).collect(),
    }
}

/// `n` points from `0` to `1` inclusive, clustered at both ends.
pub fn cosspace_unit(n: usize) -> Vec<Real> {
    linspace_unit(n)
        .into_iter()
        .map(|t| 0.5 * (1.0 - (std::f64::consts::PI * t).cos()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacings_hit_endpoints() {
        let lin = linspace_unit(5);
        let cos = cosspace_unit(5);
        assert_eq!(lin.first(), Some(&0.0));
        assert_eq!(lin.last(), Some(&1.0));
        assert!(cos[0].abs() < 1e-15);
        assert!((cos[4] - 1.0).abs() < 1e-15);
        assert!((cos[2] - 0.5).abs() < 1e-12);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn cosspace_is_monotonic(n in 2_usize..64) {
            let pts = cosspace_unit(n);
            prop_assert_eq!(pts.len(), n);
            for w in pts.windows(2) {
                prop_assert!(w[1] > w[0]);
            }
        }
    }
}
