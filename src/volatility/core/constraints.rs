//! Box constraints for conditional-variance parameters.
//!
//! The constraint provider turns `(family, p, q)` into a pair of
//! parameter-length bound vectors consumed by the optimizer. Policy:
//!
//! - The intercept ω is bounded below by [`INTERCEPT_EPS`] (variance must stay
//!   strictly positive) and unbounded above.
//! - Persistence coefficients β are in `[0, 1]` for the additive families and
//!   in `[ε − 1, 1 − ε]` for EGarch, where they act on log-variance and must
//!   stay strictly inside the unit interval in magnitude for the long-run
//!   variance to be finite.
//! - Shock-response coefficients α are in `[0, 1]`.
//! - Shift/skew/asymmetry segments get the wide box `[-10, 10]`.
//!
//! Bounds always describe the **full** parameter space; subset masking fixes
//! masked-out entries at zero on the optimizer side and never shrinks these
//! vectors.
use crate::{
    optimization::numerical_stability::transformations::INTERCEPT_EPS,
    volatility::core::{
        family::VolFamily,
        layout::{ParamLayout, nparams},
    },
};
use ndarray::Array1;

/// Bound applied to the shift/skew/asymmetry segments.
const ASYMMETRY_BOUND: f64 = 10.0;

/// Closed box constraint over a full parameter vector.
///
/// Invariant (enforced by construction in [`constraints`]):
/// `lower[i] <= upper[i]` for every index, and `lower[0] > 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamBounds {
    pub lower: Array1<f64>,
    pub upper: Array1<f64>,
}

impl ParamBounds {
    /// Whether `value` lies inside the box at coordinate `index`.
    pub fn contains(&self, index: usize, value: f64) -> bool {
        value >= self.lower[index] && value <= self.upper[index]
    }
}

/// Produce the lower/upper bound vectors for a family at order `(p, q)`.
///
/// Pure function over the full (unmasked) layout; see the module docs for the
/// per-segment policy. Any `p, q ≥ 0` is valid input and yields vectors of
/// length `nparams(family, p, q)`.
pub fn constraints(family: VolFamily, p: usize, q: usize) -> ParamBounds {
    let n = nparams(family, p, q);
    let layout = ParamLayout::new(family, p, q);
    let mut lower = Array1::zeros(n);
    let mut upper = Array1::zeros(n);

    lower[ParamLayout::INTERCEPT] = INTERCEPT_EPS;
    upper[ParamLayout::INTERCEPT] = f64::INFINITY;

    let (persist_lo, persist_hi) = match family {
        VolFamily::EGarch => (INTERCEPT_EPS - 1.0, 1.0 - INTERCEPT_EPS),
        _ => (0.0, 1.0),
    };
    for j in layout.persistence() {
        lower[j] = persist_lo;
        upper[j] = persist_hi;
    }
    for i in layout.response() {
        lower[i] = 0.0;
        upper[i] = 1.0;
    }
    for k in 0..family.aux_segments() {
        for i in layout.aux(k) {
            lower[i] = -ASYMMETRY_BOUND;
            upper[i] = ASYMMETRY_BOUND;
        }
    }
    ParamBounds { lower, upper }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Ordering of lower/upper bounds and strict positivity of the intercept
    //   lower bound across families and orders.
    // - The family-specific persistence boxes.
    //
    // They intentionally DO NOT cover:
    // - How the optimizer maps unconstrained coordinates into these boxes
    //   (tested in the transformations and params modules).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // For every family and a grid of orders, bounds are ordered and the
    // intercept lower bound is strictly positive.
    //
    // Given
    // -----
    // - Families Garch, TGarch, EGarch; orders (0,0) through (3,2).
    //
    // Expect
    // ------
    // - `lower[i] <= upper[i]` for every index and `lower[0] > 0`.
    fn bounds_are_ordered_with_positive_intercept_floor() {
        // Arrange
        let families = [VolFamily::Garch, VolFamily::TGarch, VolFamily::EGarch];

        // Act & Assert
        for &family in &families {
            for p in 0..=3 {
                for q in 0..=2 {
                    let bounds = constraints(family, p, q);
                    assert_eq!(bounds.lower.len(), nparams(family, p, q));
                    assert_eq!(bounds.upper.len(), nparams(family, p, q));
                    for i in 0..bounds.lower.len() {
                        assert!(
                            bounds.lower[i] <= bounds.upper[i],
                            "unordered bounds at {i} for {family:?}({p}, {q})"
                        );
                    }
                    assert!(bounds.lower[0] > 0.0, "intercept floor must be positive");
                }
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Persistence bounds differ by family: [0, 1] for additive recursions,
    // [ε − 1, 1 − ε] for the log-space recursion.
    //
    // Given
    // -----
    // - Garch(2, 1) and EGarch(2, 1).
    //
    // Expect
    // ------
    // - Garch persistence box is [0, 1]; EGarch box is strictly inside (−1, 1).
    fn persistence_box_is_family_specific() {
        // Arrange & Act
        let garch = constraints(VolFamily::Garch, 2, 1);
        let egarch = constraints(VolFamily::EGarch, 2, 1);

        // Assert
        for j in 1..=2 {
            assert_eq!(garch.lower[j], 0.0);
            assert_eq!(garch.upper[j], 1.0);
            assert!(egarch.lower[j] > -1.0);
            assert!(egarch.upper[j] < 1.0);
        }
    }

    #[test]
    // Purpose
    // -------
    // Auxiliary segments carry the wide asymmetry box.
    //
    // Given
    // -----
    // - TGarch(1, 2): shift at indices 4..6, skew at 6..8.
    //
    // Expect
    // ------
    // - Both segments bounded by [-10, 10].
    fn asymmetry_segments_get_wide_box() {
        // Arrange & Act
        let bounds = constraints(VolFamily::TGarch, 1, 2);

        // Assert
        for i in 4..8 {
            assert_eq!(bounds.lower[i], -10.0);
            assert_eq!(bounds.upper[i], 10.0);
        }
    }
}
