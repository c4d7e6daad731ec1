//! Parameter layout for conditional-variance families.
//!
//! Every family stores its coefficients in one flat vector with a fixed
//! segment order:
//!
//! ```text
//! [ ω | β₁..β_p | α₁..α_q | aux₀(1..q) | aux₁(1..q) ]
//! ```
//!
//! - `ω` is the variance intercept (always index 0).
//! - The β segment holds the `p` variance-lag (persistence) coefficients.
//! - The α segment holds the `q` shock-lag (response) coefficients.
//! - Auxiliary q-length segments follow, one per [`VolFamily::aux_segments`]:
//!   shift η then skew λ for `TGarch`, sign asymmetry γ for `EGarch`.
//!
//! This layout is the contract shared by constraints, starting values,
//! coefficient naming, and subset masking; nothing else in the crate is
//! allowed to do its own index arithmetic into the flat vector. [`ParamLayout`]
//! exposes the segment ranges and [`CoeffView`] is the bounds-checked view
//! that the recursion reads through, validated once per evaluation.
//!
//! All functions here are total: any `(p, q)` pair with `p, q ≥ 0` yields a
//! well-defined (possibly degenerate) layout. Rejecting nonsensical orders is
//! the job of [`super::shape::VolShape::new`] on the model-construction path.
use crate::volatility::{
    core::family::VolFamily,
    errors::{ParamError, ParamResult},
};
use ndarray::ArrayView1;
use std::ops::Range;

/// Number of free parameters for a family at order `(p, q)`.
///
/// `1 + p + q·(1 + aux_segments)`; pure, total, no side effects.
pub fn nparams(family: VolFamily, p: usize, q: usize) -> usize {
    1 + p + q * (1 + family.aux_segments())
}

/// Number of free parameters under a subset mask.
///
/// Counts the mask's true entries, with the intercept slot counted
/// unconditionally (the intercept is never maskable, so an otherwise empty
/// mask still yields 1).
///
/// # Errors
/// - [`ParamError::MaskLengthMismatch`] if `mask.len() != nparams(family, p, q)`.
pub fn nparams_masked(
    family: VolFamily, p: usize, q: usize, mask: &[bool],
) -> ParamResult<usize> {
    let expected = nparams(family, p, q);
    if mask.len() != expected {
        return Err(ParamError::MaskLengthMismatch { expected, actual: mask.len() });
    }
    Ok(1 + mask[1..].iter().filter(|&&m| m).count())
}

/// Stable, 1-based coefficient names matching the flat layout.
///
/// `["omega", "beta1", …, "alpha1", …]` plus `eta*`/`lambda*` for `TGarch`
/// and `gamma*` for `EGarch`. The returned sequence always has length
/// `nparams(family, p, q)`.
pub fn coef_names(family: VolFamily, p: usize, q: usize) -> Vec<String> {
    let mut names = Vec::with_capacity(nparams(family, p, q));
    names.push("omega".to_string());
    for j in 1..=p {
        names.push(format!("beta{j}"));
    }
    for i in 1..=q {
        names.push(format!("alpha{i}"));
    }
    match family {
        VolFamily::Garch => {}
        VolFamily::TGarch => {
            for i in 1..=q {
                names.push(format!("eta{i}"));
            }
            for i in 1..=q {
                names.push(format!("lambda{i}"));
            }
        }
        VolFamily::EGarch => {
            for i in 1..=q {
                names.push(format!("gamma{i}"));
            }
        }
    }
    names
}

/// Named index ranges over the flat coefficient vector.
///
/// Copyable descriptor computed from `(family, p, q)`; consumers index the
/// flat vector exclusively through these ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamLayout {
    pub family: VolFamily,
    pub p: usize,
    pub q: usize,
}

impl ParamLayout {
    /// Index of the intercept ω (always 0).
    pub const INTERCEPT: usize = 0;

    pub fn new(family: VolFamily, p: usize, q: usize) -> Self {
        ParamLayout { family, p, q }
    }

    /// Total parameter count for this layout.
    pub fn nparams(&self) -> usize {
        nparams(self.family, self.p, self.q)
    }

    /// Index range of the persistence (β) segment.
    pub fn persistence(&self) -> Range<usize> {
        1..1 + self.p
    }

    /// Index range of the shock-response (α) segment.
    pub fn response(&self) -> Range<usize> {
        1 + self.p..1 + self.p + self.q
    }

    /// Index range of the k-th auxiliary segment (0-based).
    ///
    /// # Panics
    /// Panics if `k >= family.aux_segments()`; asking for a segment the
    /// family does not have is a logic error, not a data condition.
    pub fn aux(&self, k: usize) -> Range<usize> {
        assert!(
            k < self.family.aux_segments(),
            "auxiliary segment {k} requested but family has {}",
            self.family.aux_segments()
        );
        let start = 1 + self.p + self.q * (k + 1);
        start..start + self.q
    }
}

/// Bounds-checked read view over a flat coefficient vector.
///
/// Constructed once per likelihood evaluation; after the length check in
/// [`CoeffView::new`] every segment accessor is infallible, so the hot
/// recursion loop carries no further validation.
#[derive(Debug, Clone, Copy)]
pub struct CoeffView<'a> {
    layout: ParamLayout,
    values: ArrayView1<'a, f64>,
}

impl<'a> CoeffView<'a> {
    /// Wrap a flat coefficient vector, validating its length against the layout.
    ///
    /// # Errors
    /// - [`ParamError::CoeffLengthMismatch`] if `values.len() != layout.nparams()`.
    pub fn new(values: ArrayView1<'a, f64>, layout: ParamLayout) -> ParamResult<Self> {
        if values.len() != layout.nparams() {
            return Err(ParamError::CoeffLengthMismatch {
                expected: layout.nparams(),
                actual: values.len(),
            });
        }
        Ok(CoeffView { layout, values })
    }

    pub fn layout(&self) -> &ParamLayout {
        &self.layout
    }

    /// The intercept ω.
    pub fn intercept(&self) -> f64 {
        self.values[ParamLayout::INTERCEPT]
    }

    /// The persistence segment β₁..β_p.
    pub fn persistence(&self) -> ArrayView1<'a, f64> {
        self.values.slice_move(ndarray::s![self.layout.persistence()])
    }

    /// The shock-response segment α₁..α_q.
    pub fn response(&self) -> ArrayView1<'a, f64> {
        self.values.slice_move(ndarray::s![self.layout.response()])
    }

    /// The k-th auxiliary segment (0-based); see [`ParamLayout::aux`].
    pub fn aux(&self, k: usize) -> ArrayView1<'a, f64> {
        self.values.slice_move(ndarray::s![self.layout.aux(k)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - nparams / coef_names agreement across families and orders, including
    //   degenerate orders (0, 0).
    // - Masked parameter counting, including the always-counted intercept.
    // - Segment ranges and the CoeffView length check.
    //
    // They intentionally DO NOT cover:
    // - Constraint boxes or subset-mask construction (tested in their own
    //   modules against this layout).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // For every family and a grid of orders, `coef_names` has exactly
    // `nparams` entries.
    //
    // Given
    // -----
    // - Families Garch, TGarch, EGarch; orders (0,0) through (3,3).
    //
    // Expect
    // ------
    // - `coef_names(f, p, q).len() == nparams(f, p, q)` everywhere.
    fn coef_names_length_matches_nparams_for_all_orders() {
        // Arrange
        let families = [VolFamily::Garch, VolFamily::TGarch, VolFamily::EGarch];

        // Act & Assert
        for &family in &families {
            for p in 0..=3 {
                for q in 0..=3 {
                    let names = coef_names(family, p, q);
                    assert_eq!(
                        names.len(),
                        nparams(family, p, q),
                        "length mismatch for {family:?}({p}, {q})"
                    );
                }
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Concrete layouts match the documented segment order and naming scheme.
    //
    // Given
    // -----
    // - TGarch(1, 1) and EGarch(2, 1).
    //
    // Expect
    // ------
    // - TGarch(1, 1): [omega, beta1, alpha1, eta1, lambda1].
    // - EGarch(2, 1): [omega, beta1, beta2, alpha1, gamma1].
    fn coef_names_follow_segment_order() {
        // Arrange & Act
        let tgarch = coef_names(VolFamily::TGarch, 1, 1);
        let egarch = coef_names(VolFamily::EGarch, 2, 1);

        // Assert
        assert_eq!(tgarch, vec!["omega", "beta1", "alpha1", "eta1", "lambda1"]);
        assert_eq!(egarch, vec!["omega", "beta1", "beta2", "alpha1", "gamma1"]);
    }

    #[test]
    // Purpose
    // -------
    // `nparams_masked` counts true entries with the intercept always included,
    // and rejects masks of the wrong length.
    //
    // Given
    // -----
    // - Garch(2, 1): full layout [omega, beta1, beta2, alpha1].
    // - A mask keeping beta1 only, an all-false mask, and a short mask.
    //
    // Expect
    // ------
    // - Counts 2 and 1 respectively; `MaskLengthMismatch` for the short mask.
    fn nparams_masked_counts_trues_and_always_includes_intercept() {
        // Arrange
        let family = VolFamily::Garch;

        // Act & Assert
        assert_eq!(nparams_masked(family, 2, 1, &[true, true, false, false]).unwrap(), 2);
        assert_eq!(nparams_masked(family, 2, 1, &[false, false, false, false]).unwrap(), 1);
        assert!(matches!(
            nparams_masked(family, 2, 1, &[true, true]),
            Err(ParamError::MaskLengthMismatch { expected: 4, actual: 2 })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Segment ranges partition the flat vector and `CoeffView` slices line up
    // with them.
    //
    // Given
    // -----
    // - TGarch(2, 2) with a coefficient vector 0..9.
    //
    // Expect
    // ------
    // - persistence = indices 1..3, response = 3..5, shift = 5..7, skew = 7..9.
    fn coeff_view_segments_align_with_layout_ranges() {
        // Arrange
        let layout = ParamLayout::new(VolFamily::TGarch, 2, 2);
        let values: ndarray::Array1<f64> = (0..layout.nparams()).map(|i| i as f64).collect();

        // Act
        let view = CoeffView::new(values.view(), layout).unwrap();

        // Assert
        assert_eq!(view.intercept(), 0.0);
        assert_eq!(view.persistence().to_vec(), vec![1.0, 2.0]);
        assert_eq!(view.response().to_vec(), vec![3.0, 4.0]);
        assert_eq!(view.aux(0).to_vec(), vec![5.0, 6.0]);
        assert_eq!(view.aux(1).to_vec(), vec![7.0, 8.0]);
    }

    #[test]
    // Purpose
    // -------
    // `CoeffView::new` rejects a vector whose length disagrees with the layout.
    //
    // Given
    // -----
    // - Garch(1, 1) layout (3 parameters) and a vector of length 4.
    //
    // Expect
    // ------
    // - `ParamError::CoeffLengthMismatch { expected: 3, actual: 4 }`.
    fn coeff_view_rejects_length_mismatch() {
        // Arrange
        let layout = ParamLayout::new(VolFamily::Garch, 1, 1);
        let values = ndarray::Array1::<f64>::zeros(4);

        // Act
        let result = CoeffView::new(values.view(), layout);

        // Assert
        assert!(matches!(
            result,
            Err(ParamError::CoeffLengthMismatch { expected: 3, actual: 4 })
        ));
    }
}
