//! Model-space parameters and the optimizer-space mapping.
//!
//! This module provides the owned, validated parameter container
//! [`VolParams`] and the reusable scratch workspace [`VolScratch`] used by
//! likelihood and forecasting routines, plus the mapping between the
//! **model-space** coefficient vector and the **optimizer-space** vector θ.
//!
//! ## Mapping conventions
//! Each free coordinate is mapped through the per-coordinate box transform
//! from the constraint provider's bounds
//! ([`bounded_from_unconstrained`] / [`unconstrained_from_bounded`]), so every
//! optimizer iterate lands strictly inside the box: the intercept stays
//! strictly positive via a shifted softplus and bounded segments go through a
//! scaled logistic. Under a subset mask, θ carries only the masked-in
//! coordinates in layout order; masked-out coefficients are pinned at zero by
//! [`scatter_theta`] and never seen by the optimizer.
//!
//! ## Invariants validated by constructors
//! - coefficient vector length matches `nparams(family, p, q)`
//! - intercept finite and strictly positive
//! - every coordinate inside its constraint box
use crate::{
    optimization::numerical_stability::transformations::{
        bounded_from_unconstrained, unconstrained_from_bounded,
    },
    volatility::{
        core::{
            constraints::{ParamBounds, constraints},
            family::VolFamily,
            history::VarianceHistory,
            layout::{CoeffView, ParamLayout, nparams},
            shape::VolShape,
            uncond::unconditional_variance,
            validation::{validate_intercept, validate_theta, validate_within_bounds},
        },
        errors::{ParamError, ParamResult, VolResult},
    },
};
use ndarray::{Array1, ArrayView1};
use std::cell::RefCell;

/// Reusable workspace for estimation and forecasting.
///
/// Holds the full-length model-space coefficient buffer that θ is scattered
/// into on every optimizer step, and the private history buffers driven by
/// the recursion. Both are zero-initialized at construction and reused so the
/// hot loop runs allocation-free.
#[derive(Debug, Clone, PartialEq)]
pub struct VolScratch {
    /// Scratch buffer for the full model-space coefficient vector.
    pub coeff_buf: RefCell<Array1<f64>>,
    /// Private history buffers for one evaluation at a time.
    pub history: RefCell<VarianceHistory>,
}

impl VolScratch {
    /// Size the workspace for a series of length `n` at the given family and
    /// order.
    pub fn new(family: VolFamily, shape: &VolShape, n: usize) -> VolScratch {
        VolScratch {
            coeff_buf: RefCell::new(Array1::zeros(nparams(family, shape.p, shape.q))),
            history: RefCell::new(VarianceHistory::new(shape.presample(), n)),
        }
    }
}

/// Scatter an optimizer-space vector θ into a full model-space coefficient
/// buffer.
///
/// Free coordinates (all of them, or the mask's true positions) are mapped
/// through the box transform for their bounds; masked-out coordinates are
/// fixed at zero. `out` is fully overwritten.
///
/// # Errors
/// - [`ParamError::ThetaLengthMismatch`] if `theta.len()` differs from the
///   number of free coordinates.
/// - [`ParamError::InvalidThetaInput`] for non-finite θ entries.
/// - [`ParamError::MaskLengthMismatch`] if a provided mask does not match the
///   buffer length.
pub fn scatter_theta(
    theta: ArrayView1<'_, f64>, bounds: &ParamBounds, mask: Option<&[bool]>,
    out: &mut Array1<f64>,
) -> ParamResult<()> {
    let n = out.len();
    if let Some(mask) = mask {
        if mask.len() != n {
            return Err(ParamError::MaskLengthMismatch { expected: n, actual: mask.len() });
        }
    }
    let free = match mask {
        Some(mask) => mask.iter().filter(|&&m| m).count(),
        None => n,
    };
    validate_theta(theta, free)?;

    let mut source = 0;
    for i in 0..n {
        let included = mask.map_or(true, |m| m[i]);
        out[i] = if included {
            let mapped = bounded_from_unconstrained(theta[source], bounds.lower[i], bounds.upper[i]);
            source += 1;
            mapped
        } else {
            0.0
        };
    }
    Ok(())
}

/// Gather a model-space coefficient vector into optimizer space (the inverse
/// of [`scatter_theta`] on the free coordinates).
pub fn gather_theta(
    coeffs: ArrayView1<'_, f64>, bounds: &ParamBounds, mask: Option<&[bool]>,
) -> Array1<f64> {
    let free: Vec<f64> = coeffs
        .iter()
        .enumerate()
        .filter(|(i, _)| mask.map_or(true, |m| m[*i]))
        .map(|(i, &v)| unconstrained_from_bounded(v, bounds.lower[i], bounds.upper[i]))
        .collect();
    Array1::from(free)
}

/// Constrained **model-space** parameters for a fitted (or candidate) model.
///
/// Invariants are validated at construction; use this type to evaluate the
/// recursion, the unconditional variance, and to generate forecasts in model
/// space.
#[derive(Debug, Clone, PartialEq)]
pub struct VolParams {
    pub family: VolFamily,
    pub shape: VolShape,
    /// Full-length coefficient vector in layout order.
    pub coeffs: Array1<f64>,
}

impl VolParams {
    /// Create validated model-space parameters.
    ///
    /// Validates the vector length against the layout, the intercept's strict
    /// positivity, and every coordinate against the constraint box.
    pub fn new(family: VolFamily, shape: VolShape, coeffs: Array1<f64>) -> ParamResult<Self> {
        let expected = nparams(family, shape.p, shape.q);
        if coeffs.len() != expected {
            return Err(ParamError::CoeffLengthMismatch { expected, actual: coeffs.len() });
        }
        validate_intercept(coeffs[ParamLayout::INTERCEPT])?;
        let bounds = constraints(family, shape.p, shape.q);
        validate_within_bounds(coeffs.view(), &bounds)?;
        Ok(VolParams { family, shape, coeffs })
    }

    /// Build validated parameters from an optimizer-space vector θ.
    ///
    /// θ carries the free coordinates in layout order (all coordinates, or
    /// the mask's true positions); masked-out coefficients are fixed at zero.
    pub fn from_theta(
        family: VolFamily, shape: VolShape, theta: ArrayView1<'_, f64>, mask: Option<&[bool]>,
    ) -> ParamResult<Self> {
        let bounds = constraints(family, shape.p, shape.q);
        let mut coeffs = Array1::zeros(nparams(family, shape.p, shape.q));
        scatter_theta(theta, &bounds, mask, &mut coeffs)?;
        VolParams::new(family, shape, coeffs)
    }

    /// Map model-space parameters to optimizer space.
    ///
    /// Returns a newly allocated vector of the free coordinates, suitable as
    /// an optimizer starting point.
    pub fn to_theta(&self, mask: Option<&[bool]>) -> Array1<f64> {
        let bounds = constraints(self.family, self.shape.p, self.shape.q);
        gather_theta(self.coeffs.view(), &bounds, mask)
    }

    /// Bounds-checked view over the coefficient vector.
    pub fn view(&self) -> CoeffView<'_> {
        let layout = ParamLayout::new(self.family, self.shape.p, self.shape.q);
        CoeffView::new(self.coeffs.view(), layout)
            .expect("validated at construction")
    }

    /// Model-implied long-run variance under these parameters.
    ///
    /// # Errors
    /// Propagates `NonStationaryParams` for infeasible coefficient mass.
    pub fn uncond_variance(&self) -> VolResult<f64> {
        unconditional_variance(self.family, &self.view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volatility::core::subset::subset_mask;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Scatter/gather round trips with and without a subset mask.
    // - Constructor validation against the constraint box.
    //
    // They intentionally DO NOT cover:
    // - The recursion driven from these parameters (recursion tests).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // θ round-trips through model space: gather then scatter reproduces the
    // coefficients.
    //
    // Given
    // -----
    // - A feasible Garch(1, 1) vector [0.05, 0.85, 0.05].
    //
    // Expect
    // ------
    // - `from_theta(to_theta(coeffs))` returns the same coefficients within
    //   1e-10.
    fn theta_round_trip_without_mask() {
        // Arrange
        let shape = VolShape::new(1, 1, 100).unwrap();
        let params =
            VolParams::new(VolFamily::Garch, shape, array![0.05, 0.85, 0.05]).unwrap();

        // Act
        let theta = params.to_theta(None);
        let back = VolParams::from_theta(VolFamily::Garch, shape, theta.view(), None).unwrap();

        // Assert
        for (&a, &b) in params.coeffs.iter().zip(back.coeffs.iter()) {
            assert_relative_eq!(a, b, max_relative = 1e-10);
        }
    }

    #[test]
    // Purpose
    // -------
    // Under a subset mask, θ covers only the free coordinates and scatter
    // pins the rest at zero.
    //
    // Given
    // -----
    // - TGarch full order (2, 1) restricted to (1, 1): mask
    //   [ω, β1, α1, η1, λ1] free, β2 fixed.
    //
    // Expect
    // ------
    // - θ has 5 entries; the reconstructed vector has β2 = 0 and matches the
    //   free coordinates.
    fn theta_round_trip_with_subset_mask() {
        // Arrange
        let shape = VolShape::new(2, 1, 100).unwrap();
        let mask = subset_mask(VolFamily::TGarch, 2, 1, (1, 1)).unwrap();
        let coeffs = array![0.05, 0.8, 0.0, 0.05, 0.2, -0.1];
        let params = VolParams::new(VolFamily::TGarch, shape, coeffs).unwrap();

        // Act
        let theta = params.to_theta(Some(&mask));
        let back =
            VolParams::from_theta(VolFamily::TGarch, shape, theta.view(), Some(&mask)).unwrap();

        // Assert
        assert_eq!(theta.len(), 5);
        assert_eq!(back.coeffs[2], 0.0);
        for (&a, &b) in params.coeffs.iter().zip(back.coeffs.iter()) {
            assert_relative_eq!(a, b, max_relative = 1e-9, epsilon = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // `VolParams::new` rejects vectors that escape the constraint box or
    // carry a non-positive intercept.
    //
    // Given
    // -----
    // - Garch(1, 1) with β = 1.5, and with ω = 0.
    //
    // Expect
    // ------
    // - `OutOfBounds` and `InvalidIntercept` respectively.
    fn new_rejects_out_of_box_and_bad_intercept() {
        // Arrange
        let shape = VolShape::new(1, 1, 100).unwrap();

        // Act & Assert
        assert!(matches!(
            VolParams::new(VolFamily::Garch, shape, array![0.05, 1.5, 0.05]),
            Err(ParamError::OutOfBounds { index: 1, .. })
        ));
        assert!(matches!(
            VolParams::new(VolFamily::Garch, shape, array![0.0, 0.5, 0.05]),
            Err(ParamError::InvalidIntercept { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Any finite θ scatters to a coefficient vector inside the constraint
    // box (so the optimizer can never leave the feasible region).
    //
    // Given
    // -----
    // - EGarch(1, 1) with extreme θ values.
    //
    // Expect
    // ------
    // - `from_theta` succeeds and validation (run inside `new`) passes.
    fn extreme_theta_still_maps_into_the_box() {
        // Arrange
        let shape = VolShape::new(1, 1, 100).unwrap();
        let theta = array![40.0, -35.0, 12.0, -50.0];

        // Act
        let params = VolParams::from_theta(VolFamily::EGarch, shape, theta.view(), None);

        // Assert
        assert!(params.is_ok(), "extreme theta must stay feasible: {params:?}");
    }
}
