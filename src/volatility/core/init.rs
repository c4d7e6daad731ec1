//! Initialization policies for presample lags — control how the variance and
//! residual history is seeded.
//!
//! Purpose
//! -------
//! Provide a small set of policies for the presample variance and residual
//! lags required by the recursion before real observations begin. This
//! centralizes how presample state is seeded so estimation and forecasting
//! code can choose between unconditional-variance, sample-variance,
//! fixed-scalar, or fully specified vector initializations in a uniform way.
//!
//! Key behaviors
//! -------------
//! - Represent presample initialization as an explicit policy via [`Init`].
//! - Validate fixed-scalar and fixed-vector policies: variance lags must be
//!   finite and strictly positive, residual lags finite (any sign), and
//!   vector lengths must agree with the requested order.
//! - Surface invalid configurations as typed errors (`VolError`) instead of
//!   panicking.
//!
//! Invariants & assumptions
//! ------------------------
//! - Presample variance lags must be finite and strictly positive.
//! - Presample residual lags must be finite; negative values are legitimate
//!   residuals.
//! - For vector-based initialization, variance-lag and residual-lag vectors
//!   must have lengths matching `p` and `q` respectively.
//! - This module does not compute the unconditional variance v̄ or the sample
//!   variance; it only encodes *how* those quantities will be used once
//!   available.
//!
//! Conventions
//! -----------
//! - `UncondVariance` is the default policy: the presample prefix is filled
//!   from the unconditional-variance solver at the current candidate
//!   parameters, per the model contract.
//! - Pattern-matching on `Init` in estimation / forecasting code should be
//!   exhaustive, so new policies added in the future will trigger compiler
//!   warnings where they need to be handled.
//!
//! Testing notes
//! -------------
//! - Unit tests verify that `Init::fixed` accepts finite, strictly positive
//!   scalars and rejects the rest, and that `Init::fixed_vector` enforces
//!   length and element-wise constraints.
//! - End-to-end behavior of these policies in recursions is covered by the
//!   recursion and model tests rather than here.
use crate::volatility::{
    core::validation::{validate_residual_lags, validate_variance_lags},
    errors::{VolError, VolResult},
};
use ndarray::Array1;

/// Policies for seeding presample variance and residual lags.
///
/// Variants
/// --------
/// - `UncondVariance`: fill the variance prefix with the model-implied
///   long-run variance v̄ and the residual prefix with `√v̄` (a one-sigma
///   shock, i.e. a standardized residual of exactly one).
/// - `SampleVariance`: same shape, but the seed level is the sample variance
///   of the observed residuals instead of v̄.
/// - `Fixed(f64)`: a single strictly positive variance level used the same
///   way.
/// - `FixedVector { variance_lags, residual_lags }`: fully explicit presample
///   state, lengths `p` and `q`.
#[derive(Debug, Clone, PartialEq)]
pub enum Init {
    /// Use the model-implied unconditional variance for all presample lags.
    UncondVariance,
    /// Use the sample variance of the observed residuals for all lags.
    SampleVariance,
    /// Use a strictly positive fixed variance level for all lags.
    Fixed(f64),
    /// Use explicitly provided presample vectors.
    ///
    /// - `variance_lags`: length p, supplies σ²_{-1}..σ²_{-p}
    /// - `residual_lags`: length q, supplies ε_{-1}..ε_{-q}
    FixedVector { variance_lags: Array1<f64>, residual_lags: Array1<f64> },
}

impl Init {
    /// Seed the presample from the model-implied unconditional variance.
    ///
    /// This constructor selects the policy only; the actual value is computed
    /// from the candidate parameters when the recursion is initialized.
    pub const fn uncond_variance() -> Self {
        Init::UncondVariance
    }

    /// Seed the presample from the sample variance of the observed residuals.
    pub const fn sample_variance() -> Self {
        Init::SampleVariance
    }

    /// Seed all presample lags with a fixed positive variance level.
    ///
    /// # Errors
    /// - [`VolError::InvalidInitFixed`] when `value` is non-finite or ≤ 0.
    pub fn fixed(value: f64) -> VolResult<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(VolError::InvalidInitFixed { value });
        }
        Ok(Init::Fixed(value))
    }

    /// Seed the presample with explicit variance and residual lag vectors.
    ///
    /// # Arguments
    /// - `variance_lags`: length `p`, finite and strictly positive.
    /// - `residual_lags`: length `q`, finite (any sign).
    ///
    /// # Errors
    /// - [`VolError::InvalidVarianceLength`] / [`VolError::InvalidVarianceLags`]
    ///   when the variance vector has the wrong length or invalid entries.
    /// - [`VolError::InvalidResidualLength`] / [`VolError::InvalidResidualLags`]
    ///   when the residual vector has the wrong length or non-finite entries.
    pub fn fixed_vector(
        variance_lags: Array1<f64>, residual_lags: Array1<f64>, p: usize, q: usize,
    ) -> VolResult<Self> {
        validate_variance_lags(&variance_lags, p)?;
        validate_residual_lags(&residual_lags, q)?;

        Ok(Init::FixedVector { variance_lags, residual_lags })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction of the four policies and the validation invariants of
    //   the fixed-scalar and fixed-vector variants.
    //
    // They intentionally DO NOT cover:
    // - How policies are applied inside the recursion (recursion tests).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // The const constructors encode their policy variants.
    //
    // Given
    // -----
    // - No inputs.
    //
    // Expect
    // ------
    // - `uncond_variance()` and `sample_variance()` match their variants.
    fn const_constructors_select_policies() {
        // Arrange & Act & Assert
        assert_eq!(Init::uncond_variance(), Init::UncondVariance);
        assert_eq!(Init::sample_variance(), Init::SampleVariance);
    }

    #[test]
    // Purpose
    // -------
    // `Init::fixed` accepts a positive finite level and rejects zero,
    // negative, and non-finite values.
    //
    // Given
    // -----
    // - 0.5, then 0.0, -1.0, NaN, +∞.
    //
    // Expect
    // ------
    // - `Ok(Init::Fixed(0.5))`, then `InvalidInitFixed` for each bad input.
    fn fixed_validates_scalar_level() {
        // Arrange & Act & Assert
        assert_eq!(Init::fixed(0.5), Ok(Init::Fixed(0.5)));
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(Init::fixed(bad), Err(VolError::InvalidInitFixed { .. })),
                "expected rejection for {bad}"
            );
        }
    }

    #[test]
    // Purpose
    // -------
    // `Init::fixed_vector` accepts matched, valid vectors and permits
    // negative residual lags.
    //
    // Given
    // -----
    // - variance lags [0.5, 0.7] (p = 2), residual lags [-0.3] (q = 1).
    //
    // Expect
    // ------
    // - `Ok(Init::FixedVector { .. })` with the provided vectors.
    fn fixed_vector_accepts_valid_lags_including_negative_residuals() {
        // Arrange
        let variance_lags = array![0.5, 0.7];
        let residual_lags = array![-0.3];

        // Act
        let init =
            Init::fixed_vector(variance_lags.clone(), residual_lags.clone(), 2, 1).unwrap();

        // Assert
        match init {
            Init::FixedVector { variance_lags: v, residual_lags: r } => {
                assert_eq!(v, variance_lags);
                assert_eq!(r, residual_lags);
            }
            other => panic!("expected FixedVector, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // `Init::fixed_vector` rejects wrong lengths and invalid elements.
    //
    // Given
    // -----
    // - Variance lags of length 1 against p = 2; a zero variance lag; a NaN
    //   residual lag.
    //
    // Expect
    // ------
    // - The matching error variant for each case.
    fn fixed_vector_rejects_bad_lengths_and_elements() {
        // Arrange & Act & Assert
        assert_eq!(
            Init::fixed_vector(array![0.5], array![0.1], 2, 1).unwrap_err(),
            VolError::InvalidVarianceLength { expected: 2, actual: 1 }
        );
        assert_eq!(
            Init::fixed_vector(array![0.5, 0.0], array![0.1], 2, 1).unwrap_err(),
            VolError::InvalidVarianceLags { index: 1, value: 0.0 }
        );
        let err = Init::fixed_vector(array![0.5, 0.6], array![f64::NAN], 2, 1).unwrap_err();
        assert!(matches!(err, VolError::InvalidResidualLags { index: 0, .. }));
    }
}
