//! Unconditional (long-run) variance implied by a parameter vector.
//!
//! Solves the fixed point of the variance recursion under standard normal
//! shocks:
//!
//! ```text
//! v̄ = ω / (1 − Σ β_j − Σ α_i κ_i)
//! ```
//!
//! where `κ_i = E[g(z; η_i, λ_i)]` is the expectation of the family's
//! shock-response kernel at its parameters. For the additive threshold kernel
//! `g(z; η, λ) = (|z − η| − λ(z − η))²` the expectation has the closed form
//!
//! ```text
//! κ(η, λ) = (1 + λ²)(1 + η²) − 2λ[(1 + η²)(1 − 2Φ(η)) − 2ηφ(η)]
//! ```
//!
//! (Φ, φ the standard normal CDF and density), which reduces to `1` for the
//! plain GARCH kernel (`η = λ = 0`) and to `1 + λ²` for a pure skew. For the
//! log-space EGarch recursion the shock kernel
//! `α(|z| − √(2/π)) + γz` has expectation zero, so the fixed point lives in
//! log space: `ln v̄ = ω / (1 − Σ β_j)` and the returned value is its
//! exponential. This ignores the Jensen gap between `E[ln σ²]` and `ln E[σ²]`;
//! the value is used for presample seeding, where the log-space fixed point is
//! exactly the quantity the recursion converges to.
//!
//! A non-positive or non-finite denominator means the candidate parameter
//! vector is non-stationary; the solver reports this as
//! [`VolError::NonStationaryParams`] and callers reject the candidate.
use crate::volatility::{
    core::{family::VolFamily, layout::CoeffView},
    errors::{VolError, VolResult},
};
use statrs::distribution::{Continuous, ContinuousCDF, Normal};

/// Expected value of the family's shock-response kernel under a standard
/// normal shock.
///
/// - `Garch`: the kernel is `z²`, so κ = 1 regardless of the arguments.
/// - `TGarch`: the closed form above, evaluated at `(shift, skew)`.
/// - `EGarch`: the log-space kernel is mean-zero, so κ = 0.
pub fn shock_kernel_expectation(family: VolFamily, shift: f64, skew: f64) -> f64 {
    match family {
        VolFamily::Garch => 1.0,
        VolFamily::TGarch => {
            let normal = Normal::standard();
            let cdf = normal.cdf(shift);
            let pdf = normal.pdf(shift);
            let second_moment = 1.0 + shift * shift;
            (1.0 + skew * skew) * second_moment
                - 2.0 * skew * (second_moment * (1.0 - 2.0 * cdf) - 2.0 * shift * pdf)
        }
        VolFamily::EGarch => 0.0,
    }
}

/// Model-implied long-run variance for a validated coefficient view.
///
/// # Errors
/// - [`VolError::NonStationaryParams`] when the stationarity denominator is
///   non-positive or non-finite, or when the implied variance itself is
///   non-finite. Callers treat this as "infeasible candidate", not as a fatal
///   failure.
pub fn unconditional_variance(family: VolFamily, coeffs: &CoeffView<'_>) -> VolResult<f64> {
    let sum_persistence = coeffs.persistence().sum();
    match family {
        VolFamily::Garch | VolFamily::TGarch => {
            let mut response_mass = 0.0;
            let response = coeffs.response();
            for (i, &alpha) in response.iter().enumerate() {
                let (shift, skew) = match family {
                    VolFamily::TGarch => (coeffs.aux(0)[i], coeffs.aux(1)[i]),
                    _ => (0.0, 0.0),
                };
                response_mass += alpha * shock_kernel_expectation(family, shift, skew);
            }
            let denominator = 1.0 - sum_persistence - response_mass;
            if !denominator.is_finite() || denominator <= 0.0 {
                return Err(VolError::NonStationaryParams { denominator });
            }
            Ok(coeffs.intercept() / denominator)
        }
        VolFamily::EGarch => {
            let denominator = 1.0 - sum_persistence;
            if !denominator.is_finite() || denominator <= 0.0 {
                return Err(VolError::NonStationaryParams { denominator });
            }
            let value = (coeffs.intercept() / denominator).exp();
            if !value.is_finite() {
                return Err(VolError::NonStationaryParams { denominator });
            }
            Ok(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volatility::core::layout::ParamLayout;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Closed-form values of the shock-kernel expectation at known points.
    // - The long-run variance formula per family and its non-stationarity
    //   rejection.
    //
    // They intentionally DO NOT cover:
    // - Convergence of the recursion to the fixed point (recursion tests).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // The threshold kernel expectation matches its known special cases.
    //
    // Given
    // -----
    // - (η, λ) = (0, 0), (0, 0.5), (0, −0.5).
    //
    // Expect
    // ------
    // - κ(0, 0) = 1 (plain GARCH), κ(0, ±0.5) = 1 + 0.25.
    fn kappa_matches_known_special_cases() {
        // Arrange & Act & Assert
        assert_relative_eq!(
            shock_kernel_expectation(VolFamily::TGarch, 0.0, 0.0),
            1.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            shock_kernel_expectation(VolFamily::TGarch, 0.0, 0.5),
            1.25,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            shock_kernel_expectation(VolFamily::TGarch, 0.0, -0.5),
            1.25,
            max_relative = 1e-12
        );
        assert_eq!(shock_kernel_expectation(VolFamily::Garch, 0.0, 0.0), 1.0);
        assert_eq!(shock_kernel_expectation(VolFamily::EGarch, 0.0, 0.0), 0.0);
    }

    #[test]
    // Purpose
    // -------
    // A nonzero shift enters the expectation through the second moment
    // E[(z − η)²] = 1 + η² when the skew is zero.
    //
    // Given
    // -----
    // - (η, λ) = (0.7, 0).
    //
    // Expect
    // ------
    // - κ = 1 + 0.49.
    fn kappa_with_shift_only_is_second_moment() {
        // Arrange & Act
        let kappa = shock_kernel_expectation(VolFamily::TGarch, 0.7, 0.0);

        // Assert
        assert_relative_eq!(kappa, 1.49, max_relative = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // The long-run variance of a symmetric TGarch(1, 1) vector is
    // ω / (1 − β − α·κ) with κ = 1.
    //
    // Given
    // -----
    // - [ω, β, α, η, λ] = [0.05, 0.85, 0.05, 0, 0].
    //
    // Expect
    // ------
    // - v̄ = 0.05 / 0.1 = 0.5.
    fn uncond_variance_matches_reference_tgarch() {
        // Arrange
        let layout = ParamLayout::new(VolFamily::TGarch, 1, 1);
        let coeffs = array![0.05, 0.85, 0.05, 0.0, 0.0];
        let view = CoeffView::new(coeffs.view(), layout).unwrap();

        // Act
        let v = unconditional_variance(VolFamily::TGarch, &view).unwrap();

        // Assert
        assert_relative_eq!(v, 0.5, max_relative = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // A persistence + response mass at or above one is rejected as
    // non-stationary.
    //
    // Given
    // -----
    // - Garch(1, 1) with β = 0.9, α = 0.2 (mass 1.1).
    //
    // Expect
    // ------
    // - `VolError::NonStationaryParams` with a negative denominator.
    fn uncond_variance_rejects_non_stationary_mass() {
        // Arrange
        let layout = ParamLayout::new(VolFamily::Garch, 1, 1);
        let coeffs = array![0.05, 0.9, 0.2];
        let view = CoeffView::new(coeffs.view(), layout).unwrap();

        // Act
        let result = unconditional_variance(VolFamily::Garch, &view);

        // Assert
        match result {
            Err(VolError::NonStationaryParams { denominator }) => {
                assert!(denominator < 0.0);
            }
            other => panic!("expected NonStationaryParams, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // The EGarch fixed point lives in log space and exponentiates to a
    // positive variance.
    //
    // Given
    // -----
    // - EGarch(1, 1) with ω = 0.2, β = 0.6, α = 0.1, γ = −0.05.
    //
    // Expect
    // ------
    // - v̄ = exp(0.2 / 0.4) = exp(0.5).
    fn uncond_variance_exponentiates_for_egarch() {
        // Arrange
        let layout = ParamLayout::new(VolFamily::EGarch, 1, 1);
        let coeffs = array![0.2, 0.6, 0.1, -0.05];
        let view = CoeffView::new(coeffs.view(), layout).unwrap();

        // Act
        let v = unconditional_variance(VolFamily::EGarch, &view).unwrap();

        // Assert
        assert_relative_eq!(v, 0.5_f64.exp(), max_relative = 1e-12);
    }
}
