//! Model order (p, q) for conditional-variance models.
//!
//! Convention used throughout the crate:
//! - `p`: number of **variance lags** (coefficients β₁…β_p on past σ²'s).
//! - `q`: number of **shock lags** (coefficients α₁…α_q on past residuals).
//!
//! At least one of `p` or `q` must be > 0 for a model to have dynamics. The
//! pure layout functions in [`super::layout`] deliberately accept any order
//! pair including `(0, 0)`; rejecting degenerate combinations is the job of
//! this constructor, which sits on the model-construction path.
use crate::volatility::errors::{VolError, VolResult};

/// Order of a conditional-variance model.
///
/// - `p`: number of lagged variances (β terms)
/// - `q`: number of lagged shocks (α terms)
///
/// Invariant: not both zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolShape {
    pub p: usize,
    pub q: usize,
}

impl VolShape {
    /// Construct a [`VolShape`] and validate it against the sample size `n`.
    ///
    /// # Invariants
    /// - Not both zero: at least one of `p` or `q` must be > 0.
    /// - Sufficient data: `p < n` and `q < n` so that the recursion has enough
    ///   in-sample observations to seed and run.
    ///
    /// # Arguments
    /// - `p`: number of variance lags (β terms).
    /// - `q`: number of shock lags (α terms).
    /// - `n`: number of available observations in the sample you plan to fit.
    ///
    /// # Errors
    /// - [`VolError::InvalidModelShape`] if `p == 0 && q == 0`.
    /// - [`VolError::InvalidModelShape`] if `p >= n` or `q >= n` (insufficient sample).
    ///
    /// # Rationale
    /// The variance recursion requires `p` prior variances and `q` prior
    /// shocks (or valid presample seeds) to be well-defined. Guarding here
    /// fails fast on under-identified specifications so downstream
    /// fitting/forecasting can assume `n >= max(p, q)`.
    pub fn new(p: usize, q: usize, n: usize) -> VolResult<Self> {
        if p == 0 && q == 0 {
            return Err(VolError::InvalidModelShape {
                param: p,
                reason: "Both p and q cannot be zero.",
            });
        }
        if p >= n {
            return Err(VolError::InvalidModelShape {
                param: p,
                reason: "p must be less than the number of observations.",
            });
        }
        if q >= n {
            return Err(VolError::InvalidModelShape {
                param: q,
                reason: "q must be less than the number of observations.",
            });
        }
        Ok(VolShape { p, q })
    }

    /// Presample length required to seed the recursion: `max(p, q)`.
    pub fn presample(&self) -> usize {
        self.p.max(self.q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // `VolShape::new` accepts valid orders and reports the presample length.
    //
    // Given
    // -----
    // - p = 2, q = 1, n = 100.
    //
    // Expect
    // ------
    // - Construction succeeds and `presample()` is max(p, q) = 2.
    fn shape_new_accepts_valid_orders() {
        // Arrange & Act
        let shape = VolShape::new(2, 1, 100).unwrap();

        // Assert
        assert_eq!(shape.p, 2);
        assert_eq!(shape.q, 1);
        assert_eq!(shape.presample(), 2);
    }

    #[test]
    // Purpose
    // -------
    // `VolShape::new` rejects the degenerate (0, 0) order and orders that do
    // not fit the sample.
    //
    // Given
    // -----
    // - (0, 0) with any n; (5, 1) with n = 5.
    //
    // Expect
    // ------
    // - `VolError::InvalidModelShape` in both cases.
    fn shape_new_rejects_degenerate_and_oversized_orders() {
        // Arrange & Act & Assert
        assert!(matches!(VolShape::new(0, 0, 100), Err(VolError::InvalidModelShape { .. })));
        assert!(matches!(VolShape::new(5, 1, 5), Err(VolError::InvalidModelShape { .. })));
        assert!(matches!(VolShape::new(1, 7, 7), Err(VolError::InvalidModelShape { .. })));
    }
}
