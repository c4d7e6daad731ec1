//! Residual data container for volatility models.
//!
//! Purpose
//! -------
//! Provide a small, validated container for the residual series produced by
//! an upstream mean specification. This centralizes input validation so
//! recursion and likelihood code can assume clean, finite data.
//!
//! Key behaviors
//! -------------
//! - [`ResidualData`] enforces non-emptiness, finiteness, and an in-bounds
//!   burn-in index `t0` when present.
//! - Residuals may take any sign; only NaN/±∞ are rejected.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; `t0` marks the first observation included in the
//!   likelihood sum. It has no effect on the recursion itself, which always
//!   runs over the full series so `(ε_t, σ²_t)` stay aligned.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the happy path, the empty series, non-finite values,
//!   and out-of-range `t0`.
use crate::volatility::errors::{VolError, VolResult};
use ndarray::Array1;

/// Validated residual series plus an optional likelihood burn-in index.
///
/// Invariants
/// ----------
/// - `data.len() > 0`
/// - all entries finite
/// - if `t0` is `Some(i)`, then `i < data.len()`
#[derive(Debug, Clone, PartialEq)]
pub struct ResidualData {
    /// Observed residuals (observed value minus conditional mean).
    pub data: Array1<f64>,
    /// Optional index of the first observation in the likelihood window.
    pub t0: Option<usize>,
}

impl ResidualData {
    /// Construct a validated [`ResidualData`] instance from raw residuals.
    ///
    /// # Errors
    /// - [`VolError::EmptySeries`] when `data` is empty.
    /// - [`VolError::NonFiniteData`] with the first offending index/value.
    /// - [`VolError::T0OutOfRange`] when `t0` is `Some(i)` with
    ///   `i >= data.len()`.
    pub fn new(data: Array1<f64>, t0: Option<usize>) -> VolResult<Self> {
        if data.is_empty() {
            return Err(VolError::EmptySeries);
        }
        for (index, &value) in data.iter().enumerate() {
            if !value.is_finite() {
                return Err(VolError::NonFiniteData { index, value });
            }
        }
        if let Some(t0_val) = t0 {
            if t0_val >= data.len() {
                return Err(VolError::T0OutOfRange { t0: t0_val, len: data.len() });
            }
        }
        Ok(ResidualData { data, t0 })
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
    // - Construction behavior of `ResidualData::new` for valid input, empty
    //   series, non-finite values, and out-of-range `t0`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Valid residuals of any sign are accepted, with and without t0.
    //
    // Given
    // -----
    // - [0.5, -1.2, 0.0] with t0 = Some(1).
    //
    // Expect
    // ------
    // - Construction succeeds and stores the fields unchanged.
    fn new_accepts_signed_residuals() {
        // Arrange & Act
        let data = ResidualData::new(array![0.5, -1.2, 0.0], Some(1)).unwrap();

        // Assert
        assert_eq!(data.data.len(), 3);
        assert_eq!(data.t0, Some(1));
    }

    #[test]
    // Purpose
    // -------
    // Empty series, non-finite values, and out-of-range t0 are rejected with
    // their specific variants.
    //
    // Given
    // -----
    // - An empty array; [0.5, NaN]; [0.5, 1.0] with t0 = 2.
    //
    // Expect
    // ------
    // - EmptySeries, NonFiniteData at index 1, T0OutOfRange.
    fn new_rejects_invalid_input() {
        // Arrange & Act & Assert
        assert_eq!(
            ResidualData::new(Array1::zeros(0), None).unwrap_err(),
            VolError::EmptySeries
        );
        assert!(matches!(
            ResidualData::new(array![0.5, f64::NAN], None).unwrap_err(),
            VolError::NonFiniteData { index: 1, .. }
        ));
        assert_eq!(
            ResidualData::new(array![0.5, 1.0], Some(2)).unwrap_err(),
            VolError::T0OutOfRange { t0: 2, len: 2 }
        );
    }
}
