//! Validation helpers — reusable checks for coefficients, lags, and optimizer
//! inputs.
//!
//! Purpose
//! -------
//! Centralize small, reusable validation routines used across the volatility
//! stack. These helpers enforce basic sanity checks for presample lags,
//! model-space coefficient vectors, and unconstrained optimizer inputs θ, so
//! higher-level constructors and models can fail fast with structured errors.
//!
//! Key behaviors
//! -------------
//! - Validate presample variance/residual lags against shape, finiteness, and
//!   (for variances) strict positivity.
//! - Validate full coefficient vectors against their constraint box.
//! - Validate unconstrained optimizer inputs θ before mapping into model
//!   space.
//!
//! Conventions
//! -----------
//! - Indices are 0-based and follow the usual Rust/ndarray conventions.
//! - Validation functions return [`VolResult`] or [`ParamResult`] and never
//!   panic on invalid *inputs*; panics are reserved for programming errors
//!   elsewhere (e.g., shape mismatches in other modules).
//! - This module contains no I/O and no logging; it only inspects numeric
//!   values and array lengths.
use crate::volatility::{
    core::constraints::ParamBounds,
    errors::{ParamError, ParamResult, VolError, VolResult},
};
use ndarray::{Array1, ArrayView1};

/// Validate presample **variance** lags (length p).
///
/// Every element must be finite and strictly positive; the length must match
/// the variance-lag order `p`.
///
/// # Errors
/// - [`VolError::InvalidVarianceLength`] if `variance_lags.len() != p`.
/// - [`VolError::InvalidVarianceLags`] with the first offending index/value.
pub fn validate_variance_lags(variance_lags: &Array1<f64>, p: usize) -> VolResult<()> {
    if variance_lags.len() != p {
        return Err(VolError::InvalidVarianceLength { expected: p, actual: variance_lags.len() });
    }
    for (index, &value) in variance_lags.iter().enumerate() {
        if !value.is_finite() || value <= 0.0 {
            return Err(VolError::InvalidVarianceLags { index, value });
        }
    }
    Ok(())
}

/// Validate presample **residual** lags (length q).
///
/// Residuals may take any sign, so only finiteness and length are checked.
///
/// # Errors
/// - [`VolError::InvalidResidualLength`] if `residual_lags.len() != q`.
/// - [`VolError::InvalidResidualLags`] with the first offending index/value.
pub fn validate_residual_lags(residual_lags: &Array1<f64>, q: usize) -> VolResult<()> {
    if residual_lags.len() != q {
        return Err(VolError::InvalidResidualLength { expected: q, actual: residual_lags.len() });
    }
    for (index, &value) in residual_lags.iter().enumerate() {
        if !value.is_finite() {
            return Err(VolError::InvalidResidualLags { index, value });
        }
    }
    Ok(())
}

/// Validate the variance intercept ω.
///
/// # Errors
/// - [`ParamError::InvalidIntercept`] if `intercept` is NaN, ±∞, or ≤ 0.
pub fn validate_intercept(intercept: f64) -> ParamResult<()> {
    if intercept <= 0.0 || !intercept.is_finite() {
        return Err(ParamError::InvalidIntercept { value: intercept });
    }
    Ok(())
}

/// Validate a full coefficient vector against its constraint box.
///
/// Assumes the vector length has already been checked against the layout
/// (the bounds vectors carry the authoritative length).
///
/// # Errors
/// - [`ParamError::CoeffLengthMismatch`] if the lengths disagree.
/// - [`ParamError::OutOfBounds`] with the first escaping index/value.
pub fn validate_within_bounds(
    coeffs: ArrayView1<'_, f64>, bounds: &ParamBounds,
) -> ParamResult<()> {
    if coeffs.len() != bounds.lower.len() {
        return Err(ParamError::CoeffLengthMismatch {
            expected: bounds.lower.len(),
            actual: coeffs.len(),
        });
    }
    for (index, &value) in coeffs.iter().enumerate() {
        if !value.is_finite() || !bounds.contains(index, value) {
            return Err(ParamError::OutOfBounds {
                index,
                value,
                lower: bounds.lower[index],
                upper: bounds.upper[index],
            });
        }
    }
    Ok(())
}

/// Validate an unconstrained optimizer parameter vector θ.
///
/// Checks the expected length and that every entry is finite; the semantic
/// meaning of the coordinates is not inspected here.
///
/// # Errors
/// - [`ParamError::ThetaLengthMismatch`] if `theta.len() != expected_len`.
/// - [`ParamError::InvalidThetaInput`] with the first non-finite index/value.
pub fn validate_theta(theta: ArrayView1<'_, f64>, expected_len: usize) -> ParamResult<()> {
    if theta.len() != expected_len {
        return Err(ParamError::ThetaLengthMismatch {
            expected: expected_len,
            actual: theta.len(),
        });
    }
    for (index, &value) in theta.iter().enumerate() {
        if !value.is_finite() {
            return Err(ParamError::InvalidThetaInput { index, value });
        }
    }
    Ok(())
}

/// Validate inputs for a Gaussian log-likelihood term.
///
/// The residual must be finite (any sign); the variance must be finite and
/// strictly positive.
///
/// # Errors
/// - [`VolError::NonFiniteData`] if the residual is NaN or ±∞ (index 0 is
///   reported; the caller attaches the real position when it matters).
/// - [`VolError::InvalidVarianceLogLik`] if the variance is NaN, ±∞, or ≤ 0.
pub fn validate_loglik_inputs(residual: f64, variance: f64) -> VolResult<()> {
    if !residual.is_finite() {
        return Err(VolError::NonFiniteData { index: 0, value: residual });
    }
    if !variance.is_finite() || variance <= 0.0 {
        return Err(VolError::InvalidVarianceLogLik { value: variance });
    }
    Ok(())
}
