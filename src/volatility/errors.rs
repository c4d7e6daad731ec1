//! Errors for conditional-volatility models (data validation, options checks,
//! recursion invariants, and optimizer failures).
//!
//! This module defines a model error type, [`VolError`], and a parameter error
//! type, [`ParamError`], used across the volatility stack. Both implement
//! `Display`/`Error`.
//!
//! ## Conventions
//! - **Indices are 0-based** (match Rust/ndarray).
//! - Residuals must be **finite** (any sign); variances must be **strictly
//!   positive and finite**.
//! - `t0` is an optional index marking the start of the likelihood window;
//!   it has **no effect** on the variance recursion and only controls how many
//!   initial observations are skipped when evaluating the log-likelihood.
//! - Configuration mistakes (length mismatches, invalid orders, inconsistent
//!   subset masks) are fatal and surface as [`ParamError`] at construction
//!   time, never inside the hot recursion loop.
//! - A non-positive unconditional-variance denominator is **recoverable**: it
//!   signals an infeasible candidate ([`VolError::NonStationaryParams`]) that
//!   the optimizer rejects rather than an aborted run.
//! - Optimizer/backend errors are normalized to
//!   [`VolError::OptimizationFailed`] with a human-readable status.

/// Crate-wide result alias for volatility-model operations that may produce
/// [`VolError`].
pub type VolResult<T> = Result<T, VolError>;

/// Result alias for parameter-construction/validation paths that may produce
/// [`ParamError`].
pub type ParamResult<T> = Result<T, ParamError>;

/// Unified error type for conditional-volatility modeling.
///
/// Covers input/data validation, options checks, recursion/structural
/// invariants, stationarity rejections, and estimation failures.
#[derive(Debug, Clone, PartialEq)]
pub enum VolError {
    // ---- Input/data validation ----
    /// Series is empty.
    EmptySeries,

    /// A data point is NaN/±inf.
    NonFiniteData { index: usize, value: f64 },

    /// Requested burn-in exceeds series length.
    T0OutOfRange { t0: usize, len: usize },

    // ---- Model shape ----
    /// At least one model order must be > 0 and both must fit the sample.
    InvalidModelShape { param: usize, reason: &'static str },

    // ---- Options validation ----
    /// Variance guards must be finite with 0 < min < max.
    InvalidVarianceGuards { min: f64, max: f64, reason: &'static str },

    /// Init::Fixed(v) must be finite and > 0.
    InvalidInitFixed { value: f64 },

    /// Init::FixedVector must have residual lags length equal to q.
    InvalidResidualLength { expected: usize, actual: usize },

    /// Init::FixedVector's residual lags must be finite.
    InvalidResidualLags { index: usize, value: f64 },

    /// Init::FixedVector must have variance lags length equal to p.
    InvalidVarianceLength { expected: usize, actual: usize },

    /// Init::FixedVector's variance lags must be finite and > 0.
    InvalidVarianceLags { index: usize, value: f64 },

    // ---- Model/recursion invariants ----
    /// Recursion produced a non-finite variance (after guards/clamps).
    NonFiniteVariance { t: usize, value: f64 },

    /// Variance value fed to the log-likelihood must be finite and > 0.
    InvalidVarianceLogLik { value: f64 },

    // ---- Stationarity ----
    /// Unconditional-variance denominator is non-positive or non-finite.
    ///
    /// Signals an infeasible candidate parameter vector; callers reject the
    /// candidate (e.g. as a `-inf` likelihood) instead of aborting.
    NonStationaryParams { denominator: f64 },

    // ---- Estimation / optimizer ----
    /// Optimizer failed; include a human-readable status/reason.
    OptimizationFailed { status: String },

    /// Model hasn't been fitted yet.
    ModelNotFitted,
}

impl std::error::Error for VolError {}

impl std::fmt::Display for VolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            VolError::EmptySeries => {
                write!(f, "Input series is empty.")
            }
            VolError::NonFiniteData { index, value } => {
                write!(f, "Data point at index {index} is non-finite: {value}")
            }
            VolError::T0OutOfRange { t0, len } => {
                write!(f, "Burn-in t0 ({t0}) exceeds series length ({len}).")
            }
            // ---- Model shape ----
            VolError::InvalidModelShape { param, reason } => {
                write!(f, "Invalid model order; got: {param}. {reason}")
            }
            // ---- Options validation ----
            VolError::InvalidVarianceGuards { min, max, reason } => {
                write!(
                    f,
                    "Variance guards must be finite with 0 < min ({min}) < max ({max}); {reason}"
                )
            }
            VolError::InvalidInitFixed { value } => {
                write!(f, "Init::Fixed must be finite and > 0; got: {value}")
            }
            VolError::InvalidResidualLength { expected, actual } => {
                write!(
                    f,
                    "Init::FixedVector must have residual lags length equal to q: expected {expected}, got {actual}"
                )
            }
            VolError::InvalidResidualLags { index, value } => {
                write!(
                    f,
                    "Init::FixedVector's residual lags must be finite; index {index} has value {value}"
                )
            }
            VolError::InvalidVarianceLength { expected, actual } => {
                write!(
                    f,
                    "Init::FixedVector must have variance lags length equal to p: expected {expected}, got {actual}"
                )
            }
            VolError::InvalidVarianceLags { index, value } => {
                write!(
                    f,
                    "Init::FixedVector's variance lags must be finite and > 0; index {index} has value {value}"
                )
            }
            // ---- Model/recursion invariants ----
            VolError::NonFiniteVariance { t, value } => {
                write!(f, "Recursion produced non-finite variance at index {t}: {value}")
            }
            VolError::InvalidVarianceLogLik { value } => {
                write!(
                    f,
                    "Variance value for log-likelihood must be strictly positive and finite; got: {value}"
                )
            }
            // ---- Stationarity ----
            VolError::NonStationaryParams { denominator } => {
                write!(
                    f,
                    "Parameters imply a non-stationary recursion: unconditional-variance denominator is {denominator}"
                )
            }
            // ---- Estimation / optimizer ----
            VolError::OptimizationFailed { status } => {
                write!(f, "Optimizer failed with status: {status}")
            }
            VolError::ModelNotFitted => {
                write!(f, "Model hasn't been fitted yet.")
            }
        }
    }
}

/// Errors specific to parameter layout, subset masks, and coefficient
/// validation.
///
/// Every variant is a configuration error in the sense of the error taxonomy:
/// it indicates a caller bug (wrong lengths, out-of-range orders, inconsistent
/// masks) and is raised at construction/setup time, never during the recursion.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    /// Model-space coefficient vector length does not match the layout.
    CoeffLengthMismatch { expected: usize, actual: usize },

    /// Optimizer-space theta length mismatch.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// Unconstrained optimization input must have finite values.
    InvalidThetaInput { index: usize, value: f64 },

    /// Intercept must be finite and > 0.
    InvalidIntercept { value: f64 },

    /// Persistence coordinates must be finite.
    InvalidPersistence { index: usize, value: f64 },

    /// Response coordinates must be finite.
    InvalidResponse { index: usize, value: f64 },

    /// A coefficient escaped its constraint box.
    OutOfBounds { index: usize, value: f64, lower: f64, upper: f64 },

    /// Requested subset order exceeds the full order.
    SubsetOrderOutOfRange { requested: usize, max: usize, segment: &'static str },

    /// Subset mask length does not match the full parameter layout.
    MaskLengthMismatch { expected: usize, actual: usize },

    /// Subset mask violates the lowest-lags-first inclusion policy.
    MaskInconsistent { reason: &'static str },
}

impl std::error::Error for ParamError {}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamError::CoeffLengthMismatch { expected, actual } => {
                write!(f, "Coefficient vector length mismatch: expected {expected}, got {actual}")
            }
            ParamError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, got {actual}")
            }
            ParamError::InvalidThetaInput { index, value } => {
                write!(f, "Theta input at index {index} must be finite, got {value}")
            }
            ParamError::InvalidIntercept { value } => {
                write!(f, "Intercept must be finite and > 0, got {value}")
            }
            ParamError::InvalidPersistence { index, value } => {
                write!(f, "Persistence coordinate at index {index} must be finite, got {value}")
            }
            ParamError::InvalidResponse { index, value } => {
                write!(f, "Response coordinate at index {index} must be finite, got {value}")
            }
            ParamError::OutOfBounds { index, value, lower, upper } => {
                write!(
                    f,
                    "Coefficient at index {index} is {value}, outside its box [{lower}, {upper}]"
                )
            }
            ParamError::SubsetOrderOutOfRange { requested, max, segment } => {
                write!(
                    f,
                    "Subset order for the {segment} segment is {requested}, exceeding the full order {max}"
                )
            }
            ParamError::MaskLengthMismatch { expected, actual } => {
                write!(f, "Subset mask length mismatch: expected {expected}, got {actual}")
            }
            ParamError::MaskInconsistent { reason } => {
                write!(f, "Subset mask is inconsistent: {reason}")
            }
        }
    }
}
