//! Variance guards — enforce lower/upper bounds on the variance recursion.
//!
//! Purpose
//! -------
//! Provide a small, validated container for the clamp bounds applied to the
//! conditional-variance process σ²_t during recursion and likelihood
//! evaluation, keeping it within a safe numeric range.
//!
//! Key behaviors
//! -------------
//! - Construct [`VarianceGuards`] values that enforce strict positivity and
//!   finiteness of the lower/upper bounds.
//! - Reject invalid guard configurations via typed errors (`VolError`) instead
//!   of panicking at call sites.
//! - Expose simple `min`/`max` fields that the recursion kernel uses to clamp
//!   each computed variance.
//!
//! Invariants & assumptions
//! ------------------------
//! - `min < max` must hold for all constructed guards.
//! - Both `min` and `max` must be finite floating-point values.
//! - `min > 0.0` to keep the log-variance buffer and likelihood terms
//!   well-defined.
//! - Callers are responsible for choosing bounds that are reasonable for the
//!   scale of their residuals; this module only enforces basic numeric sanity.
//!
//! Conventions
//! -----------
//! - Guards are represented as a pair `(min, max)` in squared residual units
//!   and are stored as `f64`.
//! - Invalid configurations return `VolError::InvalidVarianceGuards` rather
//!   than panicking.
//!
//! Downstream usage
//! ----------------
//! - Construct [`VarianceGuards`] once at model setup and pass them into the
//!   recursion so each σ²_t is clamped after the degeneracy policy runs.
//! - Treat this module as part of the public surface for configuring numeric
//!   safety in variance recursions.
//!
//! Testing notes
//! -------------
//! - Unit tests validate that `VarianceGuards::new` accepts valid `(min, max)`
//!   pairs and rejects non-finite bounds, non-positive `min`, and
//!   `min >= max` with the correct error payload.
//! - Behavior of guards inside full recursions is covered by the recursion
//!   module tests rather than here.
use crate::volatility::errors::{VolError, VolResult};

/// Lower/upper clamp bounds for the conditional-variance recursion.
///
/// Invariants (enforced at construction):
/// - `min > 0.0`
/// - `min < max`
/// - both bounds finite
///
/// The type is `Copy` and cheap to pass by value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarianceGuards {
    /// Lower bound for σ² (strictly > 0).
    pub min: f64,
    /// Upper bound for σ² (must be > `min`).
    pub max: f64,
}

impl VarianceGuards {
    /// Construct validated variance bounds from a `(min, max)` tuple.
    ///
    /// Parameters
    /// ----------
    /// - `value`: `(f64, f64)`
    ///   Tuple `(min, max)` specifying the desired lower and upper clamp
    ///   bounds on σ²_t, in squared residual units.
    ///
    /// Returns
    /// -------
    /// `VolResult<VarianceGuards>`
    ///   - `Ok(VarianceGuards)` when `0.0 < min < max` and both bounds are
    ///     finite.
    ///   - `Err(VolError::InvalidVarianceGuards { .. })` when the provided
    ///     tuple violates any of the guard invariants.
    ///
    /// Errors
    /// ------
    /// - `VolError::InvalidVarianceGuards`
    ///   Returned when `min >= max`, either bound is not finite, or
    ///   `min <= 0.0` (which would make log-variance terms ill-defined).
    ///
    /// Panics
    /// ------
    /// - Never panics; all invalid inputs are reported via
    ///   `VolError::InvalidVarianceGuards`.
    ///
    /// Notes
    /// -----
    /// - This constructor centralizes guard validation so the recursion can
    ///   assume `0.0 < min < max` and finiteness without rechecking.
    /// - Choose ranges wide enough not to bias the model but tight enough to
    ///   prevent numerical pathologies.
    pub fn new(value: (f64, f64)) -> VolResult<Self> {
        if value.0 >= value.1 {
            return Err(VolError::InvalidVarianceGuards {
                min: value.0,
                max: value.1,
                reason: "Variance guards must have min < max.",
            });
        }

        if !value.0.is_finite() || !value.1.is_finite() {
            return Err(VolError::InvalidVarianceGuards {
                min: value.0,
                max: value.1,
                reason: "Variance guards must be finite.",
            });
        }

        if value.0 <= 0.0 {
            return Err(VolError::InvalidVarianceGuards {
                min: value.0,
                max: value.1,
                reason: "Variance guards must be strictly positive.",
            });
        }

        Ok(VarianceGuards { min: value.0, max: value.1 })
    }
}

impl Default for VarianceGuards {
    /// Wide default range suitable for residuals on an ordinary scale.
    fn default() -> Self {
        VarianceGuards { min: 1e-12, max: 1e12 }
    }
}
