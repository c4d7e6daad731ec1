//! Numerical stability utilities.
//!
//! Provides safe implementations of common nonlinear transforms
//! that are prone to overflow/underflow in naïve form.
//! The functions here follow guarded strategies similar to those
//! in major ML libraries (e.g. PyTorch, TensorFlow), using explicit
//! cutoffs (`x > 20.0`) to keep `f64` arithmetic in a well-conditioned regime.
//!
//! # Provided items
//! - [`INTERCEPT_EPS`]: a small ε buffer (default 1e-6) used as the strictly
//!   positive lower bound on variance intercepts and as the margin keeping
//!   EGARCH persistence coefficients away from ±1.
//! - [`LOGIT_EPS`]: clamp floor applied before taking logs of probabilities.
//! - [`safe_softplus(x)`] / [`safe_softplus_inv(x)`]: stable `ln(1 + exp(x))`
//!   and its inverse, mapping ℝ ↔ (0, ∞).
//! - [`safe_logistic(x)`] / [`safe_logit(p)`]: stable sigmoid and its inverse,
//!   mapping ℝ ↔ (0, 1).
//! - [`bounded_from_unconstrained`] / [`unconstrained_from_bounded`]: the
//!   per-coordinate box transform pair used to map optimizer space onto a
//!   `[lower, upper]` constraint box (half-open and unbounded boxes included).
//!
//! # Rationale
//! These transforms are building blocks in optimization and
//! probabilistic modeling whenever parameters must be kept
//! strictly positive or constrained away from unstable boundaries.

/// Strictly positive lower bound for variance intercepts.
///
/// Conditional variance must stay strictly positive, so the intercept's
/// constraint box is `[INTERCEPT_EPS, +∞)` rather than `[0, +∞)`. The same ε
/// keeps log-space persistence coefficients inside `[ε − 1, 1 − ε]` so the
/// implied long-run variance stays finite.
pub const INTERCEPT_EPS: f64 = 1e-6;

/// Clamp floor for probabilities before taking logarithms.
pub const LOGIT_EPS: f64 = 1e-12;

/// Numerically stable softplus: `softplus(x) = ln(1 + exp(x))`.
///
/// Computes softplus without overflow for large positive `x` and
/// with good precision for large negative `x`:
///
/// - For sufficiently large `x`, `softplus(x) ≈ x + ln1p(exp(-x)) ≈ x`.
/// - Otherwise, it falls back to `ln1p(exp(x))`.
///
/// The cutoff used here (`x > 20.0`) is a practical threshold that
/// keeps the calculation in a well-conditioned regime for `f64`.
pub fn safe_softplus(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp().ln_1p() }
}

/// Stable inverse of softplus on `(0, ∞)`: solves for `t` in
/// `softplus(t) = x`, returning `t = ln(exp(x) - 1)`.
///
/// Direct evaluation of `ln(exp(x) - 1)` can overflow or lose precision.
/// This implementation mirrors the guarded strategy of `safe_softplus`:
///
/// - For sufficiently large `x`, `exp(-x)` is tiny and
///   `ln(exp(x) - 1) ≈ x + ln(1 - exp(-x)) ≈ x`.
/// - Otherwise, it uses `ln(expm1(x))`.
pub fn safe_softplus_inv(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp_m1().ln() }
}

/// Numerically stable logistic sigmoid `σ(x) = 1 / (1 + exp(-x))`.
///
/// Branches on the sign of `x` so that `exp` is only ever evaluated at a
/// non-positive argument, avoiding overflow for large `|x|`.
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Stable inverse of the logistic sigmoid on `(0, 1)`.
///
/// The input is clamped into `[LOGIT_EPS, 1 - LOGIT_EPS]` before taking logs
/// so that boundary values map to large finite numbers instead of ±∞.
pub fn safe_logit(p: f64) -> f64 {
    let p = p.clamp(LOGIT_EPS, 1.0 - LOGIT_EPS);
    (p / (1.0 - p)).ln()
}

/// Map an unconstrained optimizer coordinate `x` into the box `[lower, upper]`.
///
/// The transform is chosen from the finiteness pattern of the bounds:
///
/// - `[lower, upper]` finite: `lower + (upper − lower)·σ(x)`
/// - `[lower, +∞)`: `lower + softplus(x)`
/// - `(-∞, upper]`: `upper − softplus(-x)`
/// - `(-∞, +∞)`: identity
///
/// Every branch is smooth in `x`, so box-constrained likelihoods stay
/// differentiable for the L-BFGS backend.
pub fn bounded_from_unconstrained(x: f64, lower: f64, upper: f64) -> f64 {
    match (lower.is_finite(), upper.is_finite()) {
        (true, true) => lower + (upper - lower) * safe_logistic(x),
        (true, false) => lower + safe_softplus(x),
        (false, true) => upper - safe_softplus(-x),
        (false, false) => x,
    }
}

/// Inverse of [`bounded_from_unconstrained`] on the interior of the box.
///
/// Values at or outside the box edges are pulled just inside before the
/// inverse transform (via `LOGIT_EPS` clamping or a softplus floor), so the
/// result is always finite.
pub fn unconstrained_from_bounded(value: f64, lower: f64, upper: f64) -> f64 {
    match (lower.is_finite(), upper.is_finite()) {
        (true, true) => safe_logit((value - lower) / (upper - lower)),
        (true, false) => safe_softplus_inv((value - lower).max(LOGIT_EPS)),
        (false, true) => -safe_softplus_inv((upper - value).max(LOGIT_EPS)),
        (false, false) => value,
    }
}
