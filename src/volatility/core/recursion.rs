//! Variance recursions: the one-step update kernel and in-sample drivers.
//!
//! Implements the family-dispatched conditional-variance update
//!
//! ```text
//! σ²_t = ω + Σ_{j=1..p} β_j σ²_{t−j} + Σ_{i=1..q} f_i(z_{t−i}, σ²_{t−i})
//! ```
//!
//! with the family-specific shock term `f_i`:
//! - `Garch`:  `α_i z²_{t−i} σ²_{t−i}` (equivalently `α_i ε²_{t−i}`),
//! - `TGarch`: `α_i (|z_{t−i} − η_i| − λ_i (z_{t−i} − η_i))² σ²_{t−i}`,
//! - `EGarch`: accumulated in log space as
//!   `ln σ²_t = ω + Σ β_j ln σ²_{t−j} + Σ [α_i(|z_{t−i}| − √(2/π)) + γ_i z_{t−i}]`,
//!   with the returned variance being the exponential.
//!
//! ## Degeneracy policy
//! Before its log is taken, a computed raw variance that is non-positive is
//! replaced by its negation (and floored at the guard minimum if still zero).
//! The substitution is applied consistently on every path — training,
//! likelihood, forecasting — so the likelihood stays continuous near the
//! constraint boundary and gradient-based search is not destabilized. After
//! the policy, each value is clamped into the configured [`VarianceGuards`].
//!
//! ## Contract with the caller
//! The kernel trusts its inputs: the coefficient view was length-checked at
//! construction ([`CoeffView::new`]) and the history buffers were sized by
//! the owning model. Numerical overflow is not trapped here; the optimizer
//! rejects candidates whose recursion diverges.
use crate::volatility::{
    core::{
        family::VolFamily,
        guards::VarianceGuards,
        history::VarianceHistory,
        init::Init,
        layout::CoeffView,
        uncond::unconditional_variance,
        validation::validate_loglik_inputs,
    },
    data::ResidualData,
    errors::VolResult,
};
use statrs::distribution::{Continuous, Normal};

/// Apply the degeneracy policy and clamp into the guard range.
///
/// - `value > 0`: unchanged.
/// - `value <= 0`: replaced by `-value` (zero then floors at `guards.min`).
/// - Finally clamped into `[guards.min, guards.max]`.
pub fn guard_variance(value: f64, guards: &VarianceGuards) -> f64 {
    let value = if value > 0.0 { value } else { -value };
    if value < guards.min {
        guards.min
    } else if value > guards.max {
        guards.max
    } else {
        value
    }
}

/// Threshold shock kernel `g(z; η, λ) = (|z − η| − λ(z − η))²`.
///
/// Reduces to `z²` at `η = λ = 0`; a positive λ amplifies shocks below the
/// shift (the leverage effect).
pub fn threshold_kernel(z: f64, shift: f64, skew: f64) -> f64 {
    let centered = z - shift;
    let tilted = centered.abs() - skew * centered;
    tilted * tilted
}

/// Compute the next conditional variance, append it (and its log) to the
/// history, and return it.
///
/// One call per time step; lag reads address the history relative to the
/// position being computed (`lag 1` = previous step). The same kernel serves
/// likelihood evaluation, simulation, and the first out-of-sample step of a
/// forecast.
pub fn advance_variance(
    family: VolFamily, coeffs: &CoeffView<'_>, history: &mut VarianceHistory,
    guards: &VarianceGuards,
) -> f64 {
    let p = coeffs.layout().p;
    let q = coeffs.layout().q;
    let persistence = coeffs.persistence();
    let response = coeffs.response();

    let next = match family {
        VolFamily::Garch | VolFamily::TGarch => {
            let mut acc = coeffs.intercept();
            for j in 1..=p {
                acc += persistence[j - 1] * history.variance_lag(j);
            }
            for i in 1..=q {
                let z = history.std_residual_lag(i);
                let g = match family {
                    VolFamily::TGarch => {
                        threshold_kernel(z, coeffs.aux(0)[i - 1], coeffs.aux(1)[i - 1])
                    }
                    _ => z * z,
                };
                acc += response[i - 1] * g * history.variance_lag(i);
            }
            acc
        }
        VolFamily::EGarch => {
            let abs_shock_mean = (2.0 / std::f64::consts::PI).sqrt();
            let mut acc = coeffs.intercept();
            for j in 1..=p {
                acc += persistence[j - 1] * history.log_variance_lag(j);
            }
            for i in 1..=q {
                let z = history.std_residual_lag(i);
                acc += response[i - 1] * (z.abs() - abs_shock_mean) + coeffs.aux(0)[i - 1] * z;
            }
            acc.exp()
        }
    };
    let next = guard_variance(next, guards);
    history.push_variance(next);
    next
}

/// Seed the presample prefix according to the initialization policy.
///
/// `UncondVariance` consults the unconditional-variance solver at the current
/// coefficients and therefore propagates
/// [`NonStationaryParams`](crate::volatility::errors::VolError::NonStationaryParams)
/// for infeasible candidates.
pub fn seed_history(
    family: VolFamily, coeffs: &CoeffView<'_>, data: &ResidualData, init: &Init,
    guards: &VarianceGuards, history: &mut VarianceHistory,
) -> VolResult<()> {
    match init {
        Init::UncondVariance => {
            let level = unconditional_variance(family, coeffs)?;
            history.seed_level(guard_variance(level, guards));
        }
        Init::SampleVariance => {
            let n = data.data.len() as f64;
            let level = data.data.iter().map(|&r| r * r).sum::<f64>() / n;
            history.seed_level(level.max(guards.min));
        }
        Init::Fixed(level) => {
            history.seed_level(*level);
        }
        Init::FixedVector { variance_lags, residual_lags } => {
            history.seed_vectors(variance_lags.view(), residual_lags.view());
        }
    }
    Ok(())
}

/// Run the recursion over the full sample, filling the history in time order.
///
/// Seeds the presample, then alternates `advance_variance` and
/// `push_residual` once per observation. After this call the history holds
/// `data.data.len()` in-sample variances plus the aligned residual forms.
///
/// # Errors
/// Propagates seeding errors (non-stationary candidates under
/// `Init::UncondVariance`).
pub fn compute_variance(
    family: VolFamily, coeffs: &CoeffView<'_>, data: &ResidualData, init: &Init,
    guards: &VarianceGuards, history: &mut VarianceHistory,
) -> VolResult<()> {
    seed_history(family, coeffs, data, init, guards, history)?;
    for &residual in data.data.iter() {
        advance_variance(family, coeffs, history, guards);
        history.push_residual(residual);
    }
    Ok(())
}

/// Evaluate the Gaussian log-likelihood `ℓ` for one candidate coefficient
/// vector by driving the recursion across the sample.
///
/// Per observation, the change of variables gives
/// `ln f(ε_t | σ²_t) = ln φ(ε_t / σ_t) − ½ ln σ²_t`. If `data.t0` is set, the
/// first `t0` observations are excluded from the sum while the recursion
/// itself still runs over them, so `(ε_t, σ²_t)` stay aligned.
///
/// # Errors
/// - Propagates seeding errors (non-stationary candidates).
/// - [`VolError::InvalidVarianceLogLik`](crate::volatility::errors::VolError)
///   if a clamped variance still fails the likelihood domain check.
pub fn likelihood_driver(
    family: VolFamily, coeffs: &CoeffView<'_>, data: &ResidualData, init: &Init,
    guards: &VarianceGuards, history: &mut VarianceHistory,
) -> VolResult<f64> {
    compute_variance(family, coeffs, data, init, guards, history)?;
    let start = data.t0.unwrap_or(0);
    let normal = Normal::standard();
    let variances = history.variance_path();
    let std_residuals = history.std_residual_path();

    let mut loglik = 0.0;
    for t in start..data.data.len() {
        validate_loglik_inputs(data.data[t], variances[t])?;
        loglik += normal.ln_pdf(std_residuals[t]) - 0.5 * variances[t].ln();
    }
    Ok(loglik)
}
