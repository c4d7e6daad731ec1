//! Starting-value heuristic for the variance optimizer.
//!
//! Produces a feasible, non-degenerate initial coefficient vector from sample
//! data. The heuristic is deliberately crude: it assigns a fixed small
//! persistence weight to the first variance lag, a fixed small response weight
//! to the first shock lag, and then sets the intercept so that the implied
//! long-run variance roughly matches a scale proxy of the data (the sample
//! mean absolute deviation around the sample mean). Accuracy does not matter
//! here; the only requirements are that the vector lies inside the constraint
//! box and that the intercept is strictly positive, so the optimizer can
//! converge from it.
//!
//! For the log-space EGarch recursion the intercept is set in log space
//! (`ω = ln(scale)·(1 − β₁)`) and clamped into the constraint box.
//!
//! The subset overload scatters the reduced-order heuristic into a
//! zero-initialized full-length vector through the subset mask, so masked-out
//! coefficients start (and stay) at zero.
use crate::{
    optimization::numerical_stability::transformations::INTERCEPT_EPS,
    volatility::{
        core::{family::VolFamily, layout::nparams, subset::subset_mask},
        errors::ParamResult,
    },
};
use ndarray::{Array1, ArrayView1};

/// Persistence weight assigned to the first variance lag (when `p >= 1`).
const PERSISTENCE_START: f64 = 0.1;

/// Response weight assigned to the first shock lag (when `q >= 1`).
const RESPONSE_START: f64 = 0.05;

/// Heuristic starting values for `(family, p, q)` given sample data.
///
/// Layout-ordered full-length vector: first persistence lag at
/// `PERSISTENCE_START`, first shock lag at `RESPONSE_START`, all higher lags
/// and asymmetry coefficients at zero, intercept chosen so the implied
/// unconditional variance matches the data's mean absolute deviation scaled by
/// the leftover mass `(1 − accumulated contribution)`.
///
/// Edge case: for `p == 0 && q == 0` the vector is the single intercept set to
/// the scale proxy itself.
pub fn starting_values(
    family: VolFamily, p: usize, q: usize, data: ArrayView1<'_, f64>,
) -> Array1<f64> {
    let scale = mean_abs_deviation(data).max(INTERCEPT_EPS);
    let mut values = Array1::zeros(nparams(family, p, q));

    let mut contribution = 0.0;
    if p >= 1 {
        values[1] = PERSISTENCE_START;
        contribution += PERSISTENCE_START;
    }
    if q >= 1 {
        values[1 + p] = RESPONSE_START;
        if !family.is_log_space() {
            // kappa = 1 at the zero-asymmetry starting point
            contribution += RESPONSE_START;
        }
    }

    values[0] = if family.is_log_space() {
        (scale.ln() * (1.0 - contribution)).max(INTERCEPT_EPS)
    } else {
        (scale * (1.0 - contribution)).max(INTERCEPT_EPS)
    };
    values
}

/// Starting values restricted to a reduced order `(p_sub, q_sub)`.
///
/// Computes the heuristic at the reduced order and scatters it into a
/// zero-initialized full-length vector through
/// [`subset_mask`](crate::volatility::core::subset::subset_mask), so the
/// result has heuristic values exactly in the masked-in positions.
///
/// # Errors
/// Propagates [`ParamError`](crate::volatility::errors::ParamError) from
/// `subset_mask` when the reduced order exceeds the full order.
pub fn starting_values_subset(
    family: VolFamily, p_max: usize, q_max: usize, data: ArrayView1<'_, f64>,
    sub_orders: (usize, usize),
) -> ParamResult<Array1<f64>> {
    let mask = subset_mask(family, p_max, q_max, sub_orders)?;
    let reduced = starting_values(family, sub_orders.0, sub_orders.1, data);

    // The reduced vector's layout order matches the mask's true positions in
    // full layout order, so a sequential scatter is exact.
    let mut full = Array1::zeros(nparams(family, p_max, q_max));
    let mut source = reduced.iter();
    for (slot, &included) in full.iter_mut().zip(mask.iter()) {
        if included {
            *slot = *source.next().expect("mask true-count equals reduced layout length");
        }
    }
    Ok(full)
}

/// Sample mean absolute deviation around the sample mean.
///
/// Returns 0.0 for an empty series; callers floor the result.
fn mean_abs_deviation(data: ArrayView1<'_, f64>) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mean = data.sum() / data.len() as f64;
    data.iter().map(|&x| (x - mean).abs()).sum::<f64>() / data.len() as f64
}
