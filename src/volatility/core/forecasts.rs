//! Out-of-sample variance forecasting.
//!
//! Rolls the variance recursion beyond the observed sample without
//! allocations inside the loop. For lags that still point into the sample the
//! forecast uses the realized shock terms from the history; once a lag falls
//! past the end of the sample, the unknown shock term is replaced by its
//! conditional expectation — `κ_i · v̂` for the additive families
//! (see [`shock_kernel_expectation`]) and zero for the log-space EGarch
//! kernel. The one-step-ahead forecast therefore uses only realized
//! information, and long-horizon forecasts decay toward the unconditional
//! variance under stationarity.
//!
//! Forecast storage is separated from recursion logic: [`VolForecastResult`]
//! wraps a reusable buffer with `forecast[i]` holding the (i + 1)-step-ahead
//! value, mirroring the in-sample split between history buffers and the
//! kernel.
use crate::volatility::{
    core::{
        family::VolFamily,
        guards::VarianceGuards,
        history::VarianceHistory,
        layout::CoeffView,
        recursion::{guard_variance, threshold_kernel},
        uncond::shock_kernel_expectation,
    },
    errors::{VolError, VolResult},
};
use ndarray::Array1;
use std::cell::RefCell;

/// Reusable buffer for out-of-sample variance forecasts.
///
/// `variance_forecast[i]` stores the (i + 1)-step-ahead forecast after
/// [`forecast_recursion`] has run. Interior mutability lets forecasting
/// routines fill the buffer through a shared reference; the type is intended
/// for single-threaded use.
#[derive(Debug, Clone, PartialEq)]
pub struct VolForecastResult {
    pub variance_forecast: RefCell<Array1<f64>>,
}

impl VolForecastResult {
    /// Create a zero-initialized forecast buffer for the given horizon.
    pub fn new(horizon: usize) -> Self {
        Self { variance_forecast: RefCell::new(Array1::zeros(horizon)) }
    }
}

/// Roll the recursion `horizon` steps past the sample and return the final
/// forecast `σ̂²_{T+horizon}`.
///
/// For each step, persistence lags and realized shock lags are read from the
/// history (newest first); lags that land beyond the sample read the already
/// computed forecast path, with shock terms replaced by their expectation.
/// Every forecast passes through the same degeneracy/guard policy as the
/// in-sample kernel.
///
/// # Errors
/// - [`VolError::InvalidModelShape`] if `horizon == 0`.
///
/// # Panics
/// Panics if the history holds fewer observations than the model order or if
/// the forecast buffer is shorter than `horizon`; both are logic errors in
/// the caller.
pub fn forecast_recursion(
    family: VolFamily, coeffs: &CoeffView<'_>, history: &VarianceHistory, horizon: usize,
    forecast_result: &VolForecastResult, guards: &VarianceGuards,
) -> VolResult<f64> {
    if horizon == 0 {
        return Err(VolError::InvalidModelShape {
            param: 0,
            reason: "Forecast horizon must be at least 1.",
        });
    }

    let p = coeffs.layout().p;
    let q = coeffs.layout().q;
    let persistence = coeffs.persistence();
    let response = coeffs.response();
    let mut forecasts = forecast_result.variance_forecast.borrow_mut();

    for step in 1..=horizon {
        let raw = match family {
            VolFamily::Garch | VolFamily::TGarch => {
                let mut acc = coeffs.intercept();
                for j in 1..=p {
                    // lag j splits between the forecast path and the sample
                    let v = if j < step {
                        forecasts[step - 1 - j]
                    } else {
                        history.variance_lag(j - step + 1)
                    };
                    acc += persistence[j - 1] * v;
                }
                for i in 1..=q {
                    let (shift, skew) = match family {
                        VolFamily::TGarch => (coeffs.aux(0)[i - 1], coeffs.aux(1)[i - 1]),
                        _ => (0.0, 0.0),
                    };
                    acc += if i < step {
                        response[i - 1]
                            * shock_kernel_expectation(family, shift, skew)
                            * forecasts[step - 1 - i]
                    } else {
                        let back = i - step + 1;
                        let z = history.std_residual_lag(back);
                        response[i - 1]
                            * threshold_kernel(z, shift, skew)
                            * history.variance_lag(back)
                    };
                }
                acc
            }
            VolFamily::EGarch => {
                let abs_shock_mean = (2.0 / std::f64::consts::PI).sqrt();
                let mut acc = coeffs.intercept();
                for j in 1..=p {
                    let v = if j < step {
                        forecasts[step - 1 - j]
                    } else {
                        history.variance_lag(j - step + 1)
                    };
                    acc += persistence[j - 1] * v.ln();
                }
                for i in 1..=q {
                    if i >= step {
                        let back = i - step + 1;
                        let z = history.std_residual_lag(back);
                        acc += response[i - 1] * (z.abs() - abs_shock_mean)
                            + coeffs.aux(0)[i - 1] * z;
                    }
                    // future shock terms have zero expectation in log space
                }
                acc.exp()
            }
        };
        forecasts[step - 1] = guard_variance(raw, guards);
    }
    Ok(forecasts[horizon - 1])
}
