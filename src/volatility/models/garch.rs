//! Volatility model: likelihood wiring, fitting, and forecasting.
//!
//! This module ties a volatility specification (family + order + options) to
//! the `LogLikelihood` trait. On every optimizer step the unconstrained
//! vector θ is scattered through the constraint box into the model-space
//! coefficient buffer (allocation-free), the variance recursion fills the
//! private history buffers, and the Gaussian likelihood is accumulated.
//!
//! Key ideas:
//! - Parameters live in unconstrained space; the per-coordinate box transform
//!   keeps every iterate inside the constraint provider's bounds, so the
//!   constrained problem is solved with a plain L-BFGS.
//! - A subset mask (model-selection search) shortens θ to the free
//!   coordinates; masked-out coefficients are pinned at zero and never seen
//!   by the optimizer.
//! - A `NonStationaryParams` rejection from the unconditional-variance seeder
//!   is mapped to a large negative finite penalty instead of an error, so
//!   infeasible candidates are rejected without aborting the search.
use crate::{
    optimization::{
        errors::OptResult,
        loglik_optimizer::{LogLikelihood, OptimOutcome, Theta, maximize},
    },
    volatility::{
        core::{
            constraints::{ParamBounds, constraints},
            family::VolFamily,
            forecasts::{VolForecastResult, forecast_recursion},
            layout::{CoeffView, ParamLayout, nparams, nparams_masked},
            options::VolOptions,
            params::{VolParams, VolScratch, scatter_theta},
            recursion::{compute_variance, likelihood_driver},
            shape::VolShape,
            starting::{starting_values, starting_values_subset},
            subset::subset_mask,
            validation::validate_theta,
        },
        data::ResidualData,
        errors::{ParamResult, VolError, VolResult},
    },
};
use ndarray::Array1;

/// Log-likelihood assigned to candidates rejected as non-stationary.
///
/// Large in magnitude but finite, so the optimizer backs away from the
/// infeasible region instead of erroring out of the run.
const REJECT_LOGLIK: f64 = -1e300;

/// Conditional-variance model with MLE fitting and forecasting.
///
/// Encapsulates the family tag, model order (`shape`), runtime options, the
/// constraint box, an optional subset restriction, and preallocated scratch
/// buffers reused across evaluations. After fitting, [`results`] stores the
/// optimizer outcome and [`fitted_params`] the validated model-space
/// parameters.
///
/// # Notes
/// - Designed for allocation-free inner loops: the θ scatter and the variance
///   recursion operate in place on `scratch`.
/// - Implements [`LogLikelihood`] so it plugs directly into the Argmin-based
///   maximizer.
/// - Scratch buffers are single-owner; a model instance must not be shared
///   across concurrent evaluations.
///
/// [`results`]: VolatilityModel::results
/// [`fitted_params`]: VolatilityModel::fitted_params
#[derive(Debug)]
pub struct VolatilityModel {
    /// Recursion family tag.
    pub family: VolFamily,
    /// Model order (p, q).
    pub shape: VolShape,
    /// Estimation-time options.
    pub options: VolOptions,
    /// Constraint box over the full parameter space.
    pub bounds: ParamBounds,
    /// Subset restriction (mask plus the reduced order it encodes).
    pub subset: Option<(Vec<bool>, (usize, usize))>,
    /// Workspace buffers.
    pub scratch: VolScratch,
    /// Fit results (populated after `fit`).
    pub results: Option<OptimOutcome>,
    /// Fitted parameters (populated after `fit`).
    pub fitted_params: Option<VolParams>,
    /// Forecasting results (populated after `forecast`).
    pub forecast_result: Option<VolForecastResult>,
}

impl VolatilityModel {
    /// Construct a model with preallocated scratch buffers.
    ///
    /// # Arguments
    /// - `family`: recursion shape tag.
    /// - `shape`: model order (p, q), already validated against the sample.
    /// - `options`: run-time options (init policy, optimizer, guards).
    /// - `n`: number of observations; used to size internal buffers.
    pub fn new(
        family: VolFamily, shape: VolShape, options: VolOptions, n: usize,
    ) -> VolatilityModel {
        let bounds = constraints(family, shape.p, shape.q);
        let scratch = VolScratch::new(family, &shape, n);
        VolatilityModel {
            family,
            shape,
            options,
            bounds,
            subset: None,
            scratch,
            results: None,
            fitted_params: None,
            forecast_result: None,
        }
    }

    /// Construct a model restricted to the reduced order `(p_sub, q_sub)`.
    ///
    /// The full layout (and its bounds) is kept; the optimizer only sees the
    /// masked-in coordinates and masked-out coefficients are fixed at zero.
    ///
    /// # Errors
    /// Propagates [`ParamError`](crate::volatility::errors::ParamError) when
    /// the reduced order exceeds the full order.
    pub fn with_subset(
        family: VolFamily, shape: VolShape, options: VolOptions, n: usize,
        sub_orders: (usize, usize),
    ) -> ParamResult<VolatilityModel> {
        let mask = subset_mask(family, shape.p, shape.q, sub_orders)?;
        let mut model = VolatilityModel::new(family, shape, options, n);
        model.subset = Some((mask, sub_orders));
        Ok(model)
    }

    /// Number of free parameters seen by the optimizer.
    pub fn free_params(&self) -> usize {
        match &self.subset {
            Some((mask, _)) => nparams_masked(self.family, self.shape.p, self.shape.q, mask)
                .expect("mask length validated at construction"),
            None => nparams(self.family, self.shape.p, self.shape.q),
        }
    }

    fn mask_ref(&self) -> Option<&[bool]> {
        self.subset.as_ref().map(|(mask, _)| mask.as_slice())
    }

    /// Heuristic starting values in model space (full-length vector).
    pub fn starting_values(&self, data: &ResidualData) -> ParamResult<Array1<f64>> {
        match &self.subset {
            Some((_, sub_orders)) => starting_values_subset(
                self.family,
                self.shape.p,
                self.shape.q,
                data.data.view(),
                *sub_orders,
            ),
            None => Ok(starting_values(self.family, self.shape.p, self.shape.q, data.data.view())),
        }
    }

    /// Optimizer starting point: the heuristic mapped into θ-space.
    pub fn initial_theta(&self, data: &ResidualData) -> ParamResult<Theta> {
        let values = self.starting_values(data)?;
        let params = VolParams::new(self.family, self.shape, values)?;
        Ok(params.to_theta(self.mask_ref()))
    }

    /// Fit by maximum likelihood (consumes `theta0`) and cache the results.
    ///
    /// ## Steps
    /// 1. Run L-BFGS per `options.mle_opts`, moving `theta0` into the
    ///    executor.
    /// 2. Map `theta_hat` back to validated model-space parameters.
    /// 3. Recompute the variance path at `theta_hat` so the history buffers
    ///    correspond exactly to the best parameters (needed for forecasting).
    /// 4. Store the outcome in `self.results` and the parameters in
    ///    `self.fitted_params`.
    pub fn fit(&mut self, theta0: Theta, data: &ResidualData) -> OptResult<()> {
        let mle_opts = self.options.mle_opts.clone();
        let outcome = maximize(&*self, theta0, data, &mle_opts)?;
        let params = VolParams::from_theta(
            self.family,
            self.shape,
            outcome.theta_hat.view(),
            self.mask_ref(),
        )?;
        {
            let mut history = self.scratch.history.borrow_mut();
            compute_variance(
                self.family,
                &params.view(),
                data,
                &self.options.init,
                &self.options.variance_guards,
                &mut history,
            )?;
        }
        self.results = Some(outcome);
        self.fitted_params = Some(params);
        Ok(())
    }

    /// Forecast the conditional variance `horizon` steps past the sample.
    ///
    /// Recomputes the in-sample path at the fitted parameters over `data`,
    /// rolls the forecast recursion, caches the full path in
    /// `self.forecast_result`, and returns the final forecast
    /// `σ̂²_{T+horizon}`.
    ///
    /// # Errors
    /// - [`VolError::ModelNotFitted`] if called before a successful `fit`.
    /// - Propagates recursion and horizon errors.
    pub fn forecast(&mut self, horizon: usize, data: &ResidualData) -> VolResult<f64> {
        let fitted = self.fitted_params.as_ref().ok_or(VolError::ModelNotFitted)?;
        let mut history = self.scratch.history.borrow_mut();
        compute_variance(
            self.family,
            &fitted.view(),
            data,
            &self.options.init,
            &self.options.variance_guards,
            &mut history,
        )?;
        let result = VolForecastResult::new(horizon);
        let final_forecast = forecast_recursion(
            self.family,
            &fitted.view(),
            &history,
            horizon,
            &result,
            &self.options.variance_guards,
        )?;
        drop(history);
        self.forecast_result = Some(result);
        Ok(final_forecast)
    }
}

impl LogLikelihood for VolatilityModel {
    type Data = ResidualData;

    /// Log-likelihood evaluation at the optimizer vector `θ`.
    ///
    /// # Steps
    /// 1. Scatter `θ` through the constraint box into the model-space
    ///    coefficient buffer (zeroing masked-out entries; no allocation).
    /// 2. Drive the variance recursion into the scratch history.
    /// 3. Accumulate the Gaussian log-likelihood.
    ///
    /// Non-stationary candidates (rejected by the unconditional-variance
    /// seeder) yield the finite penalty `REJECT_LOGLIK` instead of an error.
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<f64> {
        let mut coeff_buf = self.scratch.coeff_buf.borrow_mut();
        scatter_theta(theta.view(), &self.bounds, self.mask_ref(), &mut coeff_buf)?;
        let layout = ParamLayout::new(self.family, self.shape.p, self.shape.q);
        let coeffs = CoeffView::new(coeff_buf.view(), layout)?;
        let mut history = self.scratch.history.borrow_mut();
        match likelihood_driver(
            self.family,
            &coeffs,
            data,
            &self.options.init,
            &self.options.variance_guards,
            &mut history,
        ) {
            Ok(loglik) => Ok(loglik),
            Err(VolError::NonStationaryParams { .. }) => Ok(REJECT_LOGLIK),
            Err(err) => Err(err.into()),
        }
    }

    /// Validate an optimizer vector `θ` (length and finiteness).
    fn check(&self, theta: &Theta, _data: &Self::Data) -> OptResult<()> {
        validate_theta(theta.view(), self.free_params())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptError;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - LogLikelihood conformance: check/value behavior, subset θ lengths,
    //   and the non-stationary penalty path.
    // - ModelNotFitted error paths.
    //
    // They intentionally DO NOT cover:
    // - Full MLE runs (integration tests).
    // -------------------------------------------------------------------------

    fn sample_data() -> ResidualData {
        ResidualData::new(array![0.4, -0.9, 0.1, 1.3, -0.2, 0.7, -1.1, 0.05], None).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // `check` accepts a θ of the free length and rejects other lengths.
    //
    // Given
    // -----
    // - A Garch(1, 1) model (3 free params) and a subset-restricted
    //   TGarch(2, 1) at (1, 1) (5 free params of 6 total).
    //
    // Expect
    // ------
    // - Matching lengths pass; a mismatch yields ThetaLengthMismatch.
    fn check_enforces_free_parameter_count() {
        // Arrange
        let data = sample_data();
        let n = data.data.len();
        let shape = VolShape::new(1, 1, n).unwrap();
        let model = VolatilityModel::new(VolFamily::Garch, shape, VolOptions::default(), n);

        let shape2 = VolShape::new(2, 1, n).unwrap();
        let restricted = VolatilityModel::with_subset(
            VolFamily::TGarch,
            shape2,
            VolOptions::default(),
            n,
            (1, 1),
        )
        .unwrap();

        // Act & Assert
        assert!(model.check(&Array1::zeros(3), &data).is_ok());
        assert!(matches!(
            model.check(&Array1::zeros(4), &data),
            Err(OptError::ThetaLengthMismatch { expected: 3, actual: 4 })
        ));
        assert_eq!(restricted.free_params(), 5);
        assert!(restricted.check(&Array1::zeros(5), &data).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // `value` returns a finite log-likelihood at the heuristic starting
    // point.
    //
    // Given
    // -----
    // - A Garch(1, 1) model over the fixture data and its `initial_theta`.
    //
    // Expect
    // ------
    // - A finite, negative log-likelihood.
    fn value_is_finite_at_starting_point() {
        // Arrange
        let data = sample_data();
        let n = data.data.len();
        let shape = VolShape::new(1, 1, n).unwrap();
        let model = VolatilityModel::new(VolFamily::Garch, shape, VolOptions::default(), n);
        let theta0 = model.initial_theta(&data).unwrap();

        // Act
        let loglik = model.value(&theta0, &data).unwrap();

        // Assert
        assert!(loglik.is_finite());
        assert!(loglik < 0.0);
    }

    #[test]
    // Purpose
    // -------
    // `forecast` before `fit` reports ModelNotFitted.
    //
    // Given
    // -----
    // - A freshly constructed model.
    //
    // Expect
    // ------
    // - `Err(VolError::ModelNotFitted)`.
    fn forecast_requires_fit() {
        // Arrange
        let data = sample_data();
        let n = data.data.len();
        let shape = VolShape::new(1, 1, n).unwrap();
        let mut model = VolatilityModel::new(VolFamily::Garch, shape, VolOptions::default(), n);

        // Act
        let result = model.forecast(3, &data);

        // Assert
        assert!(matches!(result, Err(VolError::ModelNotFitted)));
    }
}
