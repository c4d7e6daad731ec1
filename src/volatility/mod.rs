//! volatility — the conditional-variance (GARCH family) stack: core
//! numerics, models, and errors.
//!
//! Purpose
//! -------
//! Provide a cohesive volatility layer that bundles residual data containers,
//! the variance-recursion core, model-level fitting / forecasting, and shared
//! error types under a single namespace. This is the surface most consumers
//! should depend on.
//!
//! Key behaviors
//! -------------
//! - Collect core numerical and structural building blocks in [`core`]:
//!   family tags and orders, the flat parameter layout, constraint boxes,
//!   subset masks, starting values, history buffers, the variance recursion,
//!   the unconditional-variance solver, initialization policies, and
//!   validation helpers.
//! - Expose a user-facing model API in [`models`] via [`VolatilityModel`],
//!   including MLE in θ-space and out-of-sample forecasting.
//! - Centralize error types in [`errors`] (`VolError`, `ParamError`, and the
//!   `VolResult` / `ParamResult` aliases) so callers see a uniform error
//!   surface across the stack.
//!
//! Conventions
//! -----------
//! - Residual data are carried in validated [`ResidualData`] instances:
//!   finite, non-empty, with an optional burn-in index `t0` that only
//!   affects the likelihood window.
//! - Orders `(p, q)` follow the convention q = shock lags (α), p = variance
//!   lags (β) and are validated via [`VolShape::new`].
//! - Optimization is performed in unconstrained θ-space mapped onto the
//!   constraint provider's boxes with numerically stable transforms; subset
//!   masks shorten θ to the free coordinates.
//! - The stack performs no I/O and no logging; optimizer observability lives
//!   behind the `obs_slog` feature of the optimization layer.
//!
//! Downstream usage
//! ----------------
//! - Typical end-to-end flow:
//!   1. Construct [`ResidualData`] from the mean specification's residuals.
//!   2. Build a [`VolShape`] (p, q) and [`VolOptions`] (initialization
//!      policy [`Init`], optimizer tolerances, variance guards).
//!   3. Choose a [`VolFamily`], then construct a [`VolatilityModel`] via
//!      `VolatilityModel::new(family, shape, options, n)`.
//!   4. Fit by MLE with `model.fit(model.initial_theta(&data)?, &data)`.
//!   5. After a successful fit, use `forecast(horizon, &data)` for variance
//!      forecasts and `fitted_params` for the model-space coefficients.

pub mod core;
pub mod data;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------
//
// These are the "everyday" types most users need. More specialized items
// (validation helpers, low-level recursions, layout internals) remain under
// their respective submodules.

pub use self::core::{
    Init, VarianceGuards, VolFamily, VolForecastResult, VolOptions, VolParams, VolShape,
};

pub use self::data::ResidualData;

pub use self::errors::{ParamError, ParamResult, VolError, VolResult};

pub use self::models::VolatilityModel;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_volatility::volatility::prelude::*;
//
// to import the main volatility-model surface in a single line, without
// pulling in lower-level internals.

pub mod prelude {
    pub use super::{
        Init, ParamError, ParamResult, ResidualData, VarianceGuards, VolError, VolFamily,
        VolForecastResult, VolOptions, VolParams, VolResult, VolShape, VolatilityModel,
    };
}
