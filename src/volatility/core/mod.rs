//! core — shared data, parameters, and recursions for conditional-variance
//! models.
//!
//! Purpose
//! -------
//! Collect the core building blocks of the volatility specification engine:
//! family tags and model orders, the flat parameter layout and its constraint
//! boxes, subset masking for model-selection search, starting-value
//! heuristics, the history buffers and the variance recursion (in-sample and
//! out-of-sample), the unconditional-variance solver, initialization
//! policies, and validation helpers. Higher-level models and the optimizer
//! build on top of these primitives.
//!
//! Key behaviors
//! -------------
//! - Define the specification types ([`VolFamily`], [`VolShape`],
//!   [`VolOptions`]) plus owned parameter containers ([`VolParams`],
//!   [`VolScratch`]) and the layout contract ([`layout`]).
//! - Implement the variance recursion and its guards for in-sample paths
//!   ([`recursion`], [`VarianceGuards`]) and allocation-free out-of-sample
//!   forecasting ([`VolForecastResult`], [`forecast_recursion`]).
//! - Encapsulate constraint boxes ([`constraints`]), subset masking
//!   ([`subset`]), starting values ([`starting`]), the long-run variance
//!   solver ([`uncond`]), initialization policies ([`Init`]), and validation
//!   routines for parameters, lags, and θ-vectors.
//!
//! Invariants & assumptions
//! ------------------------
//! - Orders follow the convention `p` = variance lags (β), `q` = shock lags
//!   (α); the flat parameter layout `[ω | β | α | aux…]` is the single
//!   contract shared by every consumer.
//! - Variance paths are finite `f64` values; guard rails clamp extreme
//!   values rather than letting NaNs/infinities propagate.
//! - History buffers are single-owner, append-only, and never shared across
//!   concurrent evaluations.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; history buffers store the newest element at the
//!   end, with 1-based lag accessors relative to the step being computed.
//! - This module avoids I/O and logging; it operates purely on `ndarray`
//!   containers and scalar values. Error conditions are reported via
//!   `VolResult` / `ParamResult`; panics are reserved for logic bugs such as
//!   irreconcilable length mismatches.
//!
//! Downstream usage
//! ----------------
//! - Model code constructs a [`VolShape`] and [`VolOptions`], picks a
//!   [`VolFamily`], and drives the recursion through
//!   [`recursion::likelihood_driver`] inside the optimizer loop.
//! - Model-selection search enumerates reduced orders through
//!   [`subset::subset_mask`] / [`subset::subset_orders`] and seeds each
//!   candidate with [`starting::starting_values_subset`].

pub mod constraints;
pub mod family;
pub mod forecasts;
pub mod guards;
pub mod history;
pub mod init;
pub mod layout;
pub mod options;
pub mod params;
pub mod recursion;
pub mod shape;
pub mod starting;
pub mod subset;
pub mod uncond;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::constraints::{ParamBounds, constraints};
pub use self::family::VolFamily;
pub use self::forecasts::{VolForecastResult, forecast_recursion};
pub use self::guards::VarianceGuards;
pub use self::history::VarianceHistory;
pub use self::init::Init;
pub use self::layout::{CoeffView, ParamLayout, coef_names, nparams, nparams_masked};
pub use self::options::VolOptions;
pub use self::params::{VolParams, VolScratch};
pub use self::recursion::{advance_variance, compute_variance, guard_variance, likelihood_driver};
pub use self::shape::VolShape;
pub use self::starting::{starting_values, starting_values_subset};
pub use self::subset::{subset_mask, subset_orders};
pub use self::uncond::{shock_kernel_expectation, unconditional_variance};
pub use self::validation::{
    validate_intercept, validate_loglik_inputs, validate_residual_lags, validate_theta,
    validate_variance_lags, validate_within_bounds,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_volatility::volatility::core::prelude::*;
//
// to import the main core surface in a single line.

pub mod prelude {
    pub use super::constraints::{ParamBounds, constraints};
    pub use super::family::VolFamily;
    pub use super::forecasts::{VolForecastResult, forecast_recursion};
    pub use super::guards::VarianceGuards;
    pub use super::history::VarianceHistory;
    pub use super::init::Init;
    pub use super::layout::{coef_names, nparams};
    pub use super::options::VolOptions;
    pub use super::params::{VolParams, VolScratch};
    pub use super::recursion::compute_variance;
    pub use super::shape::VolShape;
    pub use super::starting::starting_values;
    pub use super::subset::{subset_mask, subset_orders};
    pub use super::uncond::unconditional_variance;
}
