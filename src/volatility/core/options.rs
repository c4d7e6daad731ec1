//! Estimation-time configuration for volatility models.
//!
//! [`VolOptions`] bundles the three already-validated components a model
//! needs at fit time: the presample initialization policy ([`Init`]), the
//! maximum-likelihood optimizer configuration ([`MLEOptions`]), and the
//! clamp bounds protecting the recursion ([`VarianceGuards`]). No cross-field
//! validation happens here; each component enforces its own invariants at
//! construction.
use crate::{
    optimization::loglik_optimizer::MLEOptions,
    volatility::core::{guards::VarianceGuards, init::Init},
};

/// Bundle of estimation-time configuration for a volatility model.
///
/// Public APIs accept `VolOptions` rather than separate `init`, `mle_opts`,
/// and `variance_guards` parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct VolOptions {
    /// Initialization policy for presample variance and residual lags.
    pub init: Init,
    /// Maximum-likelihood optimizer options (L-BFGS + line search).
    pub mle_opts: MLEOptions,
    /// Bounds for the variance during recursion to prevent divergence.
    pub variance_guards: VarianceGuards,
}

impl VolOptions {
    /// Package already-validated components into a configuration handle.
    pub fn new(init: Init, mle_opts: MLEOptions, variance_guards: VarianceGuards) -> VolOptions {
        VolOptions { init, mle_opts, variance_guards }
    }
}

impl Default for VolOptions {
    /// Unconditional-variance seeding, default optimizer settings, and wide
    /// guards.
    fn default() -> Self {
        VolOptions {
            init: Init::UncondVariance,
            mle_opts: MLEOptions::default(),
            variance_guards: VarianceGuards::default(),
        }
    }
}
