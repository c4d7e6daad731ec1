//! optimization — generic MLE machinery shared by the volatility models.
//!
//! Purpose
//! -------
//! Host the model-agnostic optimization infrastructure: the Argmin-backed
//! log-likelihood maximizer ([`loglik_optimizer`]), the guarded nonlinear
//! transforms used to keep optimizer iterates inside constraint boxes
//! ([`numerical_stability`]), and the normalized optimizer error surface
//! ([`errors`]).
//!
//! Key behaviors
//! -------------
//! - [`loglik_optimizer`] exposes the `LogLikelihood` trait, `maximize`
//!   entry point, and configuration/outcome types.
//! - [`numerical_stability`] provides softplus/logistic transforms and the
//!   box-transform pair mapping ℝ onto `[lower, upper]` coordinates.
//! - [`errors`] defines `OptError`/`OptResult` and the conversions that keep
//!   `argmin::core::Error` from leaking across module boundaries.
//!
//! Conventions
//! -----------
//! - This layer knows nothing about volatility models; it sees only `Theta`
//!   vectors and scalar log-likelihood values. Domain semantics live in the
//!   `volatility` module.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

pub use self::errors::{OptError, OptResult};
pub use self::loglik_optimizer::{
    LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances, maximize,
};
