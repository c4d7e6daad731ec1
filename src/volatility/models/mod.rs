//! models — user-facing conditional-variance models.
//!
//! Hosts [`VolatilityModel`], the type that wires a volatility specification
//! (family, order, options) to the MLE machinery: likelihood evaluation via
//! the `LogLikelihood` trait, `fit` for L-BFGS estimation, and `forecast` for
//! out-of-sample variance paths.

pub mod garch;

pub use self::garch::VolatilityModel;
