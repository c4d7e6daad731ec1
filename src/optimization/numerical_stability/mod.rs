//! Numerical-stability helpers shared by the optimization layer.
//!
//! Currently hosts [`transformations`], the guarded nonlinear transforms used
//! to map unconstrained optimizer coordinates onto constrained model
//! parameters (softplus, logistic, and per-coordinate box transforms).

pub mod transformations;

pub use self::transformations::{
    INTERCEPT_EPS, LOGIT_EPS, bounded_from_unconstrained, safe_logistic, safe_logit,
    safe_softplus, safe_softplus_inv, unconstrained_from_bounded,
};
