//! rust_volatility — conditional-variance (GARCH family) modeling with MLE.
//!
//! Purpose
//! -------
//! Serve as the crate root for the volatility specification engine: the
//! algebra defining, per model family and order (p, q), the parameter layout,
//! constraint boxes, starting values, subset masks, the one-step variance
//! recursion, and the unconditional-variance solver — plus the Argmin-backed
//! maximum-likelihood machinery that drives it.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules ([`volatility`] and [`optimization`])
//!   as the public crate surface.
//! - Keep the hot recursion allocation-free and deterministic: each
//!   likelihood evaluation owns its private history buffers, so independent
//!   evaluations can run concurrently with zero shared mutable state.
//!
//! Downstream usage
//! ----------------
//! - Most callers construct a `VolatilityModel` through
//!   `volatility::prelude::*`, fit it against a `ResidualData` series, and
//!   read fitted parameters or variance forecasts from the model.
//! - The optimizer layer (`optimization`) is model-agnostic and reusable for
//!   any log-likelihood implementing its `LogLikelihood` trait.

pub mod optimization;
pub mod volatility;
