//! Errors for the log-likelihood optimization layer.
//!
//! [`OptError`] normalizes three sources of failure behind one enum:
//! configuration mistakes in the optimizer options, runtime failures reported
//! by the `argmin` backend, and model-layer errors ([`VolError`] /
//! [`ParamError`]) that surface while evaluating a candidate log-likelihood.
//! Conversions keep `argmin::core::Error` from leaking across module
//! boundaries.
use argmin::core::{ArgminError, Error};

use crate::volatility::errors::{ParamError, VolError};

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    /// Implies that FD should be used
    GradientNotImplemented,

    /// Gradient dimensions do not match parameter dimensions.
    GradientDimMismatch { expected: usize, found: usize },

    /// Gradient elements need to be finite
    InvalidGradient { index: usize, value: f64, reason: &'static str },

    // ---- MLEOptions ----
    /// Gradient tolerance needs to be positive and finite.
    InvalidTolGrad { tol: f64, reason: &'static str },

    /// Cost change tolerance needs to be positive and finite.
    InvalidTolCost { tol: f64, reason: &'static str },

    /// Maximum iterations needs to be positive.
    InvalidMaxIter { max_iter: usize, reason: &'static str },

    /// At least one tolerance must be provided.
    NoTolerancesProvided,

    /// Invalid line searcher name.
    InvalidLineSearch { name: String, reason: &'static str },

    /// lbfgs_mem needs to be at least 1.
    InvalidLBFGSMem { mem: usize, reason: &'static str },

    // ---- Cost function ----
    /// Cost function returned a non-finite value.
    NonFiniteCost { value: f64 },

    // ---- Optimizer outcome ----
    /// Estimated parameters must be finite.
    InvalidThetaHat { index: usize, value: f64, reason: &'static str },

    /// Theta hat is missing
    MissingThetaHat,

    // ---- Argmin ----
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter { text: String },
    /// Wrapper for argmin::NotImplemented
    NotImplemented { text: String },
    /// Wrapper for argmin::NotInitialized
    NotInitialized { text: String },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated { text: String },
    /// Wrapper for argmin::CheckpointNotFound
    CheckpointNotFound { text: String },
    /// Wrapper for argmin::PotentialBug
    PotentialBug { text: String },
    /// Wrapper for argmin::ImpossibleError
    ImpossibleError { text: String },
    /// Wrapper for other argmin::Error types
    BackendError { text: String },

    // ---- Model errors ----
    /// Non-stationary candidate rejected by the unconditional-variance solver.
    NonStationaryParams { denominator: f64 },

    /// Theta length mismatch reported by the parameter layer.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// Non-finite theta entry reported by the parameter layer.
    InvalidThetaInput { index: usize, value: f64 },

    /// Any other model-layer failure, carried as text.
    ModelError { text: String },
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptError::GradientNotImplemented => {
                write!(f, "No analytic gradient implemented; finite differences required.")
            }
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, got {found}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}. {reason}")
            }
            OptError::InvalidTolGrad { tol, reason } => {
                write!(f, "Invalid gradient tolerance {tol}: {reason}")
            }
            OptError::InvalidTolCost { tol, reason } => {
                write!(f, "Invalid cost tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::NoTolerancesProvided => {
                write!(f, "At least one of tol_grad, tol_cost, or max_iter must be provided.")
            }
            OptError::InvalidLineSearch { name, reason } => {
                write!(f, "Invalid line search '{name}': {reason}")
            }
            OptError::InvalidLBFGSMem { mem, reason } => {
                write!(f, "Invalid L-BFGS memory {mem}: {reason}")
            }
            OptError::NonFiniteCost { value } => {
                write!(f, "Cost function returned a non-finite value: {value}")
            }
            OptError::InvalidThetaHat { index, value, reason } => {
                write!(f, "Invalid estimate at index {index}: {value}. {reason}")
            }
            OptError::MissingThetaHat => {
                write!(f, "Optimizer returned no parameter estimate.")
            }
            OptError::InvalidParameter { text }
            | OptError::NotImplemented { text }
            | OptError::NotInitialized { text }
            | OptError::ConditionViolated { text }
            | OptError::CheckpointNotFound { text }
            | OptError::PotentialBug { text }
            | OptError::ImpossibleError { text }
            | OptError::BackendError { text } => {
                write!(f, "Optimizer backend error: {text}")
            }
            OptError::NonStationaryParams { denominator } => {
                write!(
                    f,
                    "Candidate parameters are non-stationary: unconditional-variance denominator is {denominator}"
                )
            }
            OptError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, got {actual}")
            }
            OptError::InvalidThetaInput { index, value } => {
                write!(f, "Theta input at index {index} must be finite, got {value}")
            }
            OptError::ModelError { text } => {
                write!(f, "Model error during optimization: {text}")
            }
        }
    }
}

/// Normalize `argmin` backend errors into [`OptError`] wrappers.
impl From<Error> for OptError {
    fn from(err: Error) -> OptError {
        match err.downcast_ref::<ArgminError>() {
            Some(ArgminError::InvalidParameter { text }) => {
                OptError::InvalidParameter { text: text.clone() }
            }
            Some(ArgminError::NotImplemented { text }) => {
                OptError::NotImplemented { text: text.clone() }
            }
            Some(ArgminError::NotInitialized { text }) => {
                OptError::NotInitialized { text: text.clone() }
            }
            Some(ArgminError::ConditionViolated { text }) => {
                OptError::ConditionViolated { text: text.clone() }
            }
            Some(ArgminError::CheckpointNotFound { text }) => {
                OptError::CheckpointNotFound { text: text.clone() }
            }
            Some(ArgminError::PotentialBug { text }) => {
                OptError::PotentialBug { text: text.clone() }
            }
            Some(ArgminError::ImpossibleError { text }) => {
                OptError::ImpossibleError { text: text.clone() }
            }
            _ => OptError::BackendError { text: err.to_string() },
        }
    }
}

impl From<VolError> for OptError {
    fn from(err: VolError) -> OptError {
        match err {
            VolError::NonStationaryParams { denominator } => {
                OptError::NonStationaryParams { denominator }
            }
            other => OptError::ModelError { text: other.to_string() },
        }
    }
}

impl From<ParamError> for OptError {
    fn from(err: ParamError) -> OptError {
        match err {
            ParamError::ThetaLengthMismatch { expected, actual } => {
                OptError::ThetaLengthMismatch { expected, actual }
            }
            ParamError::InvalidThetaInput { index, value } => {
                OptError::InvalidThetaInput { index, value }
            }
            other => OptError::ModelError { text: other.to_string() },
        }
    }
}
