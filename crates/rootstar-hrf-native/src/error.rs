//! Error Types for Regressor Computation
//!
//! Error types for kernel construction, event sampling, resampling and
//! orthogonalization using `thiserror`.

use rootstar_hrf_core::CoreError;
use thiserror::Error;

/// Regressor pipeline error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegressorError {
    /// HRF model identifier not recognised
    #[error("Unsupported HRF model: {identifier:?}")]
    UnsupportedModel {
        /// Requested identifier
        identifier: String,
    },

    /// Invalid input parameter
    #[error("Invalid parameter {parameter}: {reason}")]
    InvalidParameter {
        /// Parameter name
        parameter: &'static str,
        /// Reason
        reason: String,
    },

    /// Interpolation requested outside the high-resolution time axis
    #[error("Interpolation time {time}s outside high-resolution range [{min}s, {max}s]")]
    OutOfBounds {
        /// Requested time
        time: f64,
        /// First high-resolution timestamp
        min: f64,
        /// Last high-resolution timestamp
        max: f64,
    },

    /// Numerical failure
    #[error("Computation error in {operation}: {reason}")]
    Computation {
        /// Operation that failed
        operation: &'static str,
        /// Reason
        reason: String,
    },
}

impl RegressorError {
    pub(crate) fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter { parameter, reason: reason.into() }
    }

    pub(crate) fn computation(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::Computation { operation, reason: reason.into() }
    }
}

impl From<CoreError> for RegressorError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnsupportedModel { identifier } => Self::UnsupportedModel { identifier },
            CoreError::UnequalLengths { .. } => Self::invalid("condition", err.to_string()),
            CoreError::MissingFirDelays => Self::invalid("fir_delays", err.to_string()),
        }
    }
}

/// Result type for regressor operations
pub type RegressorResult<T> = Result<T, RegressorError>;
