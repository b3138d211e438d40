//! Error types for Rootstar HRF core
//!
//! These errors work in `no_std` environments. They carry enough context to
//! tell the caller which input was malformed; the native pipeline converts
//! them into its own `thiserror`-based error type.

use alloc::string::String;
use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors raised while constructing conditions or model descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoreError {
    /// Onset, duration and amplitude sequences differ in length
    UnequalLengths {
        /// Number of onsets
        onsets: usize,
        /// Number of durations
        durations: usize,
        /// Number of amplitudes
        amplitudes: usize,
    },
    /// The HRF model identifier is not one of the known models
    UnsupportedModel {
        /// Identifier that was requested
        identifier: String,
    },
    /// The `fir` model was requested without any delays
    MissingFirDelays,
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnequalLengths { onsets, durations, amplitudes } => {
                write!(
                    f,
                    "Condition sequences differ in length: {onsets} onsets, {durations} durations, {amplitudes} amplitudes"
                )
            }
            Self::UnsupportedModel { identifier } => {
                write!(f, "Unsupported HRF model: {identifier:?}")
            }
            Self::MissingFirDelays => write!(f, "FIR model requires a list of delays"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoreError {}

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;
