//! Regressor processing pipeline
//!
//! This module provides the stages between events and the design matrix:
//! - [`sampling`]: Oversampled step-function event regressor
//! - [`resample`]: Kernel convolution and linear resampling at frame times
//! - [`orthogonalize`]: Least-squares orthogonalization of derivative columns

pub mod orthogonalize;
pub mod resample;
pub mod sampling;

// Re-export key functions
pub use orthogonalize::orthogonalize;
pub use resample::{convolve_and_resample, convolve_kernel, resample_regressor};
pub use sampling::{event_indices, hr_frame_times, sample_condition, validate_frame_times, SampledCondition};
