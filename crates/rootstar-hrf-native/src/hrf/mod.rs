//! Hemodynamic response kernels
//!
//! This module provides the kernel side of the regressor pipeline:
//! - [`kernels`]: Difference-of-gammas responses and their derivatives
//! - [`selector`]: Mapping from an [`HrfModel`](rootstar_hrf_core::HrfModel)
//!   to its ordered list of kernels

pub mod kernels;
pub mod selector;

// Re-export key functions
pub use kernels::{
    fir_kernel, gamma_difference_hrf, glover_hrf, glover_time_derivative, response_kernel,
    spm_dispersion_derivative, spm_hrf, spm_time_derivative, time_derivative,
};
pub use selector::hrf_kernels;
