//! Rootstar HRF Native - Host computation of HRF-convolved regressors
//!
//! This crate turns stimulus events into design-matrix columns for fMRI and
//! fNIRS general linear models:
//! - Difference-of-gammas kernels (SPM, Glover) and their derivatives
//! - FIR bases of delayed boxcars
//! - Oversampled event regressors, convolution and linear resampling
//! - Orthogonalization of derivative regressors
//!
//! # Modules
//!
//! - [`hrf`]: Kernel library and model-to-kernel selection
//! - [`processing`]: Event sampling, resampling and orthogonalization
//! - [`regressor`]: End-to-end regressor computation and naming
//! - [`diagnostics`]: Non-fatal conditions reported with the results
//! - [`error`]: Error types
//!
//! # Example
//!
//! ```rust
//! use rootstar_hrf_core::{ExperimentalCondition, HrfModel};
//! use rootstar_hrf_native::compute_regressor_with_defaults;
//!
//! let condition = ExperimentalCondition::new(vec![0.0], vec![0.0], vec![1.0]).unwrap();
//! let frame_times: Vec<f64> = (0..10u32).map(f64::from).collect();
//!
//! let regressors = compute_regressor_with_defaults(&condition, &HrfModel::Canonical, &frame_times).unwrap();
//! assert_eq!(regressors.matrix.shape(), (10, 1));
//! assert_eq!(regressors.names, vec!["cond"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod diagnostics;
pub mod error;
pub mod hrf;
pub mod processing;
pub mod regressor;

// Re-export key types
pub use diagnostics::Diagnostic;
pub use error::{RegressorError, RegressorResult};
pub use regressor::{
    compute_design, compute_regressor, compute_regressor_with_defaults, regressor_names,
    repetition_interval, RegressorConfig, Regressors,
};
