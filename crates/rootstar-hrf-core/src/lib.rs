//! Rootstar HRF Core - `no_std` data model and closed-form math
//!
//! This crate provides the foundational types and numerical primitives used to
//! build hemodynamic-response-convolved regressors. It is `no_std` compatible
//! (it only needs `alloc`) so the kernel math can run on the same targets as
//! the rest of the Rootstar stack.
//!
//! # Modules
//!
//! - [`types`]: Experimental conditions, HRF model identifiers, gamma presets
//! - [`error`]: Error types for condition and model construction
//! - [`math`]: Gamma densities, grids, ordered search, truncated convolution
//!
//! # Features
//!
//! - `std`: Enable standard library support (default)
//!
//! # Example
//!
//! ```rust
//! use rootstar_hrf_core::types::{ExperimentalCondition, HrfModel};
//!
//! let condition = ExperimentalCondition::new(
//!     vec![0.0, 10.0],
//!     vec![2.0, 2.0],
//!     vec![1.0, 1.0],
//! )
//! .unwrap();
//! assert_eq!(condition.len(), 2);
//!
//! let model = HrfModel::from_identifier("spm_time", None).unwrap();
//! assert_eq!(model.kernel_count(), 2);
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub mod math;
pub mod types;

// Re-export commonly used types at crate root
pub use error::CoreError;
pub use types::{ExperimentalCondition, GammaDifferenceParams, HrfModel, KernelPreset, StimulusEvent};
