//! Regressor computation
//!
//! End-to-end pipeline turning one experimental condition into the
//! design-matrix columns of an HRF model.
//!
//! # Pipeline
//!
//! ```text
//! condition + frame times
//!        │
//!        ▼
//! sample_condition ──► dense regressor on the high-resolution grid
//!        │
//!        ▼
//! hrf_kernels ───────► one kernel per column
//!        │
//!        ▼
//! convolve_and_resample ──► (scans × kernels) matrix
//!        │
//!        ▼
//! orthogonalize (all models but FIR) ──► regressors + names
//! ```

use nalgebra::DMatrix;
use rootstar_hrf_core::math::constants;
use rootstar_hrf_core::{ExperimentalCondition, HrfModel};
use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostic;
use crate::error::{RegressorError, RegressorResult};
use crate::hrf::hrf_kernels;
use crate::processing::{convolve_and_resample, orthogonalize, sample_condition, validate_frame_times};

/// Regressor computation configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegressorConfig {
    /// Identifier used to name the regressor columns
    pub condition_id: String,
    /// Temporal oversampling factor of the high-resolution grid
    pub oversampling: usize,
    /// Start of the high-resolution grid relative to the first frame time (s)
    pub min_onset: f64,
    /// HRF kernel length (s)
    pub time_length: f64,
}

impl Default for RegressorConfig {
    fn default() -> Self {
        Self {
            condition_id: "cond".to_string(),
            oversampling: constants::DEFAULT_OVERSAMPLING,
            min_onset: constants::DEFAULT_MIN_ONSET_S,
            time_length: constants::DEFAULT_TIME_LENGTH_S,
        }
    }
}

impl RegressorConfig {
    /// Set the condition identifier
    #[must_use]
    pub fn with_condition_id(mut self, condition_id: impl Into<String>) -> Self {
        self.condition_id = condition_id.into();
        self
    }

    /// Set the oversampling factor
    #[must_use]
    pub fn with_oversampling(mut self, oversampling: usize) -> Self {
        self.oversampling = oversampling;
        self
    }

    /// Set the minimal onset (s)
    #[must_use]
    pub fn with_min_onset(mut self, min_onset: f64) -> Self {
        self.min_onset = min_onset;
        self
    }

    /// Set the HRF kernel length (s)
    #[must_use]
    pub fn with_time_length(mut self, time_length: f64) -> Self {
        self.time_length = time_length;
        self
    }

    /// Check the configuration
    ///
    /// # Errors
    ///
    /// [`RegressorError::InvalidParameter`] for a zero oversampling factor or
    /// a non-finite `min_onset` / non-positive `time_length`.
    pub fn validate(&self) -> RegressorResult<()> {
        if self.oversampling == 0 {
            return Err(RegressorError::invalid("oversampling", "must be at least 1"));
        }
        if !self.min_onset.is_finite() {
            return Err(RegressorError::invalid("min_onset", "must be finite"));
        }
        if !(self.time_length.is_finite() && self.time_length > 0.0) {
            return Err(RegressorError::invalid(
                "time_length",
                format!("must be positive and finite, got {}", self.time_length),
            ));
        }
        Ok(())
    }
}

/// Regressors of one or more conditions sampled at the frame times.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Regressors {
    /// (scans × regressors) matrix
    pub matrix: DMatrix<f64>,
    /// Column names, in column order
    pub names: Vec<String>,
    /// Non-fatal conditions met during the computation
    pub diagnostics: Vec<Diagnostic>,
}

impl Regressors {
    /// Number of frame times
    pub fn n_scans(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of regressor columns
    pub fn n_regressors(&self) -> usize {
        self.matrix.ncols()
    }

    /// Column with the given name
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let j = self.names.iter().position(|n| n == name)?;
        Some(self.matrix.column(j).iter().copied().collect())
    }
}

/// Repetition interval implied by the frame times: `max / (n - 1)`.
///
/// This is the mean interval of an acquisition starting at 0, not
/// necessarily the true TR.
///
/// # Errors
///
/// Invalid frame times (see [`validate_frame_times`]).
pub fn repetition_interval(frame_times: &[f64]) -> RegressorResult<f64> {
    validate_frame_times(frame_times)?;
    let max = frame_times[frame_times.len() - 1];
    Ok(max / (frame_times.len() - 1) as f64)
}

/// Column names for `model`.
///
/// FIR columns are `{id}_delay_{d}`; parametric models yield `{id}`, then
/// `{id}_derivative` and `{id}_dispersion` as their kernel count grows.
pub fn regressor_names(condition_id: &str, model: &HrfModel) -> Vec<String> {
    match model {
        HrfModel::Spm | HrfModel::Canonical => vec![condition_id.to_string()],
        HrfModel::SpmTime | HrfModel::CanonicalWithDerivative => {
            vec![condition_id.to_string(), format!("{condition_id}_derivative")]
        }
        HrfModel::SpmTimeDispersion => vec![
            condition_id.to_string(),
            format!("{condition_id}_derivative"),
            format!("{condition_id}_dispersion"),
        ],
        HrfModel::Fir { delays } => delays
            .iter()
            .map(|delay| format!("{condition_id}_delay_{delay}"))
            .collect(),
    }
}

/// Convolve one condition with the kernels of `model` and sample the result at
/// `frame_times`.
///
/// # Errors
///
/// - [`RegressorError::InvalidParameter`] for bad configuration or frame times
/// - [`RegressorError::OutOfBounds`] when frame times fall outside the
///   high-resolution grid (e.g. a positive `min_onset`)
/// - [`RegressorError::Computation`] for numerical failures
pub fn compute_regressor(
    condition: &ExperimentalCondition,
    model: &HrfModel,
    frame_times: &[f64],
    config: &RegressorConfig,
) -> RegressorResult<Regressors> {
    config.validate()?;
    let tr = repetition_interval(frame_times)?;

    let sampled = sample_condition(condition, frame_times, config.oversampling, config.min_onset)?;
    let kernels = hrf_kernels(model, tr, config.oversampling, config.time_length)?;

    tracing::debug!(
        "Computing {} regressors for {:?} (tr={:.3}s, {} kernels)",
        model,
        config.condition_id,
        tr,
        kernels.len()
    );

    let mut matrix = convolve_and_resample(&sampled.regressor, &sampled.hr_frame_times, &kernels, frame_times)?;
    if !model.is_fir() {
        orthogonalize(&mut matrix)?;
    }

    let names = regressor_names(&config.condition_id, model);
    debug_assert_eq!(names.len(), matrix.ncols());

    Ok(Regressors { matrix, names, diagnostics: sampled.diagnostics })
}

/// [`compute_regressor`] with the default configuration (`cond`, 16× oversampling,
/// -24s minimal onset, 32s kernels)
///
/// # Errors
///
/// See [`compute_regressor`].
pub fn compute_regressor_with_defaults(
    condition: &ExperimentalCondition,
    model: &HrfModel,
    frame_times: &[f64],
) -> RegressorResult<Regressors> {
    compute_regressor(condition, model, frame_times, &RegressorConfig::default())
}

/// Regressors of several named conditions, stacked column-wise in input order.
///
/// `config.condition_id` is ignored; each condition is named by its own id.
///
/// # Errors
///
/// The first error raised by [`compute_regressor`].
pub fn compute_design(
    conditions: &[(&str, &ExperimentalCondition)],
    model: &HrfModel,
    frame_times: &[f64],
    config: &RegressorConfig,
) -> RegressorResult<Regressors> {
    validate_frame_times(frame_times)?;

    let blocks = conditions
        .iter()
        .map(|(id, condition)| {
            let config = config.clone().with_condition_id(*id);
            compute_regressor(condition, model, frame_times, &config)
        })
        .collect::<RegressorResult<Vec<_>>>()?;

    let total: usize = blocks.iter().map(Regressors::n_regressors).sum();
    let mut matrix = DMatrix::zeros(frame_times.len(), total);
    let mut names = Vec::with_capacity(total);
    let mut diagnostics = Vec::new();

    let mut offset = 0;
    for block in blocks {
        let width = block.n_regressors();
        matrix.columns_mut(offset, width).copy_from(&block.matrix);
        offset += width;
        names.extend(block.names);
        diagnostics.extend(block.diagnostics);
    }

    Ok(Regressors { matrix, names, diagnostics })
}

// ============================================================================
// Tests
// ============================================================================
