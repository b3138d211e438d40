//! Event sampling on the high-resolution time grid
//!
//! Converts the sparse events of a condition into a dense step function. The
//! grid starts `min_onset` seconds before the first frame time so that events
//! preceding the acquisition still shape the early part of the convolved
//! regressor.

use rootstar_hrf_core::math;
use rootstar_hrf_core::ExperimentalCondition;

use crate::diagnostics::Diagnostic;
use crate::error::{RegressorError, RegressorResult};

/// Dense event regressor and the timestamps it is sampled at.
#[derive(Clone, Debug, PartialEq)]
pub struct SampledCondition {
    /// Step function equal to the summed amplitude of the active events
    pub regressor: Vec<f64>,
    /// High-resolution timestamps (s), same length as `regressor`
    pub hr_frame_times: Vec<f64>,
    /// Non-fatal conditions met while sampling
    pub diagnostics: Vec<Diagnostic>,
}

/// Check that frame times hold at least two finite, strictly increasing values.
///
/// # Errors
///
/// [`RegressorError::InvalidParameter`] naming `frame_times`.
pub fn validate_frame_times(frame_times: &[f64]) -> RegressorResult<()> {
    if frame_times.len() < 2 {
        return Err(RegressorError::invalid(
            "frame_times",
            format!("need at least 2 frame times, got {}", frame_times.len()),
        ));
    }
    if frame_times.iter().any(|t| !t.is_finite()) {
        return Err(RegressorError::invalid("frame_times", "frame times must be finite"));
    }
    if let Some(i) = frame_times.windows(2).position(|w| w[1] <= w[0]) {
        return Err(RegressorError::invalid(
            "frame_times",
            format!("not strictly increasing at index {}", i + 1),
        ));
    }
    Ok(())
}

/// High-resolution timestamps covering `[first + min_onset, last * (1 + 1/(n-1))]`.
///
/// The sample count is
/// `floor((n-1)/(last-first) * (last*(1 + 1/(n-1)) - first - min_onset) * oversampling) + 1`,
/// which places `oversampling` samples per mean frame interval.
///
/// # Errors
///
/// Invalid frame times, zero oversampling, or a `min_onset` that leaves fewer
/// than two grid samples.
pub fn hr_frame_times(frame_times: &[f64], oversampling: usize, min_onset: f64) -> RegressorResult<Vec<f64>> {
    validate_frame_times(frame_times)?;
    if oversampling == 0 {
        return Err(RegressorError::invalid("oversampling", "must be at least 1"));
    }
    if !min_onset.is_finite() {
        return Err(RegressorError::invalid("min_onset", "must be finite"));
    }

    let n = frame_times.len() as f64;
    let first = frame_times[0];
    let last = frame_times[frame_times.len() - 1];

    let start = first + min_onset;
    let stop = last * (1.0 + 1.0 / (n - 1.0));
    let n_hr = ((n - 1.0) / (last - first) * (stop - first - min_onset) * oversampling as f64) + 1.0;

    if !(n_hr >= 2.0) {
        return Err(RegressorError::invalid(
            "min_onset",
            format!("grid from {start}s to {stop}s holds no samples"),
        ));
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n_hr = n_hr as usize;
    Ok(math::linspace(start, stop, n_hr))
}

/// Onset and offset grid indices of every event.
///
/// Both indices are the first grid sample at or after the event boundary,
/// clamped to the last sample. A zero-width event (offset == onset) is widened
/// by one sample unless it sits on the last sample.
pub fn event_indices(condition: &ExperimentalCondition, hr_frame_times: &[f64]) -> Vec<(usize, usize)> {
    let last = hr_frame_times.len().saturating_sub(1);

    condition
        .events()
        .map(|event| {
            let onset = math::lower_bound(hr_frame_times, event.onset).min(last);
            let mut offset = math::lower_bound(hr_frame_times, event.onset + event.duration).min(last);
            if offset == onset && offset < last {
                offset += 1;
            }
            (onset, offset)
        })
        .collect()
}

/// Build the oversampled step-function regressor of a condition.
///
/// # Errors
///
/// See [`hr_frame_times`].
pub fn sample_condition(
    condition: &ExperimentalCondition,
    frame_times: &[f64],
    oversampling: usize,
    min_onset: f64,
) -> RegressorResult<SampledCondition> {
    let hr_frame_times = hr_frame_times(frame_times, oversampling, min_onset)?;

    let mut diagnostics = Vec::new();
    let cutoff = frame_times[0] + min_onset;
    let early = condition.onsets().iter().filter(|&&onset| onset < cutoff).count();
    if early > 0 {
        tracing::warn!(
            "{} stimulus onset(s) earlier than {}s; sampled from the grid start",
            early,
            cutoff
        );
        diagnostics.push(Diagnostic::EarlyOnset { cutoff, count: early });
    }

    let mut regressor = vec![0.0; hr_frame_times.len()];
    for ((onset, offset), amplitude) in event_indices(condition, &hr_frame_times)
        .into_iter()
        .zip(condition.amplitudes())
    {
        regressor[onset] += amplitude;
        regressor[offset] -= amplitude;
    }
    math::cumsum_in_place(&mut regressor);

    tracing::debug!(
        "Sampled {} events on {} high-resolution samples",
        condition.len(),
        regressor.len()
    );

    Ok(SampledCondition { regressor, hr_frame_times, diagnostics })
}

// ============================================================================
// Tests
// ============================================================================
