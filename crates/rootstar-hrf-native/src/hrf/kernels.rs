//! Hemodynamic Response Kernels
//!
//! Difference-of-gammas response functions sampled on the oversampled time
//! grid, and their finite-difference derivatives.
//!
//! # Kernel Characteristics
//!
//! - Sampled every `dt = tr / oversampling` seconds over `time_length` seconds
//! - Response kernels are normalized to unit sum
//! - Derivative kernels are plain finite differences and keep their scale
//! - Every kernel built with the same `tr`, `oversampling` and `time_length`
//!   has the same length

use rootstar_hrf_core::math::{self, constants};
use rootstar_hrf_core::{GammaDifferenceParams, KernelPreset};

use crate::error::{RegressorError, RegressorResult};

/// Number of kernel samples for the given timing.
///
/// # Errors
///
/// Rejects non-positive or non-finite `tr` and `time_length`, and a zero
/// oversampling factor.
pub fn kernel_len(tr: f64, oversampling: usize, time_length: f64) -> RegressorResult<usize> {
    if oversampling == 0 {
        return Err(RegressorError::invalid("oversampling", "must be at least 1"));
    }
    if !(tr.is_finite() && tr > 0.0) {
        return Err(RegressorError::invalid(
            "tr",
            format!("repetition interval must be positive and finite, got {tr}"),
        ));
    }
    if !(time_length.is_finite() && time_length > 0.0) {
        return Err(RegressorError::invalid(
            "time_length",
            format!("kernel length must be positive and finite, got {time_length}"),
        ));
    }

    let dt = tr / oversampling as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let len = (time_length / dt).floor() as usize;
    if len == 0 {
        return Err(RegressorError::invalid(
            "time_length",
            format!("{time_length}s is shorter than one sample of {dt}s"),
        ));
    }
    Ok(len)
}

/// Difference-of-gammas response with arbitrary parameters.
///
/// Timestamps are `linspace(0, time_length, len)` shifted by `onset / dt`; the
/// `dt / dispersion` term locates each gamma density. The result is divided
/// by its own sum.
///
/// # Errors
///
/// Invalid timing (see [`kernel_len`]) or a response whose sum is zero or not
/// finite.
pub fn gamma_difference_hrf(
    tr: f64,
    oversampling: usize,
    time_length: f64,
    onset: f64,
    params: &GammaDifferenceParams,
) -> RegressorResult<Vec<f64>> {
    let len = kernel_len(tr, oversampling, time_length)?;
    let dt = tr / oversampling as f64;
    let shift = onset / dt;

    let peak_shape = params.delay / params.dispersion;
    let peak_loc = dt / params.dispersion;
    let under_shape = params.undershoot / params.u_dispersion;
    let under_loc = dt / params.u_dispersion;

    let mut hrf: Vec<f64> = math::linspace(0.0, time_length, len)
        .into_iter()
        .map(|t| {
            let t = t - shift;
            math::gamma_pdf(t, peak_shape, peak_loc)
                - params.ratio * math::gamma_pdf(t, under_shape, under_loc)
        })
        .collect();

    let total: f64 = hrf.iter().sum();
    if total == 0.0 || !total.is_finite() {
        return Err(RegressorError::computation(
            "hrf normalization",
            format!("kernel sum is {total}"),
        ));
    }
    for h in &mut hrf {
        *h /= total;
    }

    Ok(hrf)
}

/// Response kernel of a named preset
///
/// # Errors
///
/// See [`gamma_difference_hrf`].
pub fn response_kernel(
    preset: KernelPreset,
    tr: f64,
    oversampling: usize,
    time_length: f64,
    onset: f64,
) -> RegressorResult<Vec<f64>> {
    gamma_difference_hrf(tr, oversampling, time_length, onset, &preset.params())
}

/// Time derivative of a named preset:
/// `(hrf(onset + 0.1) - hrf(onset)) / 0.1`
///
/// # Errors
///
/// See [`gamma_difference_hrf`].
pub fn time_derivative(
    preset: KernelPreset,
    tr: f64,
    oversampling: usize,
    time_length: f64,
    onset: f64,
) -> RegressorResult<Vec<f64>> {
    let step = constants::TIME_DERIVATIVE_STEP_S;
    let shifted = response_kernel(preset, tr, oversampling, time_length, onset + step)?;
    let base = response_kernel(preset, tr, oversampling, time_length, onset)?;
    Ok(finite_difference(&shifted, &base, step))
}

/// SPM canonical response
///
/// # Errors
///
/// See [`gamma_difference_hrf`].
pub fn spm_hrf(tr: f64, oversampling: usize, time_length: f64, onset: f64) -> RegressorResult<Vec<f64>> {
    response_kernel(KernelPreset::Spm, tr, oversampling, time_length, onset)
}

/// Glover response
///
/// # Errors
///
/// See [`gamma_difference_hrf`].
pub fn glover_hrf(tr: f64, oversampling: usize, time_length: f64, onset: f64) -> RegressorResult<Vec<f64>> {
    response_kernel(KernelPreset::Glover, tr, oversampling, time_length, onset)
}

/// SPM time derivative
///
/// # Errors
///
/// See [`gamma_difference_hrf`].
pub fn spm_time_derivative(
    tr: f64,
    oversampling: usize,
    time_length: f64,
    onset: f64,
) -> RegressorResult<Vec<f64>> {
    time_derivative(KernelPreset::Spm, tr, oversampling, time_length, onset)
}

/// Glover time derivative
///
/// # Errors
///
/// See [`gamma_difference_hrf`].
pub fn glover_time_derivative(
    tr: f64,
    oversampling: usize,
    time_length: f64,
    onset: f64,
) -> RegressorResult<Vec<f64>> {
    time_derivative(KernelPreset::Glover, tr, oversampling, time_length, onset)
}

/// SPM dispersion derivative:
/// `(hrf(dispersion = 1.01) - hrf(dispersion = 1)) / 0.01`
///
/// # Errors
///
/// See [`gamma_difference_hrf`].
pub fn spm_dispersion_derivative(
    tr: f64,
    oversampling: usize,
    time_length: f64,
    onset: f64,
) -> RegressorResult<Vec<f64>> {
    let step = constants::DISPERSION_DERIVATIVE_STEP;
    let base_params = GammaDifferenceParams::SPM;
    let wider = base_params.with_dispersion(base_params.dispersion + step);

    let perturbed = gamma_difference_hrf(tr, oversampling, time_length, onset, &wider)?;
    let base = gamma_difference_hrf(tr, oversampling, time_length, onset, &base_params)?;
    Ok(finite_difference(&perturbed, &base, step))
}

/// Boxcar kernel for one FIR delay: `delay * oversampling` zeros followed by
/// `oversampling` ones.
#[must_use]
pub fn fir_kernel(delay: usize, oversampling: usize) -> Vec<f64> {
    let mut kernel = vec![0.0; delay * oversampling];
    kernel.resize(kernel.len() + oversampling, 1.0);
    kernel
}

fn finite_difference(upper: &[f64], lower: &[f64], step: f64) -> Vec<f64> {
    upper.iter().zip(lower).map(|(u, l)| (u - l) / step).collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const LENGTH: f64 = constants::DEFAULT_TIME_LENGTH_S;
    const OVERSAMPLING: usize = constants::DEFAULT_OVERSAMPLING;

    fn argmax(values: &[f64]) -> usize {
        values
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .map(|(i, _)| i)
            .unwrap()
    }

    #[test]
    fn test_kernel_len() {
        assert_eq!(kernel_len(1.0, 16, 32.0).unwrap(), 512);
        assert_eq!(kernel_len(2.0, 16, 32.0).unwrap(), 256);
        assert_eq!(kernel_len(2.5, 16, 32.0).unwrap(), 204);
    }

    #[test]
    fn test_kernel_len_rejects_bad_timing() {
        assert!(matches!(
            kernel_len(1.0, 0, 32.0),
            Err(RegressorError::InvalidParameter { parameter: "oversampling", .. })
        ));
        assert!(matches!(
            kernel_len(-1.0, 16, 32.0),
            Err(RegressorError::InvalidParameter { parameter: "tr", .. })
        ));
        assert!(matches!(
            kernel_len(1.0, 16, 0.01),
            Err(RegressorError::InvalidParameter { parameter: "time_length", .. })
        ));
    }

    #[test]
    fn test_response_kernels_sum_to_one() {
        for tr in [0.5, 1.0, 2.0, 2.5] {
            for preset in [KernelPreset::Spm, KernelPreset::Glover] {
                let hrf = response_kernel(preset, tr, OVERSAMPLING, LENGTH, 0.0).unwrap();
                assert_relative_eq!(hrf.iter().sum::<f64>(), 1.0, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_spm_shape() {
        let hrf = spm_hrf(1.0, OVERSAMPLING, LENGTH, 0.0).unwrap();
        let step = LENGTH / (hrf.len() - 1) as f64;

        // Zero at the origin, positive peak around 5 s
        assert_eq!(hrf[0], 0.0);
        let peak_time = argmax(&hrf) as f64 * step;
        assert!(peak_time > 4.0 && peak_time < 6.5, "peak at {peak_time}s");

        // Undershoot is negative
        let undershoot_idx = (15.0 / step) as usize;
        assert!(hrf[undershoot_idx] < 0.0);
    }

    #[test]
    fn test_glover_differs_from_spm() {
        let spm = spm_hrf(2.0, OVERSAMPLING, LENGTH, 0.0).unwrap();
        let glover = glover_hrf(2.0, OVERSAMPLING, LENGTH, 0.0).unwrap();
        assert_eq!(spm.len(), glover.len());
        assert!(spm.iter().zip(&glover).any(|(a, b)| (a - b).abs() > 1e-6));
    }

    #[test]
    fn test_derivatives_match_response_length() {
        let hrf = spm_hrf(2.0, OVERSAMPLING, LENGTH, 0.0).unwrap();
        let dt = spm_time_derivative(2.0, OVERSAMPLING, LENGTH, 0.0).unwrap();
        let dd = spm_dispersion_derivative(2.0, OVERSAMPLING, LENGTH, 0.0).unwrap();
        let gdt = glover_time_derivative(2.0, OVERSAMPLING, LENGTH, 0.0).unwrap();
        assert_eq!(dt.len(), hrf.len());
        assert_eq!(dd.len(), hrf.len());
        assert_eq!(gdt.len(), hrf.len());
    }

    #[test]
    fn test_time_derivative_is_finite_difference() {
        let base = spm_hrf(1.0, OVERSAMPLING, LENGTH, 0.0).unwrap();
        let shifted = spm_hrf(1.0, OVERSAMPLING, LENGTH, 0.1).unwrap();
        let derivative = spm_time_derivative(1.0, OVERSAMPLING, LENGTH, 0.0).unwrap();

        for ((d, s), b) in derivative.iter().zip(&shifted).zip(&base) {
            assert_relative_eq!(*d, (s - b) / 0.1, epsilon = 1e-12);
        }
        // Differences of unit-sum kernels sum to zero
        assert_relative_eq!(derivative.iter().sum::<f64>(), 0.0, epsilon = 1e-8);
    }

    #[test]
    fn test_onset_shifts_kernel_later() {
        let base = glover_hrf(1.0, OVERSAMPLING, LENGTH, 0.0).unwrap();
        let shifted = glover_hrf(1.0, OVERSAMPLING, LENGTH, 0.1).unwrap();
        assert!(argmax(&shifted) > argmax(&base));
    }

    #[test]
    fn test_fir_kernel() {
        assert_eq!(fir_kernel(0, 4), vec![1.0; 4]);
        assert_eq!(fir_kernel(2, 2), vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0]);
    }
}
