//! Convolution and resampling
//!
//! Convolves the dense event regressor with each kernel and interpolates the
//! result down to the frame times.

use nalgebra::DMatrix;
use rootstar_hrf_core::math;

use crate::error::{RegressorError, RegressorResult};

/// Causal convolution of the high-resolution regressor with `kernel`, truncated
/// to the regressor's length.
#[must_use]
pub fn convolve_kernel(hr_regressor: &[f64], kernel: &[f64]) -> Vec<f64> {
    math::convolve_truncated(hr_regressor, kernel)
}

/// Piecewise-linear interpolation of `hr_regressor` at `frame_times`.
///
/// # Errors
///
/// [`RegressorError::OutOfBounds`] for any frame time outside
/// `[hr_frame_times[0], hr_frame_times[last]]`; no extrapolation or clamping
/// takes place. Mismatched or too-short inputs are invalid parameters.
pub fn resample_regressor(
    hr_regressor: &[f64],
    hr_frame_times: &[f64],
    frame_times: &[f64],
) -> RegressorResult<Vec<f64>> {
    if hr_regressor.len() != hr_frame_times.len() {
        return Err(RegressorError::invalid(
            "hr_regressor",
            format!(
                "{} values for {} timestamps",
                hr_regressor.len(),
                hr_frame_times.len()
            ),
        ));
    }
    if hr_frame_times.len() < 2 {
        return Err(RegressorError::invalid(
            "hr_frame_times",
            "interpolation needs at least 2 samples",
        ));
    }

    let last = hr_frame_times.len() - 1;
    let (min, max) = (hr_frame_times[0], hr_frame_times[last]);

    frame_times
        .iter()
        .map(|&time| {
            if !(time >= min && time <= max) {
                return Err(RegressorError::OutOfBounds { time, min, max });
            }

            let hi = math::lower_bound(hr_frame_times, time).clamp(1, last);
            let lo = hi - 1;
            let slope = (hr_regressor[hi] - hr_regressor[lo]) / (hr_frame_times[hi] - hr_frame_times[lo]);
            Ok(slope * (time - hr_frame_times[lo]) + hr_regressor[lo])
        })
        .collect()
}

/// Convolve with every kernel and resample, one column per kernel.
///
/// # Errors
///
/// See [`resample_regressor`].
pub fn convolve_and_resample(
    hr_regressor: &[f64],
    hr_frame_times: &[f64],
    kernels: &[Vec<f64>],
    frame_times: &[f64],
) -> RegressorResult<DMatrix<f64>> {
    let mut design = DMatrix::zeros(frame_times.len(), kernels.len());

    for (j, kernel) in kernels.iter().enumerate() {
        let convolved = convolve_kernel(hr_regressor, kernel);
        let column = resample_regressor(&convolved, hr_frame_times, frame_times)?;
        design.column_mut(j).copy_from_slice(&column);
    }

    Ok(design)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_interpolation_on_and_between_samples() {
        let hr_times = [0.0, 1.0, 2.0, 3.0];
        let hr_values = [0.0, 10.0, 20.0, 0.0];

        let out = resample_regressor(&hr_values, &hr_times, &[0.0, 0.5, 1.0, 2.5, 3.0]).unwrap();
        assert_relative_eq!(out[0], 0.0);
        assert_relative_eq!(out[1], 5.0);
        assert_relative_eq!(out[2], 10.0);
        assert_relative_eq!(out[3], 10.0);
        assert_relative_eq!(out[4], 0.0);
    }

    #[test]
    fn test_interpolation_out_of_bounds() {
        let hr_times = [0.0, 1.0, 2.0];
        let hr_values = [1.0, 2.0, 3.0];

        assert_eq!(
            resample_regressor(&hr_values, &hr_times, &[0.5, 2.5]),
            Err(RegressorError::OutOfBounds { time: 2.5, min: 0.0, max: 2.0 })
        );
        assert!(matches!(
            resample_regressor(&hr_values, &hr_times, &[-0.1]),
            Err(RegressorError::OutOfBounds { .. })
        ));
        assert!(matches!(
            resample_regressor(&hr_values, &hr_times, &[f64::NAN]),
            Err(RegressorError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_interpolation_length_mismatch() {
        assert!(matches!(
            resample_regressor(&[1.0, 2.0], &[0.0, 1.0, 2.0], &[0.5]),
            Err(RegressorError::InvalidParameter { parameter: "hr_regressor", .. })
        ));
    }

    #[test]
    fn test_convolve_and_resample_shape() {
        let hr_times: Vec<f64> = (0..41u32).map(|i| f64::from(i) * 0.25).collect();
        let mut hr_regressor = vec![0.0; 41];
        hr_regressor[4] = 1.0;

        let kernels = vec![vec![1.0, 1.0, 1.0, 1.0], vec![0.0, 0.0, 0.0, 0.0, 2.0]];
        let frames = [0.0, 1.0, 2.0, 3.0];
        let design = convolve_and_resample(&hr_regressor, &hr_times, &kernels, &frames).unwrap();

        assert_eq!(design.shape(), (4, 2));
        // Boxcar covers samples 4..8, i.e. t in [1, 2)
        assert_relative_eq!(design[(1, 0)], 1.0);
        assert_relative_eq!(design[(2, 0)], 0.0);
        // Delayed spike lands on sample 8 (t = 2)
        assert_relative_eq!(design[(2, 1)], 2.0);
        assert_relative_eq!(design[(1, 1)], 0.0);
    }
}
