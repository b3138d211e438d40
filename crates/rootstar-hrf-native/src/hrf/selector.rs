//! Kernel selection for the supported hemodynamic models

use rootstar_hrf_core::HrfModel;

use super::kernels;
use crate::error::{RegressorError, RegressorResult};

/// Kernels of `model`, in regressor-column order.
///
/// Parametric kernels all share `tr`, `oversampling` and `time_length` so their
/// convolutions have matching lengths. FIR kernels only depend on
/// `oversampling`.
///
/// # Errors
///
/// Propagates kernel construction failures (invalid timing, degenerate
/// normalization).
pub fn hrf_kernels(
    model: &HrfModel,
    tr: f64,
    oversampling: usize,
    time_length: f64,
) -> RegressorResult<Vec<Vec<f64>>> {
    let kernels = match model {
        HrfModel::Spm => vec![kernels::spm_hrf(tr, oversampling, time_length, 0.0)?],
        HrfModel::SpmTime => vec![
            kernels::spm_hrf(tr, oversampling, time_length, 0.0)?,
            kernels::spm_time_derivative(tr, oversampling, time_length, 0.0)?,
        ],
        HrfModel::SpmTimeDispersion => vec![
            kernels::spm_hrf(tr, oversampling, time_length, 0.0)?,
            kernels::spm_time_derivative(tr, oversampling, time_length, 0.0)?,
            kernels::spm_dispersion_derivative(tr, oversampling, time_length, 0.0)?,
        ],
        HrfModel::Canonical => vec![kernels::glover_hrf(tr, oversampling, time_length, 0.0)?],
        HrfModel::CanonicalWithDerivative => vec![
            kernels::glover_hrf(tr, oversampling, time_length, 0.0)?,
            kernels::glover_time_derivative(tr, oversampling, time_length, 0.0)?,
        ],
        HrfModel::Fir { delays } => {
            if oversampling == 0 {
                return Err(RegressorError::invalid("oversampling", "must be at least 1"));
            }
            delays.iter().map(|&delay| kernels::fir_kernel(delay, oversampling)).collect()
        }
    };

    debug_assert_eq!(kernels.len(), model.kernel_count());
    Ok(kernels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_counts() {
        let cases = [
            (HrfModel::Spm, 1),
            (HrfModel::SpmTime, 2),
            (HrfModel::SpmTimeDispersion, 3),
            (HrfModel::Canonical, 1),
            (HrfModel::CanonicalWithDerivative, 2),
            (HrfModel::Fir { delays: vec![0, 1, 2, 5] }, 4),
        ];

        for (model, expected) in cases {
            let kernels = hrf_kernels(&model, 2.0, 16, 32.0).unwrap();
            assert_eq!(kernels.len(), expected, "{model}");
        }
    }

    #[test]
    fn test_parametric_kernels_share_length() {
        let kernels = hrf_kernels(&HrfModel::SpmTimeDispersion, 1.5, 16, 32.0).unwrap();
        assert!(kernels.iter().all(|k| k.len() == kernels[0].len()));
    }

    #[test]
    fn test_fir_kernels_are_delayed_boxcars() {
        let kernels = hrf_kernels(&HrfModel::Fir { delays: vec![0, 3] }, 2.0, 4, 32.0).unwrap();
        assert_eq!(kernels[0], vec![1.0; 4]);
        assert_eq!(kernels[1].len(), 16);
        assert!(kernels[1][..12].iter().all(|&v| v == 0.0));
        assert!(kernels[1][12..].iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_zero_oversampling_rejected() {
        for model in [HrfModel::Canonical, HrfModel::Fir { delays: vec![0] }] {
            assert!(matches!(
                hrf_kernels(&model, 2.0, 0, 32.0),
                Err(RegressorError::InvalidParameter { parameter: "oversampling", .. })
            ));
        }
    }
}
