//! Math utilities for HRF regressor computation (`no_std` compatible)
//!
//! This module provides:
//! - Gamma probability density evaluation
//! - Evenly spaced grids (`linspace`)
//! - Ordered search over sorted grids
//! - Cumulative sums and causal truncated convolution
//!
//! All transcendental functions go through `libm` so results are identical
//! with and without `std`.

use alloc::vec;
use alloc::vec::Vec;

// ============================================================================
// Constants
// ============================================================================

/// Constants for HRF construction
pub mod constants {
    /// Default temporal oversampling factor
    pub const DEFAULT_OVERSAMPLING: usize = 16;

    /// Default HRF kernel length in seconds
    pub const DEFAULT_TIME_LENGTH_S: f64 = 32.0;

    /// Default minimal onset relative to the first frame time, in seconds
    pub const DEFAULT_MIN_ONSET_S: f64 = -24.0;

    /// Onset step used for the time-derivative finite difference (s)
    pub const TIME_DERIVATIVE_STEP_S: f64 = 0.1;

    /// Dispersion step used for the dispersion-derivative finite difference
    pub const DISPERSION_DERIVATIVE_STEP: f64 = 0.01;
}

// ============================================================================
// Gamma density
// ============================================================================

/// Gamma probability density with shape `shape`, location `loc` and unit scale.
///
/// pdf(x) = (x - loc)^(shape - 1) * exp(-(x - loc)) / Γ(shape), zero below `loc`.
#[must_use]
pub fn gamma_pdf(x: f64, shape: f64, loc: f64) -> f64 {
    let y = x - loc;
    if y < 0.0 || y.is_nan() {
        return 0.0;
    }
    if y == 0.0 {
        return if shape > 1.0 {
            0.0
        } else if shape == 1.0 {
            1.0
        } else {
            f64::INFINITY
        };
    }

    libm::exp((shape - 1.0) * libm::log(y) - y - libm::lgamma(shape))
}

// ============================================================================
// Grids
// ============================================================================

/// `num` evenly spaced samples over `[start, stop]`, endpoints included.
///
/// The last sample is exactly `stop`. `num == 1` yields `[start]`.
#[must_use]
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            let mut grid: Vec<f64> = (0..num).map(|i| start + i as f64 * step).collect();
            grid[num - 1] = stop;
            grid
        }
    }
}

/// Index of the first element of `sorted` that is `>= value`.
///
/// Returns `sorted.len()` when every element is smaller.
#[inline]
#[must_use]
pub fn lower_bound(sorted: &[f64], value: f64) -> usize {
    sorted.partition_point(|&x| x < value)
}

/// In-place cumulative sum
pub fn cumsum_in_place(values: &mut [f64]) {
    let mut acc = 0.0;
    for v in values.iter_mut() {
        acc += *v;
        *v = acc;
    }
}

/// Linear convolution of `signal` with `kernel`, keeping the first
/// `signal.len()` samples.
///
/// out[i] = Σ_j signal[i - j] * kernel[j], for j ≤ i.
#[must_use]
pub fn convolve_truncated(signal: &[f64], kernel: &[f64]) -> Vec<f64> {
    let n = signal.len();
    let mut out = vec![0.0; n];

    // Scatter form skips the zero runs of sparse event regressors
    for (i, &s) in signal.iter().enumerate() {
        if s == 0.0 {
            continue;
        }
        for (o, &k) in out[i..].iter_mut().zip(kernel) {
            *o += s * k;
        }
    }

    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gamma_pdf_known_values() {
        // shape 1 is the exponential density
        assert_relative_eq!(gamma_pdf(1.0, 1.0, 0.0), libm::exp(-1.0), epsilon = 1e-12);
        // shape 6: x^5 e^-x / 120
        assert_relative_eq!(
            gamma_pdf(5.0, 6.0, 0.0),
            3125.0 * libm::exp(-5.0) / 120.0,
            epsilon = 1e-12
        );
        // location shifts the density
        assert_relative_eq!(gamma_pdf(5.5, 6.0, 0.5), gamma_pdf(5.0, 6.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_gamma_pdf_support() {
        assert_eq!(gamma_pdf(-1.0, 6.0, 0.0), 0.0);
        assert_eq!(gamma_pdf(0.0, 6.0, 0.0), 0.0);
        assert_eq!(gamma_pdf(0.2, 6.0, 0.5), 0.0);
    }

    #[test]
    fn test_linspace_endpoints() {
        let grid = linspace(-24.0, 10.0, 545);
        assert_eq!(grid.len(), 545);
        assert_eq!(grid[0], -24.0);
        assert_eq!(grid[544], 10.0);
        assert_relative_eq!(grid[1] - grid[0], 0.0625, epsilon = 1e-12);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 7.0, 1), vec![3.0]);
    }

    #[test]
    fn test_lower_bound() {
        let grid = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(lower_bound(&grid, -5.0), 0);
        assert_eq!(lower_bound(&grid, 1.0), 1);
        assert_eq!(lower_bound(&grid, 1.5), 2);
        assert_eq!(lower_bound(&grid, 9.0), 4);
    }

    #[test]
    fn test_cumsum() {
        let mut values = [1.0, 0.0, -1.0, 2.0];
        cumsum_in_place(&mut values);
        assert_eq!(values, [1.0, 1.0, 0.0, 2.0]);
    }

    #[test]
    fn test_convolve_truncated() {
        let signal = [1.0, 0.0, 2.0, 0.0];
        let kernel = [1.0, 0.5, 0.25];
        let out = convolve_truncated(&signal, &kernel);
        assert_eq!(out, vec![1.0, 0.5, 2.25, 1.0]);
    }

    #[test]
    fn test_convolve_kernel_longer_than_signal() {
        let out = convolve_truncated(&[1.0, 1.0], &[1.0, 1.0, 1.0, 1.0]);
        assert_eq!(out, vec![1.0, 2.0]);
    }
}
